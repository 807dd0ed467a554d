/// Bucket and offset math shared by the bucket and counting gathers.
///
/// The key domain is cut into `BUCKETS` equal, ordered ranges. Once every
/// bucket is sorted on its own, concatenating buckets in index order gives a
/// sorted array.
use std::ops::Range;

use crate::element::{Element, SortKey};

/// Number of fixed key-range partitions.
pub const BUCKETS: usize = 128;

/// Bucket of a key: `(key - MIN) * BUCKETS / (MAX - MIN + 1)` in 64-bit math.
/// Total over the whole 32-bit domain.
#[inline]
pub fn bucket_index<K: SortKey>(key: K) -> usize {
    let delta = K::MAX - K::MIN + 1;
    ((key.to_i64() - K::MIN) * BUCKETS as i64 / delta) as usize
}

/// Population of every bucket.
pub fn count_buckets<T: Element>(data: &[T]) -> [usize; BUCKETS] {
    let mut counts = [0usize; BUCKETS];
    for e in data {
        counts[bucket_index(e.key())] += 1;
    }
    counts
}

/// Turn per-bucket counts into an exclusive prefix sum in place.
/// Returns the total.
pub fn exclusive_prefix_sum(counts: &mut [usize; BUCKETS]) -> usize {
    let mut acc = 0usize;
    for c in counts.iter_mut() {
        let n = *c;
        *c = acc;
        acc += n;
    }
    acc
}

/// Where each bucket landed after a counting scatter.
///
/// `offsets` is the frozen prefix sum; `cursors` is the write cursor after the
/// scatter, i.e. one past the last element of each bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLayout {
    offsets: [usize; BUCKETS],
    cursors: [usize; BUCKETS],
}

impl BucketLayout {
    #[inline]
    pub fn offset(&self, bucket: usize) -> usize {
        self.offsets[bucket]
    }

    #[inline]
    pub fn len(&self, bucket: usize) -> usize {
        self.cursors[bucket] - self.offsets[bucket]
    }

    #[inline]
    pub fn range(&self, bucket: usize) -> Range<usize> {
        self.offsets[bucket]..self.cursors[bucket]
    }

    pub fn lengths(&self) -> [usize; BUCKETS] {
        std::array::from_fn(|i| self.len(i))
    }

    pub fn non_empty(&self) -> usize {
        (0..BUCKETS).filter(|&i| self.len(i) > 0).count()
    }
}

/// Counting scatter: copy `src` into `dst` grouped by bucket.
///
/// A single forward pass, so elements sharing a bucket keep their input order.
pub fn scatter_counting<T: Element>(src: &[T], dst: &mut [T]) -> BucketLayout {
    assert_eq!(
        src.len(),
        dst.len(),
        "scatter destination must match source length"
    );

    let mut cursors = count_buckets(src);
    exclusive_prefix_sum(&mut cursors);
    // Snapshot before the cursors start moving.
    let offsets = cursors;

    for &e in src {
        let b = bucket_index(e.key());
        dst[cursors[b]] = e;
        cursors[b] += 1;
    }

    BucketLayout { offsets, cursors }
}

/// Bucket scatter: append every element to its bucket's own `Vec`.
/// Order inside a bucket is input order.
pub fn scatter_buckets<T: Element>(src: &[T]) -> Vec<Vec<T>> {
    let mut buckets: Vec<Vec<T>> = (0..BUCKETS).map(|_| Vec::new()).collect();
    for &e in src {
        buckets[bucket_index(e.key())].push(e);
    }
    buckets
}

/// Split `slice` into consecutive disjoint pieces of the given lengths.
///
/// Lengths must sum to at most `slice.len()`; anything left over is dropped.
pub fn split_at_lengths<'a, T>(
    mut slice: &'a mut [T],
    lengths: impl IntoIterator<Item = usize>,
) -> Vec<&'a mut [T]> {
    let lengths = lengths.into_iter();
    let mut pieces = Vec::with_capacity(lengths.size_hint().0);
    for len in lengths {
        let (head, tail) = std::mem::take(&mut slice).split_at_mut(len);
        pieces.push(head);
        slice = tail;
    }
    pieces
}
