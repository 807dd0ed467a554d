/// Pieces of the block-partition + bottom-up merge gather.
///
/// Phase A sorts `block_size` blocks independently. Phase B merges adjacent runs
/// pairwise, doubling the run length each round and alternating between the
/// caller's array and the auxiliary buffer.
use crate::element::Element;

/// Block length for phase A: `len / workers`, at least 1.
#[inline]
pub fn block_size(len: usize, workers: usize) -> usize {
    (len / workers.max(1)).max(1)
}

/// Buffer currently holding the sorted runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Caller,
    Aux,
}

impl Side {
    #[inline]
    pub fn flip(self) -> Side {
        match self {
            Side::Caller => Side::Aux,
            Side::Aux => Side::Caller,
        }
    }
}

/// Merge the sorted runs `input[..run]` and `input[run..]` into `output`.
///
/// On equal keys the left run's element goes first, so the merge is stable.
/// `run` past the end of `input` means there is no right run and the left run
/// is copied as-is.
pub fn merge_runs<T: Element>(input: &[T], output: &mut [T], run: usize) {
    debug_assert_eq!(input.len(), output.len());
    let (left, right) = input.split_at(run.min(input.len()));

    let mut a = 0;
    let mut b = 0;
    let mut w = 0;
    while a < left.len() && b < right.len() {
        // Right element only when strictly smaller
        if left[a].key() > right[b].key() {
            output[w] = right[b];
            b += 1;
        } else {
            output[w] = left[a];
            a += 1;
        }
        w += 1;
    }

    // Drain whichever run is left
    let rest = left.len() - a;
    output[w..w + rest].copy_from_slice(&left[a..]);
    w += rest;
    output[w..].copy_from_slice(&right[b..]);
}
