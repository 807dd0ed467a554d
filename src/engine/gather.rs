// ──────────────────────────────────────────────────
// Gather strategies
// ──────────────────────────────────────────────────
//
// Each gather fans its phases out through an `Executor`. When a phase comes
// back `Interrupted` the gather puts the array back into a permutation of its
// input before returning, so callers never see duplicated or lost elements.

use log::trace;

use crate::bucket::{scatter_buckets, scatter_counting, split_at_lengths};
use crate::element::Element;
use crate::exec::{Executor, Interrupted, Work};
use crate::merge::{Side, block_size};
use crate::micro::Algorithm;

use super::config::Gather;

/// Run `gather` over `data`. `aux` must be `data.len()` long unless `gather`
/// is `Bucket`, which allocates its own storage.
pub(crate) fn run_gather<T: Element, E: Executor>(
    data: &mut [T],
    aux: &mut [T],
    gather: Gather,
    algorithm: Algorithm,
    exec: &E,
) -> Result<(), Interrupted> {
    match gather {
        Gather::Bucket => bucket_gather(data, algorithm, exec),
        Gather::Counting => counting_gather(data, aux, algorithm, exec),
        Gather::Merge => merge_gather(data, aux, algorithm, exec),
    }
}

/// Scatter into 128 owned vectors, then sort each and copy it to its final
/// position in `data` in one parallel phase.
fn bucket_gather<T: Element, E: Executor>(
    data: &mut [T],
    algorithm: Algorithm,
    exec: &E,
) -> Result<(), Interrupted> {
    let mut buckets = scatter_buckets(data);
    let lengths: Vec<usize> = buckets.iter().map(Vec::len).collect();
    trace!(
        "bucket gather: {} non-empty buckets",
        lengths.iter().filter(|&&l| l > 0).count()
    );

    let result = {
        let dests = split_at_lengths(data, lengths.iter().copied());
        let jobs: Vec<Work<'_, T>> = buckets
            .iter_mut()
            .zip(dests)
            .filter(|(bucket, _)| !bucket.is_empty())
            .map(|(bucket, dest)| Work::SortAndCopy {
                data: bucket.as_mut_slice(),
                dest,
                algorithm,
            })
            .collect();
        exec.run(jobs)
    };

    if result.is_err() {
        // Buckets that never ran are still whole, only unsorted.
        for (bucket, dest) in buckets.iter().zip(split_at_lengths(data, lengths)) {
            dest.copy_from_slice(bucket);
        }
    }
    result
}

/// Counting scatter into `aux`, then sort each bucket range of `aux` (with the
/// matching range of `data` as scratch) and copy it back.
fn counting_gather<T: Element, E: Executor>(
    data: &mut [T],
    aux: &mut [T],
    algorithm: Algorithm,
    exec: &E,
) -> Result<(), Interrupted> {
    let layout = scatter_counting(data, aux);
    let lengths = layout.lengths();
    trace!("counting gather: {} non-empty buckets", layout.non_empty());

    let result = {
        let sources = split_at_lengths(aux, lengths);
        let dests = split_at_lengths(data, lengths);
        let jobs: Vec<Work<'_, T>> = sources
            .into_iter()
            .zip(dests)
            .filter(|(src, _)| !src.is_empty())
            .map(|(src, dest)| Work::SortAndCopy {
                data: src,
                dest,
                algorithm,
            })
            .collect();
        exec.run(jobs)
    };

    if result.is_err() {
        // Every range of aux holds its whole bucket, sorted or not.
        data.copy_from_slice(aux);
    }
    result
}

/// Sort `block_size` blocks in place, then merge adjacent runs pairwise,
/// ping-ponging between `data` and `aux` until one run spans the array.
fn merge_gather<T: Element, E: Executor>(
    data: &mut [T],
    aux: &mut [T],
    algorithm: Algorithm,
    exec: &E,
) -> Result<(), Interrupted> {
    let n = data.len();
    let block = block_size(n, exec.workers());
    trace!("merge gather: block size {}", block);

    let jobs: Vec<Work<'_, T>> = data
        .chunks_mut(block)
        .zip(aux.chunks_mut(block))
        .map(|(chunk, scratch)| Work::SortOnly {
            data: chunk,
            scratch,
            algorithm,
        })
        .collect();
    exec.run(jobs)?;

    let mut side = Side::Caller;
    let mut run = block;
    while run < n {
        let width = run.saturating_mul(2);
        trace!("merge round: run {} from {:?}", run, side);

        let (input, output): (&[T], &mut [T]) = match side {
            Side::Caller => (&*data, &mut *aux),
            Side::Aux => (&*aux, &mut *data),
        };
        let jobs: Vec<Work<'_, T>> = input
            .chunks(width)
            .zip(output.chunks_mut(width))
            .map(|(input, output)| Work::Merge { input, output, run })
            .collect();

        if let Err(e) = exec.run(jobs) {
            // The round's input side is untouched and still whole.
            if side == Side::Aux {
                data.copy_from_slice(aux);
            }
            return Err(e);
        }
        side = side.flip();
        run = width;
    }

    if side == Side::Aux {
        data.copy_from_slice(aux);
    }
    Ok(())
}
