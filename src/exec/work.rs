use crate::element::{DataKind, Element, IndexedI32, IndexedU32};
use crate::merge::merge_runs;
use crate::micro::{Algorithm, sort_range};

/// One unit of parallel work.
///
/// Only borrows disjoint sub-ranges of buffers owned by the caller or the
/// engine; lives for a single phase of a single call.
#[derive(Debug)]
pub enum Work<'a, T> {
    /// Sort `data`, then copy it over `dest`. `dest` doubles as radix scratch
    /// since it is overwritten afterwards anyway.
    SortAndCopy {
        data: &'a mut [T],
        dest: &'a mut [T],
        algorithm: Algorithm,
    },
    /// Sort `data` in place.
    SortOnly {
        data: &'a mut [T],
        scratch: &'a mut [T],
        algorithm: Algorithm,
    },
    /// Merge the runs `input[..run]` and `input[run..]` into `output`.
    Merge {
        input: &'a [T],
        output: &'a mut [T],
        run: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    SortAndCopy,
    SortOnly,
    Merge,
}

impl<T: Element> Work<'_, T> {
    pub fn kind(&self) -> JobKind {
        match self {
            Work::SortAndCopy { .. } => JobKind::SortAndCopy,
            Work::SortOnly { .. } => JobKind::SortOnly,
            Work::Merge { .. } => JobKind::Merge,
        }
    }

    /// Number of elements the item touches.
    pub fn len(&self) -> usize {
        match self {
            Work::SortAndCopy { data, .. } | Work::SortOnly { data, .. } => data.len(),
            Work::Merge { input, .. } => input.len(),
        }
    }

    pub fn run(self) {
        match self {
            Work::SortAndCopy {
                data,
                dest,
                algorithm,
            } => {
                sort_range(data, algorithm, Some(&mut *dest));
                dest.copy_from_slice(data);
            }
            Work::SortOnly {
                data,
                scratch,
                algorithm,
            } => sort_range(data, algorithm, Some(scratch)),
            Work::Merge { input, output, run } => merge_runs(input, output, run),
        }
    }
}

/// Work item tagged with its element type: what the task queue carries.
#[derive(Debug)]
pub enum Job<'a> {
    Int32(Work<'a, i32>),
    UInt32(Work<'a, u32>),
    IndexedInt32(Work<'a, IndexedI32>),
    IndexedUInt32(Work<'a, IndexedU32>),
}

impl Job<'_> {
    pub fn data_kind(&self) -> DataKind {
        match self {
            Job::Int32(_) => DataKind::Int32,
            Job::UInt32(_) => DataKind::UInt32,
            Job::IndexedInt32(_) => DataKind::IndexedInt32,
            Job::IndexedUInt32(_) => DataKind::IndexedUInt32,
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            Job::Int32(w) => w.kind(),
            Job::UInt32(w) => w.kind(),
            Job::IndexedInt32(w) => w.kind(),
            Job::IndexedUInt32(w) => w.kind(),
        }
    }

    pub fn run(self) {
        match self {
            Job::Int32(w) => w.run(),
            Job::UInt32(w) => w.run(),
            Job::IndexedInt32(w) => w.run(),
            Job::IndexedUInt32(w) => w.run(),
        }
    }
}

/// A phase stopped short because the worker pool was shut down under it.
///
/// Jobs that ran, ran to completion; the rest never touched their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("phase interrupted: {executed} of {total} jobs ran")]
pub struct Interrupted {
    pub executed: usize,
    pub total: usize,
}

/// "Run these independent work items in parallel and wait for all of them."
///
/// `run` is a full barrier: when it returns, no item is still running.
pub trait Executor {
    /// Worker count used to size merge blocks.
    fn workers(&self) -> usize;

    fn run<'a, T: Element>(&self, jobs: Vec<Work<'a, T>>) -> Result<(), Interrupted>;
}
