use std::sync::Arc;

use bytemuck::Zeroable;
use log::{debug, warn};
use parking_lot::Mutex;

use crate::element::{Element, IndexedI32, IndexedU32};
use crate::exec::{Executor, ForkJoin, Interrupted, TaskQueue, Work, WorkerPool};
use crate::micro::{Algorithm, sort_range};

use super::buffer::AuxBuffer;
use super::config::{Backend, EngineConfig, Gather};
use super::error::EngineError;
use super::gather::run_gather;

/// Longest array a single call accepts; bucket counters are 32-bit.
pub const MAX_LEN: usize = u32::MAX as usize;

enum Dispatch {
    ForkJoin(ForkJoin),
    TaskQueue(TaskQueue),
}

impl Executor for Dispatch {
    fn workers(&self) -> usize {
        match self {
            Dispatch::ForkJoin(fj) => fj.workers(),
            Dispatch::TaskQueue(tq) => tq.workers(),
        }
    }

    fn run<'a, T: Element>(&self, jobs: Vec<Work<'a, T>>) -> Result<(), Interrupted> {
        match self {
            Dispatch::ForkJoin(fj) => fj.run(jobs),
            Dispatch::TaskQueue(tq) => tq.run(jobs),
        }
    }
}

/// Parallel hybrid sort engine.
///
/// Owns the parallel backend and a grow-only auxiliary buffer. Calls on one
/// engine are serialized by the buffer's lock; each call sorts the caller's
/// slice in place and returns once it is fully sorted.
///
/// Arrays shorter than the sequential threshold are sorted on the calling
/// thread with the selected algorithm and no gather. Longer arrays go through
/// the selected gather strategy, which fans phases out to the backend.
pub struct SortEngine {
    exec: Dispatch,
    sequential_threshold: usize,
    aux: Mutex<AuxBuffer>,
}

impl SortEngine {
    /// Build an engine with its own worker threads.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let workers = config.resolved_workers()?;
        let exec = match config.backend {
            Backend::ForkJoin => Dispatch::ForkJoin(ForkJoin::new(workers)?),
            Backend::TaskQueue => {
                Dispatch::TaskQueue(TaskQueue::new(Arc::new(WorkerPool::new(workers)?)))
            }
        };
        debug!(
            "sort engine: {} backend, {} workers, threshold {}",
            config.backend, workers, config.sequential_threshold
        );
        Ok(SortEngine {
            exec,
            sequential_threshold: config.sequential_threshold,
            aux: Mutex::new(AuxBuffer::new()),
        })
    }

    /// Task-queue engine on a pool shared with other users.
    ///
    /// The pool's size is the worker count; `config.workers` and
    /// `config.backend` are ignored.
    pub fn with_pool(config: EngineConfig, pool: Arc<WorkerPool>) -> Self {
        debug!(
            "sort engine: task-queue backend on shared pool of {}, threshold {}",
            pool.size(),
            config.sequential_threshold
        );
        SortEngine {
            exec: Dispatch::TaskQueue(TaskQueue::new(pool)),
            sequential_threshold: config.sequential_threshold,
            aux: Mutex::new(AuxBuffer::new()),
        }
    }

    pub fn backend(&self) -> Backend {
        match self.exec {
            Dispatch::ForkJoin(_) => Backend::ForkJoin,
            Dispatch::TaskQueue(_) => Backend::TaskQueue,
        }
    }

    pub fn workers(&self) -> usize {
        self.exec.workers()
    }

    pub fn sequential_threshold(&self) -> usize {
        self.sequential_threshold
    }

    pub fn set_sequential_threshold(&mut self, threshold: usize) {
        self.sequential_threshold = threshold;
    }

    /// Bytes currently held by the auxiliary buffer. Never shrinks.
    pub fn aux_capacity_bytes(&self) -> usize {
        self.aux.lock().capacity_bytes()
    }

    /// Sort `data` ascending by key.
    ///
    /// Panics if `data` is longer than [`MAX_LEN`] or the auxiliary buffer
    /// cannot grow. A job panic on a worker is re-raised here.
    pub fn sort<T: Element>(&self, data: &mut [T], gather: Gather, algorithm: Algorithm) {
        let len = data.len();
        assert!(
            len <= MAX_LEN,
            "cannot sort {} elements: at most {} per call",
            len,
            MAX_LEN
        );

        let mut guard = self.aux.lock();
        let aux = guard.prepare::<T>(len);

        if len < self.sequential_threshold {
            debug!(
                "sequential {} sort of {} {:?} elements",
                algorithm,
                len,
                T::KIND
            );
            sort_range(data, algorithm, Some(aux));
            return;
        }

        debug!(
            "parallel sort of {} {:?} elements: {} gather, {} algorithm, {} backend",
            len,
            T::KIND,
            gather,
            algorithm,
            self.backend()
        );
        if let Err(e) = run_gather(data, aux, gather, algorithm, &self.exec) {
            warn!("sort of {} elements stopped early: {}", len, e);
        }
    }

    pub fn sort_i32(&self, data: &mut [i32], gather: Gather, algorithm: Algorithm) {
        self.sort(data, gather, algorithm);
    }

    pub fn sort_u32(&self, data: &mut [u32], gather: Gather, algorithm: Algorithm) {
        self.sort(data, gather, algorithm);
    }

    pub fn sort_indexed_i32(&self, data: &mut [IndexedI32], gather: Gather, algorithm: Algorithm) {
        self.sort(data, gather, algorithm);
    }

    pub fn sort_indexed_u32(&self, data: &mut [IndexedU32], gather: Gather, algorithm: Algorithm) {
        self.sort(data, gather, algorithm);
    }
}

/// One-shot parallel sort on rayon's global pool.
///
/// Always takes the parallel path. `scratch`, when at least `data.len()` long,
/// is used as the auxiliary buffer; otherwise one is allocated for the call.
pub fn par_sort<T: Element>(
    data: &mut [T],
    gather: Gather,
    algorithm: Algorithm,
    scratch: Option<&mut [T]>,
) {
    let n = data.len();
    if n < 2 {
        return;
    }
    assert!(
        n <= MAX_LEN,
        "cannot sort {} elements: at most {} per call",
        n,
        MAX_LEN
    );

    let mut owned: Vec<T>;
    let aux: &mut [T] = match (gather, scratch) {
        (Gather::Bucket, _) => Default::default(),
        (_, Some(s)) if s.len() >= n => &mut s[..n],
        _ => {
            owned = vec![T::zeroed(); n];
            &mut owned
        }
    };

    if let Err(e) = run_gather(data, aux, gather, algorithm, &ForkJoin::global()) {
        warn!("sort of {} elements stopped early: {}", n, e);
    }
}
