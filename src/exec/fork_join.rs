use rayon::prelude::*;

use crate::element::Element;
use crate::engine::EngineError;

use super::work::{Executor, Interrupted, Work};

/// Fork-join backend: each phase is one rayon parallel loop.
///
/// The loop's implicit join is the phase barrier; this backend builds no
/// synchronization of its own.
#[derive(Debug)]
pub struct ForkJoin {
    /// `None` runs on rayon's global pool.
    pool: Option<rayon::ThreadPool>,
    workers: usize,
}

impl ForkJoin {
    /// Private rayon pool with exactly `workers` threads.
    pub fn new(workers: usize) -> Result<Self, EngineError> {
        if workers == 0 {
            return Err(EngineError::InvalidWorkerCount);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hybridsort-fj-{}", i))
            .build()?;
        Ok(ForkJoin {
            pool: Some(pool),
            workers,
        })
    }

    /// Run on rayon's global pool.
    pub fn global() -> Self {
        ForkJoin {
            pool: None,
            workers: rayon::current_num_threads().max(1),
        }
    }
}

impl Executor for ForkJoin {
    fn workers(&self) -> usize {
        self.workers
    }

    fn run<'a, T: Element>(&self, jobs: Vec<Work<'a, T>>) -> Result<(), Interrupted> {
        if jobs.is_empty() {
            return Ok(());
        }
        log::trace!("fork-join phase: {} jobs", jobs.len());
        let phase = move || jobs.into_par_iter().for_each(Work::run);
        match &self.pool {
            Some(pool) => pool.install(phase),
            None => phase(),
        }
        Ok(())
    }
}
