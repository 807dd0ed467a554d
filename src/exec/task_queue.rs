use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::trace;
use parking_lot::Mutex;

use crate::element::Element;

use super::pool::WorkerPool;
use super::queue::BlockingQueue;
use super::semaphore::Semaphore;
use super::work::{Executor, Interrupted, Job, Work};

/// Task-queue backend.
///
/// A phase pushes one `Job` per work item onto this backend's FIFO, posts the
/// same number of "run one job" tasks to the shared worker pool, then acquires
/// the semaphore once per posted task. That drain is the phase barrier.
///
/// Phases on one `TaskQueue` run one at a time: the queue and semaphore only
/// ever hold the jobs and tokens of the phase holding `phase`.
pub struct TaskQueue {
    pool: Arc<WorkerPool>,
    jobs: Arc<BlockingQueue<Job<'static>>>,
    done: Arc<Semaphore>,
    phase: Mutex<()>,
}

impl TaskQueue {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        TaskQueue {
            pool,
            jobs: Arc::new(BlockingQueue::new()),
            done: Arc::new(Semaphore::new(0)),
            phase: Mutex::new(()),
        }
    }

    pub fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        self.jobs.signal();
    }
}

/// Released exactly once, when the owning task finishes, panics, or is
/// dropped unexecuted by a pool shutdown.
struct Completion(Arc<Semaphore>);

impl Drop for Completion {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// Waits for `pending` completions on drop, then discards any job nobody
/// dequeued. Runs on unwind too, so no erased borrow outlives `run`.
struct Barrier<'q> {
    done: &'q Semaphore,
    jobs: &'q BlockingQueue<Job<'static>>,
    pending: usize,
}

impl Drop for Barrier<'_> {
    fn drop(&mut self) {
        for _ in 0..self.pending {
            self.done.acquire_uninterruptible();
        }
        self.jobs.clear();
    }
}

#[derive(Default)]
struct PhaseStatus {
    executed: AtomicUsize,
    panicked: AtomicBool,
}

fn run_one(jobs: &BlockingQueue<Job<'static>>, status: &PhaseStatus) {
    let Some(job) = jobs.dequeue() else {
        return;
    };
    match panic::catch_unwind(AssertUnwindSafe(|| job.run())) {
        Ok(()) => {
            status.executed.fetch_add(1, Ordering::Relaxed);
        }
        Err(_) => status.panicked.store(true, Ordering::Relaxed),
    }
}

impl Executor for TaskQueue {
    fn workers(&self) -> usize {
        self.pool.size()
    }

    fn run<'a, T: Element>(&self, jobs: Vec<Work<'a, T>>) -> Result<(), Interrupted> {
        let count = jobs.len();
        if count == 0 {
            return Ok(());
        }
        let _phase = self.phase.lock();
        trace!("task-queue phase: {} jobs", count);

        let status = Arc::new(PhaseStatus::default());
        {
            let mut barrier = Barrier {
                done: &self.done,
                jobs: &self.jobs,
                pending: 0,
            };

            for work in jobs {
                let job: Job<'a> = T::into_job(work);
                // SAFETY: the job only borrows. `barrier` keeps this function
                // from returning or unwinding past this scope until every task
                // posted below has run or been dropped, and then clears the
                // queue, so the borrow is never used after 'a ends. `_phase`
                // keeps every other phase off this queue until then.
                let job = unsafe { std::mem::transmute::<Job<'a>, Job<'static>>(job) };
                self.jobs.enqueue(job);
            }

            for _ in 0..count {
                let token = Completion(Arc::clone(&self.done));
                let jobs = Arc::clone(&self.jobs);
                let status = Arc::clone(&status);
                barrier.pending += 1;
                self.pool.post_task(move || {
                    let _token = token;
                    run_one(&jobs, &status);
                });
            }
        }

        if status.panicked.load(Ordering::Relaxed) {
            panic!("sort job panicked on a worker thread");
        }
        let executed = status.executed.load(Ordering::Relaxed);
        if executed < count {
            return Err(Interrupted {
                executed,
                total: count,
            });
        }
        Ok(())
    }
}
