use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::engine::EngineError;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Hardware thread count, falling back to 1 when it cannot be queried.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fixed-size pool of OS threads consuming posted tasks in FIFO order.
///
/// `post_task` gives no completion signal; callers track completion themselves.
/// After `shutdown` (or drop) tasks still queued are dropped without running.
pub struct WorkerPool {
    sender: Mutex<Option<Sender<Task>>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    interrupted: Arc<AtomicBool>,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidWorkerCount);
        }

        let (tx, rx) = crossbeam_channel::unbounded::<Task>();
        let interrupted = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::with_capacity(size);
        for i in 0..size {
            let rx = rx.clone();
            let interrupted = Arc::clone(&interrupted);
            let handle = thread::Builder::new()
                .name(format!("hybridsort-worker-{}", i))
                .spawn(move || worker_loop(rx, interrupted))
                .map_err(EngineError::Spawn)?;
            handles.push(handle);
        }

        info!("worker pool started with {} threads", size);
        Ok(WorkerPool {
            sender: Mutex::new(Some(tx)),
            handles: Mutex::new(handles),
            interrupted,
            size,
        })
    }

    /// One thread per hardware thread.
    pub fn with_available_parallelism() -> Result<Self, EngineError> {
        Self::new(available_workers())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }

    pub fn post_task<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.lock();
        match sender.as_ref() {
            Some(tx) => {
                // Err only when every worker has exited; the task is dropped with it.
                if tx.send(Box::new(task)).is_err() {
                    debug!("task dropped: no worker threads left");
                }
            }
            None => debug!("task dropped: worker pool is shut down"),
        }
    }

    /// Interrupt the workers and wait for them to exit.
    ///
    /// A task already running finishes; queued tasks are dropped. Idempotent.
    pub fn shutdown(&self) {
        self.interrupted.store(true, Ordering::Release);
        let Some(sender) = self.sender.lock().take() else {
            return;
        };
        drop(sender);

        let handles = std::mem::take(&mut *self.handles.lock());
        let current = thread::current().id();
        for handle in handles {
            // A task may drop the last reference to the pool from a worker thread
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                warn!("worker thread exited with a panic");
            }
        }
        info!("worker pool stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(rx: Receiver<Task>, interrupted: Arc<AtomicBool>) {
    // Runs until the sender is gone and the channel is drained.
    while let Ok(task) = rx.recv() {
        if interrupted.load(Ordering::Acquire) {
            drop(task);
            continue;
        }
        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            error!("task panicked on a worker thread");
        }
    }
}
