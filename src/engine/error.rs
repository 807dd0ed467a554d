use thiserror::Error;

/// Failures while building an engine or its worker threads.
///
/// Sorting itself has no error path: violated preconditions panic.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("failed to build fork-join thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}
