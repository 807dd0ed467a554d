use std::fmt;
use std::str::FromStr;

use super::error::EngineError;
use crate::exec::available_workers;

/// Arrays shorter than this are sorted on the calling thread.
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 64 * 1024;

/// Top-level partitioning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gather {
    /// 128 growable per-bucket vectors, each sorted then copied back.
    Bucket,
    /// Counting scatter into the auxiliary buffer, then per-bucket sort.
    #[default]
    Counting,
    /// Sort blocks, then bottom-up pairwise merge. Stable.
    Merge,
}

impl Gather {
    pub fn name(self) -> &'static str {
        match self {
            Gather::Bucket => "bucket",
            Gather::Counting => "counting",
            Gather::Merge => "merge",
        }
    }
}

impl fmt::Display for Gather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "bucket" => Ok(Gather::Bucket),
            "counting" => Ok(Gather::Counting),
            "merge" => Ok(Gather::Merge),
            _ => Err(format!("invalid gather strategy '{}'", s)),
        }
    }
}

/// How parallel phases are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// rayon parallel loops with implicit join.
    #[default]
    ForkJoin,
    /// Job FIFO + worker pool + semaphore barrier.
    TaskQueue,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::ForkJoin => "fork-join",
            Backend::TaskQueue => "task-queue",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "fork-join" | "forkjoin" | "rayon" => Ok(Backend::ForkJoin),
            "task-queue" | "taskqueue" | "pool" => Ok(Backend::TaskQueue),
            _ => Err(format!("invalid backend '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Worker threads; `None` means one per hardware thread.
    pub workers: Option<usize>,
    pub sequential_threshold: usize,
    pub backend: Backend,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            workers: None,
            sequential_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
            backend: Backend::default(),
        }
    }
}

impl EngineConfig {
    pub fn resolved_workers(&self) -> Result<usize, EngineError> {
        match self.workers {
            Some(0) => Err(EngineError::InvalidWorkerCount),
            Some(n) => Ok(n),
            None => Ok(available_workers()),
        }
    }
}
