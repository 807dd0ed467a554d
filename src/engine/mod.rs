mod buffer;
mod config;
mod core;
mod error;
mod gather;


pub use self::buffer::AuxBuffer;
pub use self::config::{Backend, DEFAULT_SEQUENTIAL_THRESHOLD, EngineConfig, Gather};
pub use self::core::{MAX_LEN, SortEngine, par_sort};
pub use self::error::EngineError;
