mod core;


pub use self::core::{Side, block_size, merge_runs};
