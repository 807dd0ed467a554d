// Work items always cover at least one element, so `len` has no `is_empty`.
#![allow(clippy::len_without_is_empty)]

/// Use mimalloc as the global allocator for the library and the binary.
/// The Bucket gather and the text driver make many mid-sized allocations.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod bucket;
pub mod common;
pub mod element;
pub mod engine;
pub mod exec;
pub mod merge;
pub mod micro;
pub mod sort;

pub use element::{Element, IndexedElement, IndexedI32, IndexedU32, SortKey};
pub use engine::{
    Backend, DEFAULT_SEQUENTIAL_THRESHOLD, EngineConfig, EngineError, Gather, SortEngine, par_sort,
};
pub use micro::Algorithm;
