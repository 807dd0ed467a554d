mod core;


pub use self::core::{DataKind, Element, IndexedElement, IndexedI32, IndexedU32, SortKey};
