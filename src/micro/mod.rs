mod core;
mod radix;

#[cfg(test)]
mod tests;

pub use self::core::{Algorithm, sort_range};
pub use self::radix::radix_sort;
