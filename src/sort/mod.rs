pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use self::core::*;
pub use self::parse::*;
