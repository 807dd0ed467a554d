use std::fmt;
use std::str::FromStr;

use crate::element::Element;

use super::radix::radix_sort;

/// Base sort applied to each bucket, block, or to the whole array below the
/// parallel threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Order-based stable sort by key. Equal keys keep their input order, which
    /// the Merge gather relies on for its blocks.
    Comparison,
    /// LSD radix sort on the key bits; may use caller scratch.
    #[default]
    RadixCounting,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Comparison => "comparison",
            Algorithm::RadixCounting => "radix",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "comparison" | "std" => Ok(Algorithm::Comparison),
            "radix" | "radix-counting" => Ok(Algorithm::RadixCounting),
            _ => Err(format!("invalid algorithm '{}'", s)),
        }
    }
}

/// Sort a contiguous range ascending by key, in place.
///
/// `scratch` is only used by the radix path; when it is missing or shorter than
/// `data`, the radix sort allocates its own. Ranges of zero or one element are
/// left untouched.
#[inline]
pub fn sort_range<T: Element>(data: &mut [T], algorithm: Algorithm, scratch: Option<&mut [T]>) {
    if data.len() < 2 {
        return;
    }
    match algorithm {
        Algorithm::Comparison => data.sort_by_key(|e| e.key()),
        Algorithm::RadixCounting => radix_sort(data, scratch),
    }
}
