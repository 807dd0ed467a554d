/// Element types the engine can sort.
///
/// Keys are 32-bit integers, signed or unsigned. An indexed element pairs a key
/// with an opaque 32-bit payload; the pair is one `Copy` value, so every move the
/// engine makes carries both fields together.
use std::fmt::Debug;

use bytemuck::{Pod, Zeroable};

use crate::exec::{Job, Work};

mod sealed {
    pub trait Sealed {}
}

/// 32-bit integer key.
pub trait SortKey: Copy + Ord + Debug + Send + Sync + 'static + sealed::Sealed {
    /// Smallest key, widened to 64 bits.
    const MIN: i64;
    /// Largest key, widened to 64 bits.
    const MAX: i64;

    fn to_i64(self) -> i64;

    /// Map the key to a `u32` whose unsigned order matches the key order.
    /// Radix passes work on these bits.
    fn radix_bits(self) -> u32;
}

impl sealed::Sealed for i32 {}
impl sealed::Sealed for u32 {}

impl SortKey for i32 {
    const MIN: i64 = i32::MIN as i64;
    const MAX: i64 = i32::MAX as i64;

    #[inline]
    fn to_i64(self) -> i64 {
        self as i64
    }

    #[inline]
    fn radix_bits(self) -> u32 {
        // Flip the sign bit: i32::MIN -> 0, -1 -> 0x7FFF_FFFF, 0 -> 0x8000_0000
        (self as u32) ^ 0x8000_0000
    }
}

impl SortKey for u32 {
    const MIN: i64 = u32::MIN as i64;
    const MAX: i64 = u32::MAX as i64;

    #[inline]
    fn to_i64(self) -> i64 {
        self as i64
    }

    #[inline]
    fn radix_bits(self) -> u32 {
        self
    }
}

/// Which concrete element type a job carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Int32,
    UInt32,
    IndexedInt32,
    IndexedUInt32,
}

/// A sortable element: a plain key or a key with a payload.
///
/// Elements are `Pod` so the engine's byte-sized scratch buffer can be viewed as
/// a slice of any of them.
pub trait Element: Pod + Debug + Send + Sync + sealed::Sealed {
    type Key: SortKey;

    const KIND: DataKind;

    fn key(&self) -> Self::Key;

    /// Wrap a typed work item in the type-tagged job the task queue carries.
    fn into_job(work: Work<'_, Self>) -> Job<'_>;
}

impl Element for i32 {
    type Key = i32;
    const KIND: DataKind = DataKind::Int32;

    #[inline]
    fn key(&self) -> i32 {
        *self
    }

    fn into_job(work: Work<'_, Self>) -> Job<'_> {
        Job::Int32(work)
    }
}

impl Element for u32 {
    type Key = u32;
    const KIND: DataKind = DataKind::UInt32;

    #[inline]
    fn key(&self) -> u32 {
        *self
    }

    fn into_job(work: Work<'_, Self>) -> Job<'_> {
        Job::UInt32(work)
    }
}

/// Key with a 32-bit payload that travels with it.
///
/// Sorting compares `key` only. Equality (`==`) compares both fields, which is
/// what pair-integrity checks want.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndexedElement<K> {
    pub key: K,
    pub payload: u32,
}

pub type IndexedI32 = IndexedElement<i32>;
pub type IndexedU32 = IndexedElement<u32>;

impl<K> IndexedElement<K> {
    #[inline]
    pub const fn new(key: K, payload: u32) -> Self {
        IndexedElement { key, payload }
    }
}

// SAFETY: repr(C) with two 4-byte integer fields: no padding, every bit
// pattern valid, all-zero valid.
unsafe impl Zeroable for IndexedI32 {}
unsafe impl Pod for IndexedI32 {}
unsafe impl Zeroable for IndexedU32 {}
unsafe impl Pod for IndexedU32 {}

impl sealed::Sealed for IndexedI32 {}
impl sealed::Sealed for IndexedU32 {}

impl Element for IndexedI32 {
    type Key = i32;
    const KIND: DataKind = DataKind::IndexedInt32;

    #[inline]
    fn key(&self) -> i32 {
        self.key
    }

    fn into_job(work: Work<'_, Self>) -> Job<'_> {
        Job::IndexedInt32(work)
    }
}

impl Element for IndexedU32 {
    type Key = u32;
    const KIND: DataKind = DataKind::IndexedUInt32;

    #[inline]
    fn key(&self) -> u32 {
        self.key
    }

    fn into_job(work: Work<'_, Self>) -> Job<'_> {
        Job::IndexedUInt32(work)
    }
}
