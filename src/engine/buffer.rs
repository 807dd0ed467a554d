use bytemuck::Pod;

/// Grow-only scratch storage shared by every call on one engine.
///
/// Backed by 8-byte words so it can be viewed as a slice of any element type
/// (all of them are 4 or 8 bytes). Freed only when the engine is dropped.
#[derive(Debug, Default)]
pub struct AuxBuffer {
    words: Vec<u64>,
}

impl AuxBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    /// Grow to hold `len` elements of `T` and return exactly that many.
    ///
    /// Contents are whatever earlier calls left behind. Panics when the
    /// allocation fails: no sort can proceed without scratch.
    pub fn prepare<T: Pod>(&mut self, len: usize) -> &mut [T] {
        let bytes = len
            .checked_mul(std::mem::size_of::<T>())
            .unwrap_or_else(|| panic!("auxiliary buffer size overflows for {} elements", len));
        let words = bytes.div_ceil(std::mem::size_of::<u64>());

        if self.words.len() < words {
            let extra = words - self.words.len();
            if let Err(e) = self.words.try_reserve_exact(extra) {
                panic!("failed to grow auxiliary buffer to {} bytes: {}", bytes, e);
            }
            self.words.resize(words, 0);
        }

        &mut bytemuck::cast_slice_mut::<u64, T>(&mut self.words)[..len]
    }
}
