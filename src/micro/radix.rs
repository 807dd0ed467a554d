//! LSD radix sort over the 32 key bits.
//!
//! Four 8-bit passes, ping-ponging between the range and a scratch slice of the
//! same length. Histograms for all four digits are built in one read of the
//! input, and a pass whose digit is the same for every element is skipped.

use crate::element::{Element, SortKey};

const RADIX: usize = 256;
const PASSES: usize = 4;

/// Below this length a stable insertion sort beats four histogram passes.
const INSERTION_THRESHOLD: usize = 64;

/// Sort `data` ascending by key.
///
/// Uses `scratch` as the ping-pong buffer when it holds at least `data.len()`
/// elements, otherwise allocates one. Stable.
pub fn radix_sort<T: Element>(data: &mut [T], scratch: Option<&mut [T]>) {
    let n = data.len();
    if n < 2 {
        return;
    }
    if n < INSERTION_THRESHOLD {
        insertion_sort(data);
        return;
    }

    let mut owned: Vec<T>;
    let scratch: &mut [T] = match scratch {
        Some(s) if s.len() >= n => &mut s[..n],
        _ => {
            owned = vec![T::zeroed(); n];
            &mut owned
        }
    };

    let histograms = build_histograms(data);

    // true while the current pass input is `data`
    let mut in_data = true;
    for (pass, counts) in histograms.iter().enumerate() {
        let digit = digit_of(data[0].key().radix_bits(), pass);
        // All elements share this digit (the first element's digit is the same
        // in either buffer): nothing to reorder.
        if counts[digit] == n {
            continue;
        }

        let mut offsets = *counts;
        let mut acc = 0usize;
        for o in offsets.iter_mut() {
            let c = *o;
            *o = acc;
            acc += c;
        }

        if in_data {
            scatter_pass(data, scratch, pass, &mut offsets);
        } else {
            scatter_pass(scratch, data, pass, &mut offsets);
        }
        in_data = !in_data;
    }

    if !in_data {
        data.copy_from_slice(scratch);
    }
}

#[inline(always)]
fn digit_of(bits: u32, pass: usize) -> usize {
    ((bits >> (pass * 8)) & 0xFF) as usize
}

fn build_histograms<T: Element>(data: &[T]) -> [[usize; RADIX]; PASSES] {
    let mut histograms = [[0usize; RADIX]; PASSES];
    for e in data {
        let bits = e.key().radix_bits();
        histograms[0][digit_of(bits, 0)] += 1;
        histograms[1][digit_of(bits, 1)] += 1;
        histograms[2][digit_of(bits, 2)] += 1;
        histograms[3][digit_of(bits, 3)] += 1;
    }
    histograms
}

#[inline]
fn scatter_pass<T: Element>(src: &[T], dst: &mut [T], pass: usize, offsets: &mut [usize; RADIX]) {
    for &e in src {
        let d = digit_of(e.key().radix_bits(), pass);
        dst[offsets[d]] = e;
        offsets[d] += 1;
    }
}

fn insertion_sort<T: Element>(data: &mut [T]) {
    for i in 1..data.len() {
        let cur = data[i];
        let key = cur.key();
        let mut j = i;
        while j > 0 && data[j - 1].key() > key {
            data[j] = data[j - 1];
            j -= 1;
        }
        data[j] = cur;
    }
}
