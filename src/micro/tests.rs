use super::*;
use crate::element::{IndexedI32, IndexedU32};

fn lcg(seed: &mut u64) -> u32 {
    *seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    (*seed >> 32) as u32
}

#[test]
fn test_sort_range_signed_both_algorithms() {
    for algorithm in [Algorithm::Comparison, Algorithm::RadixCounting] {
        let mut data = vec![5, -3, 0, 2, -3, 100];
        sort_range(&mut data, algorithm, None);
        assert_eq!(data, vec![-3, -3, 0, 2, 5, 100], "{}", algorithm);
    }
}

#[test]
fn test_sort_range_empty_and_single() {
    let mut empty: Vec<u32> = vec![];
    sort_range(&mut empty, Algorithm::RadixCounting, None);
    assert!(empty.is_empty());

    let mut one = vec![7u32];
    sort_range(&mut one, Algorithm::Comparison, None);
    assert_eq!(one, vec![7]);
}

#[test]
fn test_radix_large_signed_matches_std() {
    let mut seed = 1u64;
    let mut data: Vec<i32> = (0..10_000).map(|_| lcg(&mut seed) as i32).collect();
    let mut expected = data.clone();
    expected.sort_unstable();
    let mut scratch = vec![0i32; data.len()];
    radix_sort(&mut data, Some(&mut scratch));
    assert_eq!(data, expected);
}

#[test]
fn test_radix_extremes() {
    let mut data: Vec<i32> = vec![i32::MAX, 0, i32::MIN, -1, 1, i32::MIN, i32::MAX];
    data.extend((0..100).map(|i| if i % 2 == 0 { i32::MIN + i } else { i32::MAX - i }));
    let mut expected = data.clone();
    expected.sort_unstable();
    radix_sort(&mut data, None);
    assert_eq!(data, expected);
}

#[test]
fn test_radix_unsigned_high_bit() {
    let mut data: Vec<u32> = (0..500u32).map(|i| i.rotate_right(3) ^ 0x8000_0000).collect();
    let mut expected = data.clone();
    expected.sort_unstable();
    radix_sort(&mut data, None);
    assert_eq!(data, expected);
}

#[test]
fn test_radix_short_scratch_is_ignored() {
    let mut data: Vec<u32> = (0..1000u32).rev().collect();
    let mut scratch = vec![0u32; 10];
    radix_sort(&mut data, Some(&mut scratch));
    assert!(data.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_radix_skips_constant_digits() {
    // Only the lowest byte varies, so a single pass runs and the result must be
    // copied back from scratch.
    let mut data: Vec<u32> = (0..300u32).map(|i| 0xABCD_EF00 | (255 - (i % 256))).collect();
    let mut expected = data.clone();
    expected.sort_unstable();
    let mut scratch = vec![0u32; data.len()];
    radix_sort(&mut data, Some(&mut scratch));
    assert_eq!(data, expected);
}

#[test]
fn test_radix_all_equal() {
    let mut data = vec![42i32; 1000];
    radix_sort(&mut data, None);
    assert!(data.iter().all(|&x| x == 42));
}

#[test]
fn test_radix_indexed_is_stable() {
    let mut seed = 7u64;
    let mut data: Vec<IndexedU32> = (0..5000u32)
        .map(|i| IndexedU32::new(lcg(&mut seed) % 50, i))
        .collect();
    radix_sort(&mut data, None);
    for w in data.windows(2) {
        assert!(w[0].key <= w[1].key);
        if w[0].key == w[1].key {
            assert!(w[0].payload < w[1].payload);
        }
    }
}

#[test]
fn test_comparison_indexed_is_stable() {
    let mut data: Vec<IndexedI32> = (0..20_000u32)
        .map(|i| IndexedI32::new((i.wrapping_mul(2_654_435_761) % 7) as i32, i))
        .collect();
    let mut expected = data.clone();
    expected.sort_by_key(|p| p.key);
    sort_range(&mut data, Algorithm::Comparison, None);
    assert_eq!(data, expected);
}

#[test]
fn test_insertion_path_indexed_signed() {
    let mut data = vec![
        IndexedI32::new(3, 0),
        IndexedI32::new(-1, 1),
        IndexedI32::new(3, 2),
        IndexedI32::new(i32::MIN, 3),
    ];
    radix_sort(&mut data, None);
    let payloads: Vec<u32> = data.iter().map(|e| e.payload).collect();
    assert_eq!(payloads, vec![3, 1, 0, 2]);
}

#[test]
fn test_comparison_indexed_keeps_pairs() {
    let mut data: Vec<IndexedI32> = (0..200).map(|i| IndexedI32::new(100 - i, i as u32)).collect();
    sort_range(&mut data, Algorithm::Comparison, None);
    for e in &data {
        assert_eq!(e.key, 100 - e.payload as i32);
    }
    assert!(data.windows(2).all(|w| w[0].key <= w[1].key));
}

#[test]
fn test_algorithm_parse() {
    assert_eq!("comparison".parse::<Algorithm>().unwrap(), Algorithm::Comparison);
    assert_eq!("radix".parse::<Algorithm>().unwrap(), Algorithm::RadixCounting);
    assert!("bogo".parse::<Algorithm>().is_err());
    assert_eq!(Algorithm::default(), Algorithm::RadixCounting);
}
