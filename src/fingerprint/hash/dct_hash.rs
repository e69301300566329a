use ndarray::{Array2, s};

use crate::fingerprint::hash::types::DctHash;

/// Side of the low-frequency block that becomes the hash
pub const HASH_BLOCK: usize = 8;

/// Thresholds the top-left 8×8 coefficients against their median.
///
/// A coefficient strictly above the median sets its bit; ties clear it.
///
/// # Panics
///
/// Panics if `coefficients` is smaller than 8×8.
pub fn encode_dct(coefficients: &Array2<f64>) -> DctHash {
    let (rows, cols) = coefficients.dim();
    assert!(
        rows >= HASH_BLOCK && cols >= HASH_BLOCK,
        "DCT output {rows}x{cols} is smaller than the {HASH_BLOCK}x{HASH_BLOCK} hash block"
    );

    let block: Vec<f64> = coefficients
        .slice(s![..HASH_BLOCK, ..HASH_BLOCK])
        .iter()
        .copied()
        .collect();
    let median = median(&block);

    let bits = block
        .iter()
        .fold(0u64, |acc, &value| (acc << 1) | u64::from(value > median));

    DctHash::from_bits(bits)
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
