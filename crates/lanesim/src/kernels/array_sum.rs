//! Array sum reduction kernel.
//!
//! - `fn array_sum_scalar(...)`: left-to-right accumulation (gold)
//! - `fn array_sum_vector(...)`: `VECTOR_WIDTH` partial sums, collapsed by
//!   `log2(VECTOR_WIDTH)` rounds of horizontal add + interleave
//!
//! The two forms associate the additions differently, so results agree only
//! up to rounding; compare with [`SUM_EPSILON_PER_ELEMENT`] per element.

use crate::vector::{VECTOR_WIDTH, VectorIsa};

/// Allowed reassociation error per summed element.
pub const SUM_EPSILON_PER_ELEMENT: f32 = 1e-4;

/// Sum of `values[..n]` (scalar reference).
///
/// # Panics
/// Panics if `values.len() < n`.
pub fn array_sum_scalar(values: &[f32], n: usize) -> f32 {
    assert!(values.len() >= n, "values shorter than n");
    let mut sum = 0.0f32;
    for &x in &values[..n] {
        sum += x;
    }
    sum
}

/// Sum of `values[..n]` over the vector unit.
///
/// # Panics
/// Panics if `values.len() < n`.
pub fn array_sum_vector<V: VectorIsa>(unit: &mut V, values: &[f32], n: usize) -> f32 {
    assert!(values.len() >= n, "values shorter than n");

    let all = unit.first_lanes(VECTOR_WIDTH);
    let mut partial = unit.broadcast_f32(0.0, all);
    for i in (0..n).step_by(VECTOR_WIDTH) {
        let lanes = unit.first_lanes(n - i);
        let x = unit.load_f32(&values[i..], lanes);
        let sum = unit.add_f32(partial, x, lanes);
        partial = unit.select_f32(lanes, sum, partial);
    }

    let mut width = VECTOR_WIDTH;
    while width > 1 {
        partial = unit.hadd_f32(partial);
        partial = unit.interleave_f32(partial);
        width /= 2;
    }
    partial[0]
}

/// Tolerance for comparing the two sums of `n` elements.
#[allow(clippy::cast_precision_loss)]
pub fn sum_tolerance(n: usize) -> f32 {
    n as f32 * SUM_EPSILON_PER_ELEMENT
}
