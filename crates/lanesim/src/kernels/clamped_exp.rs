//! Clamped exponentiation kernel.
//!
//! `output[i] = min(values[i]^exponents[i], CLAMP_CEILING)` computed by
//! repeated multiplication that stops the moment the running product
//! exceeds the ceiling.
//!
//! - `fn clamped_exp_scalar(...)`: per-element loop with early exit (gold)
//! - `fn clamped_exp_vector(...)`: per-lane active masks; lanes drop out
//!   when their count is exhausted or they saturate

use super::CLAMP_CEILING;
use crate::vector::{VECTOR_WIDTH, VectorIsa};

// ────────────────────────────────────────────────────────────────────────────
// Scalar implementation
// ────────────────────────────────────────────────────────────────────────────

/// `base^exponent` by iterated multiplication, saturating at
/// [`CLAMP_CEILING`]. A non-positive exponent yields exactly `1.0`.
#[inline]
pub fn clamped_pow(base: f32, exponent: i32) -> f32 {
    let mut acc = 1.0f32;
    for _ in 0..exponent {
        acc *= base;
        if acc > CLAMP_CEILING {
            acc = CLAMP_CEILING;
            break;
        }
    }
    acc
}

/// Clamped exponentiation (scalar reference).
///
/// # Panics
/// Panics if any slice is shorter than `n`.
pub fn clamped_exp_scalar(values: &[f32], exponents: &[i32], output: &mut [f32], n: usize) {
    assert!(values.len() >= n, "values shorter than n");
    assert!(exponents.len() >= n, "exponents shorter than n");
    assert!(output.len() >= n, "output shorter than n");
    for i in 0..n {
        output[i] = clamped_pow(values[i], exponents[i]);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Vector implementation
// ────────────────────────────────────────────────────────────────────────────

/// Clamped exponentiation over the vector unit.
///
/// Per chunk, `active` marks lanes that still multiply. Every round each
/// active lane multiplies once, is clamped if it crossed the ceiling, and
/// leaves `active` when it crossed or ran out of exponent. The chunk is done
/// when no lane is active, i.e. after at most the chunk's largest exponent
/// rounds.
///
/// # Panics
/// Panics if any slice is shorter than `n`.
pub fn clamped_exp_vector<V: VectorIsa>(
    unit: &mut V,
    values: &[f32],
    exponents: &[i32],
    output: &mut [f32],
    n: usize,
) {
    assert!(values.len() >= n, "values shorter than n");
    assert!(exponents.len() >= n, "exponents shorter than n");
    assert!(output.len() >= n, "output shorter than n");

    for i in (0..n).step_by(VECTOR_WIDTH) {
        let lanes = unit.first_lanes(n - i);
        let zeros = unit.broadcast_i32(0, lanes);
        let ones = unit.broadcast_i32(1, lanes);
        let ceiling = unit.broadcast_f32(CLAMP_CEILING, lanes);

        let x = unit.load_f32(&values[i..], lanes);
        let mut count = unit.load_i32(&exponents[i..], lanes);
        let mut result = unit.broadcast_f32(1.0, lanes);
        let mut active = unit.gt_i32(count, zeros, lanes);

        while unit.count_active(active) > 0 {
            let product = unit.mul_f32(result, x, active);
            result = unit.select_f32(active, product, result);

            let over = unit.gt_f32(result, ceiling, active);
            result = unit.select_f32(over, ceiling, result);

            count = unit.sub_i32(count, ones, active);
            let remaining = unit.gt_i32(count, zeros, active);
            let below = unit.mask_not(over);
            active = unit.mask_and(remaining, below);
        }

        unit.store_f32(&mut output[i..], result, lanes);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
