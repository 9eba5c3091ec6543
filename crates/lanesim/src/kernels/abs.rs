//! Absolute value kernel.
//!
//! `output[i] = |values[i]|` for `i` in `[0, n)`.
//!
//! - `fn abs_scalar(...)`: element-by-element reference (gold)
//! - `fn abs_vector(...)`: `VECTOR_WIDTH` chunks with a masked tail

use crate::vector::{VECTOR_WIDTH, VectorIsa};

// ────────────────────────────────────────────────────────────────────────────
// Scalar implementation
// ────────────────────────────────────────────────────────────────────────────

/// Absolute value (scalar reference).
///
/// # Panics
/// Panics if either slice is shorter than `n`.
pub fn abs_scalar(values: &[f32], output: &mut [f32], n: usize) {
    assert!(values.len() >= n, "values shorter than n");
    assert!(output.len() >= n, "output shorter than n");
    for (x, y) in values[..n].iter().zip(output[..n].iter_mut()) {
        *y = x.abs();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Vector implementation
// ────────────────────────────────────────────────────────────────────────────

/// Absolute value over the vector unit.
///
/// Full chunks run with every lane active; the last chunk runs with only
/// the first `n % VECTOR_WIDTH` lanes, so nothing at or beyond `n` is read
/// or written.
///
/// # Panics
/// Panics if either slice is shorter than `n`.
pub fn abs_vector<V: VectorIsa>(unit: &mut V, values: &[f32], output: &mut [f32], n: usize) {
    assert!(values.len() >= n, "values shorter than n");
    assert!(output.len() >= n, "output shorter than n");
    for i in (0..n).step_by(VECTOR_WIDTH) {
        let lanes = unit.first_lanes(n - i);
        let x = unit.load_f32(&values[i..], lanes);
        let y = unit.abs_f32(x, lanes);
        unit.store_f32(&mut output[i..], y, lanes);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
