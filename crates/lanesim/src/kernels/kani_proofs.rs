//! Kani bounded proof harnesses for the kernel invariants.
//!
//! All code here is behind `#[cfg(kani)]` and invisible to normal builds.

use super::abs::{abs_scalar, abs_vector};
use super::clamped_exp::{clamped_exp_scalar, clamped_exp_vector, clamped_pow};
use super::{CLAMP_CEILING, EXP_MAX};
use crate::vector::{SimulatedUnit, VECTOR_WIDTH};

/// A zero exponent yields exactly 1.0 for every base, NaN included.
#[kani::proof]
fn verify_zero_exponent_identity() {
    let base: f32 = kani::any();
    assert!(clamped_pow(base, 0) == 1.0);
}

/// The result never exceeds the ceiling for finite bases.
#[kani::proof]
#[kani::unwind(11)]
fn verify_result_bounded_by_ceiling() {
    let base: f32 = kani::any();
    let exponent: i32 = kani::any();
    kani::assume(base.is_finite());
    kani::assume((0..EXP_MAX).contains(&exponent));
    let r = clamped_pow(base, exponent);
    assert!(r <= CLAMP_CEILING || r.is_nan());
}

/// Scalar and vector forms agree bit for bit on one chunk plus a tail lane.
#[kani::proof]
#[kani::unwind(11)]
fn verify_clamped_exp_vector_parity() {
    const N: usize = VECTOR_WIDTH + 1;
    let values: [f32; N] = kani::any();
    let exponents: [i32; N] = kani::any();
    for i in 0..N {
        kani::assume(values[i] >= -1.0 && values[i] < 3.0);
        kani::assume((0..EXP_MAX).contains(&exponents[i]));
    }
    let mut gold = [0.0f32; N + VECTOR_WIDTH];
    let mut output = [0.0f32; N + VECTOR_WIDTH];
    clamped_exp_scalar(&values, &exponents, &mut gold, N);
    clamped_exp_vector(
        &mut SimulatedUnit::unobserved(),
        &values,
        &exponents,
        &mut output,
        N,
    );
    for i in 0..N + VECTOR_WIDTH {
        assert!(gold[i].to_bits() == output[i].to_bits());
    }
}

/// The vectorized absolute value never writes a guard slot.
#[kani::proof]
#[kani::unwind(9)]
fn verify_abs_vector_guard_slots() {
    const N: usize = VECTOR_WIDTH + 1;
    let values: [f32; N + VECTOR_WIDTH] = kani::any();
    let mut gold = [0.0f32; N + VECTOR_WIDTH];
    let mut output = [0.0f32; N + VECTOR_WIDTH];
    abs_scalar(&values, &mut gold, N);
    abs_vector(&mut SimulatedUnit::unobserved(), &values, &mut output, N);
    for i in N..N + VECTOR_WIDTH {
        assert!(output[i] == 0.0);
    }
}
