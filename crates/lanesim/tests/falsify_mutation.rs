//! Mutation detection tests.
//!
//! Each test runs a deliberately broken vector kernel, written inline against
//! the same `VectorIsa` contract, and checks that verification catches it.

mod common;

use lanesim::kernels::CLAMP_CEILING;
use lanesim::kernels::abs::abs_scalar;
use lanesim::kernels::array_sum::{array_sum_scalar, sum_tolerance};
use lanesim::kernels::clamped_exp::clamped_exp_scalar;
use lanesim::vector::{Mask, SimulatedUnit, VECTOR_WIDTH, VectorIsa};
use lanesim::verify::{Diagnosis, verify_sum};
use lanesim::workload::Workload;

/// Mutation (abs): every chunk runs with all lanes active, so the last
/// chunk spills into the guard slots.
#[test]
fn mutation_abs_detect_unmasked_tail() {
    let n = 2 * VECTOR_WIDTH + 1;
    let mut w = common::seeded(n, 17);
    // Guard values are zero, so make them visible to a spilling kernel.
    for slot in &mut w.values[n..] {
        *slot = -1.0;
    }
    abs_scalar(&w.values, &mut w.gold, n);

    let mut unit = SimulatedUnit::unobserved();
    for i in (0..n).step_by(VECTOR_WIDTH) {
        let x = unit.load_f32(&w.values[i..], Mask::all());
        let y = unit.abs_f32(x, Mask::all());
        unit.store_f32(&mut w.output[i..], y, Mask::all());
    }

    let verdict = w.verify();
    let mismatch = verdict.mismatch().expect("spill must be detected");
    assert_eq!(mismatch.index, n);
    assert!(mismatch.is_out_of_bounds());
    assert_eq!(mismatch.diagnoses, vec![Diagnosis::Mismatch, Diagnosis::OutOfBounds]);
    assert!(mismatch.format_text().contains("You have written to out of bound value!"));
}

/// Mutation (abs): the tail chunk is skipped entirely.
#[test]
fn mutation_abs_detect_dropped_tail() {
    let n = VECTOR_WIDTH + 2;
    let mut w = Workload::from_parts(vec![-1.0; n], vec![0; n]);
    abs_scalar(&w.values, &mut w.gold, n);

    let mut unit = SimulatedUnit::unobserved();
    for i in (0..n / VECTOR_WIDTH * VECTOR_WIDTH).step_by(VECTOR_WIDTH) {
        let x = unit.load_f32(&w.values[i..], Mask::all());
        let y = unit.abs_f32(x, Mask::all());
        unit.store_f32(&mut w.output[i..], y, Mask::all());
    }

    let mismatch = w.verify().mismatch().cloned().expect("dropped tail must be detected");
    assert_eq!(mismatch.index, VECTOR_WIDTH);
    assert!(!mismatch.is_out_of_bounds());
}

/// Mutation (clamped exp): products are never clamped.
#[test]
fn mutation_clamped_exp_detect_missing_clamp() {
    let values = vec![3.0, 2.0, 0.5, 2.5];
    let exponents = vec![4, 2, 3, 9];
    let mut w = Workload::from_parts(values, exponents);
    let n = w.len();
    clamped_exp_scalar(&w.values, &w.exponents, &mut w.gold, n);

    let mut unit = SimulatedUnit::unobserved();
    for i in (0..n).step_by(VECTOR_WIDTH) {
        let lanes = unit.first_lanes(n - i);
        let zeros = unit.broadcast_i32(0, lanes);
        let ones = unit.broadcast_i32(1, lanes);
        let x = unit.load_f32(&w.values[i..], lanes);
        let mut count = unit.load_i32(&w.exponents[i..], lanes);
        let mut result = unit.broadcast_f32(1.0, lanes);
        let mut active = unit.gt_i32(count, zeros, lanes);
        while unit.count_active(active) > 0 {
            let product = unit.mul_f32(result, x, active);
            result = unit.select_f32(active, product, result);
            count = unit.sub_i32(count, ones, active);
            active = unit.gt_i32(count, zeros, active);
        }
        unit.store_f32(&mut w.output[i..], result, lanes);
    }

    assert!(w.output[0] > CLAMP_CEILING);
    let mismatch = w.verify().mismatch().cloned().expect("missing clamp must be detected");
    assert_eq!(mismatch.index, 0);
    assert_eq!(mismatch.gold, CLAMP_CEILING);
}

/// Mutation (clamped exp): every lane runs one round too few.
#[test]
fn mutation_clamped_exp_detect_off_by_one() {
    let values = vec![1.5, 1.5, 1.5, 1.5];
    let exponents = vec![1, 2, 3, 4];
    let mut w = Workload::from_parts(values, exponents);
    let n = w.len();
    clamped_exp_scalar(&w.values, &w.exponents, &mut w.gold, n);

    let mut unit = SimulatedUnit::unobserved();
    let lanes = unit.first_lanes(n);
    let ones = unit.broadcast_i32(1, lanes);
    let x = unit.load_f32(&w.values, lanes);
    let mut count = unit.load_i32(&w.exponents, lanes);
    let mut result = unit.broadcast_f32(1.0, lanes);
    let mut active = unit.gt_i32(count, ones, lanes);
    while unit.count_active(active) > 0 {
        let product = unit.mul_f32(result, x, active);
        result = unit.select_f32(active, product, result);
        count = unit.sub_i32(count, ones, active);
        active = unit.gt_i32(count, ones, active);
    }
    unit.store_f32(&mut w.output, result, lanes);

    let mismatch = w.verify().mismatch().cloned().expect("short loop must be detected");
    assert_eq!(mismatch.index, 0);
    assert_eq!(mismatch.output, 1.0);
}

/// Mutation (array sum): the reduction stops after one hadd round, so only
/// the first pair of partial sums reaches lane 0.
#[test]
fn mutation_array_sum_detect_short_reduction() {
    let n = 4 * VECTOR_WIDTH;
    let w = Workload::from_parts(vec![1.0; n], vec![0; n]);
    let serial = array_sum_scalar(&w.values, n);

    let mut unit = SimulatedUnit::unobserved();
    let all = unit.first_lanes(VECTOR_WIDTH);
    let mut partial = unit.broadcast_f32(0.0, all);
    for i in (0..n).step_by(VECTOR_WIDTH) {
        let lanes = unit.first_lanes(n - i);
        let x = unit.load_f32(&w.values[i..], lanes);
        let sum = unit.add_f32(partial, x, lanes);
        partial = unit.select_f32(lanes, sum, partial);
    }
    partial = unit.hadd_f32(partial);
    let vector = partial[0];

    let verdict = verify_sum(serial, vector, n);
    assert!(!verdict.passed);
    assert!(verdict.difference > sum_tolerance(n));
}
