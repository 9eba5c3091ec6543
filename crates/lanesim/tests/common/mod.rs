//! Shared helpers for the lanesim integration tests.

#![allow(dead_code)]

use lanesim::vector::VECTOR_WIDTH;
use lanesim::workload::{Workload, WorkloadSize};

/// Seeded workload of `n` logical elements.
pub fn seeded(n: usize, seed: u64) -> Workload {
    let size = WorkloadSize::new(i64::try_from(n).unwrap()).unwrap();
    Workload::seeded(size, seed)
}

/// Asserts every slot from `n` to the end of `slice` is still zero.
pub fn assert_guard_untouched(slice: &[f32], n: usize) {
    for (i, &val) in slice.iter().enumerate().skip(n) {
        assert_eq!(val, 0.0, "guard slot [{i}] was written: {val}");
    }
}

/// Asserts `a[..n]` and `b[..n]` agree within `tol`.
pub fn assert_close(a: &[f32], b: &[f32], n: usize, tol: f32) {
    for i in 0..n {
        assert!(
            (a[i] - b[i]).abs() <= tol,
            "element [{i}] differs: {} vs {} (tol={tol})",
            a[i],
            b[i]
        );
    }
}

/// Sizes that land on, just before, and just after chunk boundaries.
pub fn boundary_sizes() -> Vec<usize> {
    let w = VECTOR_WIDTH;
    vec![1, w - 1, w, w + 1, 2 * w - 1, 2 * w, 3 * w + 2, 16, 17, 100]
}
