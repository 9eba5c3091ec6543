//! Workload generation.
//!
//! A [`Workload`] owns the four parallel arrays of one run: input values,
//! exponents, vector output and scalar gold. Each has `n + VECTOR_WIDTH`
//! elements; the trailing `VECTOR_WIDTH` are guard slots that no kernel may
//! write.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::BenchError;
use crate::kernels::EXP_MAX;
use crate::vector::VECTOR_WIDTH;
use crate::verify::{Verdict, verify_result};

/// Validated workload size: a positive element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadSize(usize);

impl WorkloadSize {
    /// Validate a raw (possibly negative) size.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidSize`] if `size <= 0` or does not fit
    /// in `usize`.
    pub fn new(size: i64) -> Result<Self, BenchError> {
        match usize::try_from(size) {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(BenchError::InvalidSize(size)),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Length of every array, guard slots included.
    pub fn padded(self) -> usize {
        self.0 + VECTOR_WIDTH
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub values: Vec<f32>,
    pub exponents: Vec<i32>,
    pub output: Vec<f32>,
    pub gold: Vec<f32>,
    n: usize,
    seed: Option<u64>,
}

impl Workload {
    /// Fill a workload from `rng`: values uniform in `[-1, 3)`, exponents
    /// uniform in `[0, EXP_MAX)`, output and gold zeroed.
    pub fn generate<R: Rng + ?Sized>(size: WorkloadSize, rng: &mut R) -> Self {
        let len = size.padded();
        let mut values = Vec::with_capacity(len);
        let mut exponents = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(-1.0 + 4.0 * rng.random::<f32>());
            exponents.push(rng.random_range(0..EXP_MAX));
        }
        Self {
            values,
            exponents,
            output: vec![0.0; len],
            gold: vec![0.0; len],
            n: size.get(),
            seed: None,
        }
    }

    /// Reproducible workload: the same seed always yields the same arrays.
    pub fn seeded(size: WorkloadSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut workload = Self::generate(size, &mut rng);
        workload.seed = Some(seed);
        debug!(n = size.get(), seed, "generated seeded workload");
        workload
    }

    /// Workload from a fresh random seed. The seed is kept so the run can
    /// be replayed with [`Workload::seeded`].
    pub fn random(size: WorkloadSize) -> Self {
        let seed = rand::rng().random();
        Self::seeded(size, seed)
    }

    /// Workload over explicit data. Guard slots are zero-filled.
    ///
    /// # Panics
    /// Panics if `values` and `exponents` differ in length.
    pub fn from_parts(mut values: Vec<f32>, mut exponents: Vec<i32>) -> Self {
        assert_eq!(
            values.len(),
            exponents.len(),
            "values/exponents length mismatch: {} vs {}",
            values.len(),
            exponents.len()
        );
        let n = values.len();
        let len = n + VECTOR_WIDTH;
        values.resize(len, 0.0);
        exponents.resize(len, 0);
        Self {
            values,
            exponents,
            output: vec![0.0; len],
            gold: vec![0.0; len],
            n,
            seed: None,
        }
    }

    /// Logical element count `n` (guard slots excluded).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Array length including guard slots.
    pub fn padded_len(&self) -> usize {
        self.values.len()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Zero output and gold so the next kernel starts clean.
    pub fn clear_outputs(&mut self) {
        self.output.fill(0.0);
        self.gold.fill(0.0);
    }

    /// Compare output against gold over every slot, guards included.
    pub fn verify(&self) -> Verdict {
        verify_result(
            &self.values,
            &self.exponents,
            &self.output,
            &self.gold,
            self.n,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn size(n: i64) -> WorkloadSize {
        WorkloadSize::new(n).unwrap()
    }

    #[test]
    fn size_rejects_non_positive() {
        assert!(matches!(WorkloadSize::new(0), Err(BenchError::InvalidSize(0))));
        assert!(matches!(WorkloadSize::new(-5), Err(BenchError::InvalidSize(-5))));
    }

    #[test]
    fn size_padded() {
        assert_eq!(size(16).padded(), 16 + VECTOR_WIDTH);
    }

    #[test]
    fn generate_shapes() {
        let w = Workload::seeded(size(13), 7);
        assert_eq!(w.len(), 13);
        assert_eq!(w.padded_len(), 13 + VECTOR_WIDTH);
        assert_eq!(w.exponents.len(), w.padded_len());
        assert_eq!(w.output.len(), w.padded_len());
        assert_eq!(w.gold.len(), w.padded_len());
        assert!(w.output.iter().all(|&x| x == 0.0));
        assert!(w.gold.iter().all(|&x| x == 0.0));
        assert_eq!(w.seed(), Some(7));
    }

    #[test]
    fn seeded_is_reproducible() {
        let a = Workload::seeded(size(32), 42);
        let b = Workload::seeded(size(32), 42);
        assert_eq!(a, b);
        let c = Workload::seeded(size(32), 43);
        assert_ne!(a.values, c.values);
    }

    #[test]
    fn random_records_seed() {
        let w = Workload::random(size(8));
        let seed = w.seed().unwrap();
        assert_eq!(Workload::seeded(size(8), seed), w);
    }

    #[test]
    fn injected_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        let w = Workload::generate(size(4), &mut rng);
        assert_eq!(w.seed(), None);
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn from_parts_pads() {
        let w = Workload::from_parts(vec![1.0, -2.0], vec![3, 4]);
        assert_eq!(w.len(), 2);
        assert_eq!(&w.values[2..], &[0.0; VECTOR_WIDTH]);
        assert_eq!(&w.exponents[2..], &[0; VECTOR_WIDTH]);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn from_parts_mismatch() {
        let _ = Workload::from_parts(vec![1.0], vec![]);
    }

    #[test]
    fn clear_outputs_zeroes() {
        let mut w = Workload::seeded(size(4), 3);
        w.output[0] = 5.0;
        w.gold[1] = 6.0;
        w.clear_outputs();
        assert!(w.output.iter().chain(&w.gold).all(|&x| x == 0.0));
    }

    proptest! {
        #[test]
        fn prop_generated_ranges(n in 1i64..200, seed in any::<u64>()) {
            let w = Workload::seeded(size(n), seed);
            for (i, &x) in w.values.iter().enumerate() {
                prop_assert!((-1.0..3.0).contains(&x), "values[{i}] = {x}");
            }
            for (i, &e) in w.exponents.iter().enumerate() {
                prop_assert!((0..EXP_MAX).contains(&e), "exponents[{i}] = {e}");
            }
        }
    }
}
