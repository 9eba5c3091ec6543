//! Kernel implementations: scalar reference and lane-vectorized variants.
//!
//! Each submodule provides two variants of its kernel:
//! - `fn {name}_scalar(...)`: pure Rust scalar reference (gold)
//! - `fn {name}_vector(unit, ...)`: the same computation expressed against
//!   a [`VectorIsa`](crate::vector::VectorIsa), one `VECTOR_WIDTH` chunk at a
//!   time with masked tails
//!
//! Kernels read and write only `[0, n)`. Callers allocate `n + VECTOR_WIDTH`
//! elements so that a kernel touching a guard slot is detectable.

#![allow(clippy::cast_precision_loss, clippy::float_cmp)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

pub mod abs;
pub mod array_sum;
pub mod clamped_exp;

#[cfg(kani)]
mod kani_proofs;

/// Exclusive upper bound of generated exponents.
pub const EXP_MAX: i32 = 10;

/// Saturation value of the clamped exponentiation kernel.
pub const CLAMP_CEILING: f32 = 9.999_999;

/// The kernels the benchmark knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KernelKind {
    Abs,
    ClampedExp,
    ArraySum,
}

impl KernelKind {
    pub const ALL: [KernelKind; 3] = [KernelKind::Abs, KernelKind::ClampedExp, KernelKind::ArraySum];

    pub fn name(self) -> &'static str {
        match self {
            KernelKind::Abs => "abs",
            KernelKind::ClampedExp => "clamped-exp",
            KernelKind::ArraySum => "array-sum",
        }
    }

    /// Heading used in text reports.
    pub fn title(self) -> &'static str {
        match self {
            KernelKind::Abs => "Absolute Vector",
            KernelKind::ClampedExp => "Clamped Exponent Vector",
            KernelKind::ArraySum => "Array Sum Vector",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            KernelKind::Abs => "output[i] = |values[i]|",
            KernelKind::ClampedExp => {
                "output[i] = values[i]^exponents[i], saturated at 9.999999"
            }
            KernelKind::ArraySum => "sum of values[0..n]",
        }
    }

    /// Parse a kernel list: a single name or `all`.
    pub fn parse_list(s: &str) -> Result<Vec<KernelKind>, BenchError> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::ALL.to_vec());
        }
        s.split(',').map(|part| part.trim().parse()).collect()
    }
}

impl FromStr for KernelKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abs" => Ok(KernelKind::Abs),
            "clamped-exp" | "clamped_exp" | "exp" => Ok(KernelKind::ClampedExp),
            "array-sum" | "array_sum" | "sum" => Ok(KernelKind::ArraySum),
            _ => Err(BenchError::UnknownKernel(s.to_string())),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
