//! Output-vs-gold verification.
//!
//! [`verify_result`] scans every slot (guard slots included) in index order
//! and stops at the first element whose vector output differs from the
//! scalar gold by more than [`VERIFY_EPSILON`]. A mismatch in a guard slot
//! means the vector kernel wrote outside `[0, n)` and is reported as an
//! out-of-bounds write on top of the ordinary mismatch.
//!
//! Failures are values, not errors: the caller gets a [`Verdict`].

use std::fmt::Write;

use serde::Serialize;

use crate::error::Severity;
use crate::kernels::array_sum::sum_tolerance;

/// Absolute tolerance for elementwise comparison.
pub const VERIFY_EPSILON: f32 = 0.000_01;

/// What a mismatch says about the kernel under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    /// Output differs from gold beyond tolerance.
    Mismatch,
    /// The differing slot is a guard slot.
    OutOfBounds,
}

impl Diagnosis {
    pub fn severity(self) -> Severity {
        match self {
            Diagnosis::Mismatch => Severity::Error,
            Diagnosis::OutOfBounds => Severity::Critical,
        }
    }
}

/// Inputs and results over `[0, n)`, captured for operator inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayDump {
    pub values: Vec<f32>,
    pub exponents: Vec<i32>,
    pub output: Vec<f32>,
    pub gold: Vec<f32>,
}

impl ArrayDump {
    pub fn format_text(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "value  = ");
        for v in &self.values {
            let _ = write!(out, "{v:>9.6} ");
        }
        let _ = write!(out, "\nexp    = ");
        for e in &self.exponents {
            let _ = write!(out, "{e:>9} ");
        }
        let _ = write!(out, "\noutput = ");
        for v in &self.output {
            let _ = write!(out, "{v:>9.6} ");
        }
        let _ = write!(out, "\ngold   = ");
        for v in &self.gold {
            let _ = write!(out, "{v:>9.6} ");
        }
        out.push('\n');
        out
    }
}

/// The first failing slot of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub index: usize,
    pub output: f32,
    pub gold: f32,
    pub diagnoses: Vec<Diagnosis>,
    pub dump: ArrayDump,
}

impl Mismatch {
    pub fn is_out_of_bounds(&self) -> bool {
        self.diagnoses.contains(&Diagnosis::OutOfBounds)
    }

    /// Highest severity among the diagnoses.
    pub fn severity(&self) -> Severity {
        self.diagnoses
            .iter()
            .map(|d| d.severity())
            .max()
            .unwrap_or(Severity::Error)
    }

    pub fn format_text(&self) -> String {
        let mut out = String::new();
        if self.is_out_of_bounds() {
            let _ = writeln!(out, "You have written to out of bound value!");
        }
        let _ = writeln!(out, "Wrong calculation at value[{}]!", self.index);
        out.push_str(&self.dump.format_text());
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail(Box<Mismatch>),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(m) => Some(m),
        }
    }
}

/// Compare `output` with `gold` over all slots.
///
/// `n` is the logical size; slots at or beyond it are guard slots.
///
/// # Panics
/// Panics if the four arrays differ in length or are shorter than `n`.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn verify_result(
    values: &[f32],
    exponents: &[i32],
    output: &[f32],
    gold: &[f32],
    n: usize,
) -> Verdict {
    let len = values.len();
    assert!(
        exponents.len() == len && output.len() == len && gold.len() == len,
        "array length mismatch: values {len}, exponents {}, output {}, gold {}",
        exponents.len(),
        output.len(),
        gold.len()
    );
    assert!(len >= n, "arrays shorter than n");

    // Negated `<=` so a NaN on either side counts as a mismatch.
    let Some(index) = (0..len).find(|&i| !((output[i] - gold[i]).abs() <= VERIFY_EPSILON)) else {
        return Verdict::Pass;
    };

    let mut diagnoses = vec![Diagnosis::Mismatch];
    if index >= n {
        diagnoses.push(Diagnosis::OutOfBounds);
    }
    Verdict::Fail(Box::new(Mismatch {
        index,
        output: output[index],
        gold: gold[index],
        diagnoses,
        dump: ArrayDump {
            values: values[..n].to_vec(),
            exponents: exponents[..n].to_vec(),
            output: output[..n].to_vec(),
            gold: gold[..n].to_vec(),
        },
    }))
}

/// Outcome of comparing the scalar and vector array sums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SumVerdict {
    pub serial: f32,
    pub vector: f32,
    pub difference: f32,
    pub tolerance: f32,
    pub passed: bool,
}

/// Compare two sums of `n` elements within `n * SUM_EPSILON_PER_ELEMENT`.
pub fn verify_sum(serial: f32, vector: f32, n: usize) -> SumVerdict {
    let difference = (serial - vector).abs();
    let tolerance = sum_tolerance(n);
    SumVerdict {
        serial,
        vector,
        difference,
        tolerance,
        passed: difference <= tolerance,
    }
}
