//! Run orchestration.
//!
//! For each selected kernel: clear the output arrays, run the scalar form
//! into `gold`, run the vector form into `output`, and verify. The two
//! timed intervals never overlap, and lane statistics are reset before each
//! kernel so numbers never leak between runs.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::kernels::KernelKind;
use crate::kernels::abs::{abs_scalar, abs_vector};
use crate::kernels::array_sum::{array_sum_scalar, array_sum_vector};
use crate::kernels::clamped_exp::{clamped_exp_scalar, clamped_exp_vector};
use crate::stats::{LaneStats, StatsSummary};
use crate::vector::SimulatedUnit;
use crate::verify::{SumVerdict, Verdict, verify_sum};
use crate::workload::Workload;

/// How a kernel's vector result was judged.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Elementwise kernels: output array against gold array.
    Elementwise(Verdict),
    /// Reductions: one scalar against another.
    Sum(SumVerdict),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        match self {
            Outcome::Elementwise(v) => v.is_pass(),
            Outcome::Sum(s) => s.passed,
        }
    }
}

/// Result of one scalar + vector run of a kernel.
#[derive(Debug, Clone)]
pub struct KernelRun {
    pub kernel: KernelKind,
    pub serial_time: Duration,
    pub vector_time: Duration,
    pub outcome: Outcome,
    pub stats: StatsSummary,
    /// Per-instruction log, present when the stats were collecting one.
    pub log: Option<String>,
}

impl KernelRun {
    /// Serial time over vector time. Infinite if the vector run was too
    /// fast for the clock.
    pub fn speedup(&self) -> f64 {
        let vector = self.vector_time.as_secs_f64();
        if vector == 0.0 {
            return f64::INFINITY;
        }
        self.serial_time.as_secs_f64() / vector
    }

    pub fn passed(&self) -> bool {
        self.outcome.passed()
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Run one kernel, scalar then vector, and verify the vector result.
///
/// `stats` is reset first; whether it keeps a full log is up to the caller.
pub fn run_kernel(kernel: KernelKind, workload: &mut Workload, stats: &mut LaneStats) -> KernelRun {
    workload.clear_outputs();
    stats.reset();
    let n = workload.len();
    let mut unit = SimulatedUnit::new(&mut *stats);

    let (serial_time, vector_time, outcome) = match kernel {
        KernelKind::Abs => {
            let ((), serial) = timed(|| abs_scalar(&workload.values, &mut workload.gold, n));
            let ((), vector) = timed(|| {
                abs_vector(&mut unit, &workload.values, &mut workload.output, n);
            });
            (serial, vector, Outcome::Elementwise(workload.verify()))
        }
        KernelKind::ClampedExp => {
            let ((), serial) = timed(|| {
                clamped_exp_scalar(&workload.values, &workload.exponents, &mut workload.gold, n);
            });
            let ((), vector) = timed(|| {
                clamped_exp_vector(
                    &mut unit,
                    &workload.values,
                    &workload.exponents,
                    &mut workload.output,
                    n,
                );
            });
            (serial, vector, Outcome::Elementwise(workload.verify()))
        }
        KernelKind::ArraySum => {
            let (serial_sum, serial) = timed(|| array_sum_scalar(&workload.values, n));
            let (vector_sum, vector) = timed(|| array_sum_vector(&mut unit, &workload.values, n));
            (serial, vector, Outcome::Sum(verify_sum(serial_sum, vector_sum, n)))
        }
    };
    drop(unit);

    let run = KernelRun {
        kernel,
        serial_time,
        vector_time,
        outcome,
        stats: stats.summary(),
        log: (!stats.log().is_empty()).then(|| stats.format_log()),
    };

    debug!(
        kernel = %kernel,
        n,
        serial_us = run.serial_time.as_secs_f64() * 1e6,
        vector_us = run.vector_time.as_secs_f64() * 1e6,
        instructions = run.stats.total_instructions,
        "kernel run finished"
    );
    if run.passed() {
        info!(kernel = %kernel, n, "vector result matches scalar gold");
    } else {
        warn!(kernel = %kernel, n, "vector result does not match scalar gold");
    }
    run
}

/// Every kernel run of one benchmark invocation, over a single workload.
#[derive(Debug, Clone)]
pub struct Suite {
    pub size: usize,
    pub seed: Option<u64>,
    pub runs: Vec<KernelRun>,
}

impl Suite {
    pub fn all_passed(&self) -> bool {
        self.runs.iter().all(KernelRun::passed)
    }
}

/// Validate `config`, generate one workload, and run each configured kernel
/// on it in order.
///
/// # Errors
/// Returns a configuration error before anything is allocated if the
/// config is invalid. Verification failures are not errors; they are
/// reported in the returned [`Suite`].
pub fn run_suite(config: &BenchConfig) -> Result<Suite, BenchError> {
    let size = config.validate()?;
    let mut workload = match config.seed {
        Some(seed) => Workload::seeded(size, seed),
        None => Workload::random(size),
    };
    info!(n = size.get(), seed = ?workload.seed(), kernels = config.kernels.len(), "starting benchmark");

    let mut stats = if config.print_log {
        LaneStats::with_log()
    } else {
        LaneStats::new()
    };
    let runs = config
        .kernels
        .iter()
        .map(|&kernel| run_kernel(kernel, &mut workload, &mut stats))
        .collect();

    Ok(Suite {
        size: size.get(),
        seed: workload.seed(),
        runs,
    })
}
