//! Human-readable and JSON rendering of benchmark results.

use std::fmt::Write;

use serde::Serialize;

use crate::bench::{KernelRun, Outcome, Suite};
use crate::stats::StatsSummary;
use crate::vector::VECTOR_WIDTH;
use crate::verify::{SumVerdict, Verdict};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeReport {
    Elementwise { verdict: Verdict },
    Sum(SumVerdict),
}

/// Report for one kernel.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub kernel: String,
    pub serial_us: f64,
    pub vector_us: f64,
    /// `None` when the vector run was too fast to time.
    pub speedup: Option<f64>,
    pub passed: bool,
    pub outcome: OutcomeReport,
    pub stats: StatsSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl From<&KernelRun> for RunReport {
    fn from(run: &KernelRun) -> Self {
        let speedup = run.speedup();
        Self {
            kernel: run.kernel.name().to_string(),
            serial_us: run.serial_time.as_secs_f64() * 1e6,
            vector_us: run.vector_time.as_secs_f64() * 1e6,
            speedup: speedup.is_finite().then_some(speedup),
            passed: run.passed(),
            outcome: match &run.outcome {
                Outcome::Elementwise(verdict) => OutcomeReport::Elementwise {
                    verdict: verdict.clone(),
                },
                Outcome::Sum(sum) => OutcomeReport::Sum(*sum),
            },
            stats: run.stats.clone(),
            log: run.log.clone(),
        }
    }
}

/// Report for a whole invocation.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub size: usize,
    pub seed: Option<u64>,
    pub vector_width: usize,
    pub passed: bool,
    pub runs: Vec<RunReport>,
}

impl From<&Suite> for SuiteReport {
    fn from(suite: &Suite) -> Self {
        Self {
            size: suite.size,
            seed: suite.seed,
            vector_width: VECTOR_WIDTH,
            passed: suite.all_passed(),
            runs: suite.runs.iter().map(RunReport::from).collect(),
        }
    }
}

/// Name used in the pass/fail banner, e.g. `AbsVector`.
fn banner_name(kernel: &str) -> String {
    let mut name: String = kernel
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |c| {
                c.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect();
    name.push_str("Vector");
    name
}

fn title(kernel: &str) -> &'static str {
    kernel
        .parse::<crate::kernels::KernelKind>()
        .map_or("Vector Kernel", crate::kernels::KernelKind::title)
}

pub fn format_run(run: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Serial Time: {:.3}us", run.serial_us);
    let _ = writeln!(out, "SIMD Time: {:.3}us", run.vector_us);
    match run.speedup {
        Some(s) => {
            let _ = writeln!(out, "{s:.3}x speedup");
        }
        None => {
            let _ = writeln!(out, "speedup not measurable");
        }
    }
    let _ = writeln!(out, "{} ({})", title(&run.kernel), run.kernel);

    match &run.outcome {
        OutcomeReport::Elementwise { verdict } => match verdict {
            Verdict::Pass => {
                let _ = writeln!(out, "Results matched with answer!");
            }
            Verdict::Fail(m) => {
                let _ = writeln!(out, "[{}] vector output diverges from gold", m.severity());
                out.push_str(&m.format_text());
            }
        },
        OutcomeReport::Sum(sum) => {
            let _ = writeln!(
                out,
                "serial sum = {:.6}, vector sum = {:.6}, |diff| = {:.6} (tolerance {:.6})",
                sum.serial, sum.vector, sum.difference, sum.tolerance
            );
            if sum.passed {
                let _ = writeln!(out, "Results matched with answer!");
            }
        }
    }

    if let Some(log) = &run.log {
        let _ = writeln!(
            out,
            "***************** Printing Vector Unit Execution Log *****************"
        );
        out.push_str(log);
    }
    out.push_str(&run.stats.format_text());

    let _ = writeln!(
        out,
        "************************ Result Verification *************************"
    );
    let name = banner_name(&run.kernel);
    if run.passed {
        let _ = writeln!(out, "{name} Passed!!!");
    } else {
        let _ = writeln!(out, "@@@ {name} Failed!!!");
    }
    out
}

pub fn format_text(report: &SuiteReport) -> String {
    let mut out = String::new();
    let seed = report
        .seed
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    let _ = writeln!(
        out,
        "Workload size: {} (vector width {}, seed {seed})",
        report.size, report.vector_width
    );
    for run in &report.runs {
        out.push('\n');
        out.push_str(&format_run(run));
    }
    out
}

/// Pretty-printed JSON.
///
/// # Errors
/// Propagates serialization failures from `serde_json`.
pub fn format_json(report: &SuiteReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenchConfig;
    use crate::kernels::KernelKind;
    use crate::stats::LaneStats;
    use crate::verify::verify_result;
    use std::time::Duration;

    fn suite(kernels: Vec<KernelKind>) -> Suite {
        crate::bench::run_suite(&BenchConfig {
            size: 16,
            seed: Some(5),
            kernels,
            ..BenchConfig::default()
        })
        .unwrap()
    }

    fn failing_run() -> KernelRun {
        let values = vec![1.0f32; 8];
        let exponents = vec![0i32; 8];
        let gold = vec![0.0f32; 8];
        let mut output = vec![0.0f32; 8];
        output[6] = 1.0;
        KernelRun {
            kernel: KernelKind::Abs,
            serial_time: Duration::from_micros(3),
            vector_time: Duration::ZERO,
            outcome: Outcome::Elementwise(verify_result(&values, &exponents, &output, &gold, 4)),
            stats: LaneStats::new().summary(),
            log: None,
        }
    }

    #[test]
    fn banner_names() {
        assert_eq!(banner_name("abs"), "AbsVector");
        assert_eq!(banner_name("clamped-exp"), "ClampedExpVector");
        assert_eq!(banner_name("array-sum"), "ArraySumVector");
    }

    #[test]
    fn text_pass() {
        let report = SuiteReport::from(&suite(vec![KernelKind::Abs]));
        let text = format_text(&report);
        assert!(text.contains("Serial Time:"));
        assert!(text.contains("SIMD Time:"));
        assert!(text.contains("Absolute Vector"));
        assert!(text.contains("Results matched with answer!"));
        assert!(text.contains("Vector Width:"));
        assert!(text.contains("AbsVector Passed!!!"));
        assert!(text.contains("seed 5"));
    }

    #[test]
    fn text_fail_out_of_bounds() {
        let report = RunReport::from(&failing_run());
        assert!(!report.passed);
        assert_eq!(report.speedup, None);
        let text = format_run(&report);
        assert!(text.contains("[CRITICAL]"));
        assert!(text.contains("You have written to out of bound value!"));
        assert!(text.contains("Wrong calculation at value[6]!"));
        assert!(text.contains("@@@ AbsVector Failed!!!"));
        assert!(text.contains("speedup not measurable"));
    }

    #[test]
    fn text_sum() {
        let report = SuiteReport::from(&suite(vec![KernelKind::ArraySum]));
        let text = format_text(&report);
        assert!(text.contains("serial sum ="));
        assert!(text.contains("ArraySumVector Passed!!!"));
    }

    #[test]
    fn json_round_trips_through_value() {
        let report = SuiteReport::from(&suite(KernelKind::ALL.to_vec()));
        let json = format_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], 16);
        assert_eq!(value["passed"], true);
        assert_eq!(value["runs"].as_array().unwrap().len(), 3);
        assert_eq!(value["runs"][0]["kernel"], "abs");
        assert_eq!(value["runs"][0]["outcome"]["kind"], "elementwise");
        assert_eq!(value["runs"][0]["outcome"]["verdict"]["status"], "pass");
        assert_eq!(value["runs"][2]["outcome"]["kind"], "sum");
        assert!(value["runs"][0].get("log").is_none());
    }

    #[test]
    fn json_failure_carries_index() {
        let report = RunReport::from(&failing_run());
        let value = serde_json::to_value(&report).unwrap();
        let verdict = &value["outcome"]["verdict"];
        assert_eq!(verdict["status"], "fail");
        assert_eq!(verdict["index"], 6);
        assert_eq!(verdict["diagnoses"][1], "out_of_bounds");
    }
}
