//! Run one kernel on a small seeded workload and print its lane log.
//!
//! Usage:
//!   cargo run --example lane_log -- clamped-exp 7
//!   cargo run --example lane_log -- abs 10 42

use std::process;

use lanesim::bench::run_kernel;
use lanesim::kernels::KernelKind;
use lanesim::stats::LaneStats;
use lanesim::workload::{Workload, WorkloadSize};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let kernel: KernelKind = args
        .get(1)
        .map_or("abs", String::as_str)
        .parse()
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        });
    let size = args
        .get(2)
        .map_or(Ok(6), |s| s.parse::<i64>())
        .map_err(|e| e.to_string())
        .and_then(|n| WorkloadSize::new(n).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| {
            eprintln!("Invalid size: {e}");
            process::exit(1);
        });
    let seed = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut workload = Workload::seeded(size, seed);
    let mut stats = LaneStats::with_log();
    let run = run_kernel(kernel, &mut workload, &mut stats);

    println!("{} over {} elements (seed {seed})", kernel.title(), size.get());
    println!("=================================");
    print!("{}", stats.format_log());
    println!();
    print!("{}", run.stats.format_text());
    println!();
    println!("Passed: {}", run.passed());
}
