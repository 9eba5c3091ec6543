//! # lanesim
//!
//! Scalar vs lane-vectorized kernels on a simulated vector unit.
//!
//! Each kernel has a scalar reference form and a form written against a
//! fixed-width, mask-driven vector instruction set. The benchmark runs both
//! over the same padded workload, times them, and checks the vector output
//! against the scalar gold, including the guard slots past the logical end
//! of the arrays.
//!
//! ## Modules
//!
//! - [`vector`]: lanes, masks, the [`vector::VectorIsa`] contract and the
//!   simulated unit implementing it
//! - [`stats`]: lane-utilization observers
//! - [`kernels`]: absolute value, clamped exponentiation, array sum
//! - [`workload`]: padded random workloads, seeded or not
//! - [`verify`]: first-mismatch verification with bounds diagnosis
//! - [`bench`]: timed scalar/vector runs
//! - [`report`]: text and JSON reports
//! - [`config`]: YAML-backed run configuration
//! - [`error`]: configuration errors and severities

pub mod bench;
pub mod config;
pub mod error;
pub mod kernels;
pub mod report;
pub mod stats;
pub mod vector;
pub mod verify;
pub mod workload;
