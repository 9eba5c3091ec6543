pub mod kernels;
pub mod run;
