//! Benchmark objectives grouped by landscape:
//! - `unimodal`: a single basin (sphere, quadratic, rosenbrock)
//! - `multimodal`: many local minima (rastrigin, ackley, griewank)

pub mod multimodal;
pub mod unimodal;

pub use multimodal::*;
pub use unimodal::*;
