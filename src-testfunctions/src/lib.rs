//! Optimization test functions library
//!
//! Benchmark objectives with their usual search boxes, used to exercise the
//! Differential Evolution engine.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use deopt_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert_eq!(sphere(&x), 0.0);
//! let bounds = get_function_bounds_vec("rastrigin", 3, (-1.0, 1.0));
//! assert_eq!(bounds, vec![(-5.12, 5.12); 3]);
//! ```

use ndarray::Array1;

pub mod functions;
pub use functions::*;

/// Objective signature shared by every function in this crate
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a test function
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    pub name: &'static str,
    pub function: TestFunction,
    /// Per-coordinate search interval (min, max)
    pub bounds: (f64, f64),
    /// Location of the global minimum along every coordinate
    pub optimum: f64,
    /// Value at the global minimum
    pub minimum: f64,
    pub multimodal: bool,
}

/// Metadata of every available function, sorted by name
pub fn get_function_metadata() -> Vec<FunctionMetadata> {
    let mut all = vec![
        FunctionMetadata {
            name: "ackley",
            function: ackley,
            bounds: (-32.768, 32.768),
            optimum: 0.0,
            minimum: 0.0,
            multimodal: true,
        },
        FunctionMetadata {
            name: "griewank",
            function: griewank,
            bounds: (-600.0, 600.0),
            optimum: 0.0,
            minimum: 0.0,
            multimodal: true,
        },
        FunctionMetadata {
            name: "quadratic",
            function: quadratic,
            bounds: (-5.0, 5.0),
            optimum: 1.0,
            minimum: 0.0,
            multimodal: false,
        },
        FunctionMetadata {
            name: "rastrigin",
            function: rastrigin,
            bounds: (-5.12, 5.12),
            optimum: 0.0,
            minimum: 0.0,
            multimodal: true,
        },
        FunctionMetadata {
            name: "rosenbrock",
            function: rosenbrock,
            bounds: (-2.048, 2.048),
            optimum: 1.0,
            minimum: 0.0,
            multimodal: false,
        },
        FunctionMetadata {
            name: "sphere",
            function: sphere,
            bounds: (-5.0, 5.0),
            optimum: 0.0,
            minimum: 0.0,
            multimodal: false,
        },
    ];
    all.sort_by_key(|m| m.name);
    all
}

/// Look a function up by name
pub fn find_function(name: &str) -> Option<FunctionMetadata> {
    get_function_metadata().into_iter().find(|m| m.name == name)
}

/// `n` copies of `(lower, upper)`
pub fn create_bounds(n: usize, lower: f64, upper: f64) -> Vec<(f64, f64)> {
    vec![(lower, upper); n]
}

/// Bounds of `function_name` in `n` dimensions, `default_bounds` if unknown
pub fn get_function_bounds_vec(
    function_name: &str,
    n: usize,
    default_bounds: (f64, f64),
) -> Vec<(f64, f64)> {
    let (lo, hi) = find_function(function_name).map(|m| m.bounds).unwrap_or(default_bounds);
    create_bounds(n, lo, hi)
}
