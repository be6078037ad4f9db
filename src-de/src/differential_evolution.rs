use crate::{BoundedProblem, DEConfig, DEReport, DifferentialEvolution, Problem, Result};
use ndarray::Array1;

/// Run DE on `problem` with `config`.
pub fn optimize<P>(problem: &P, config: DEConfig) -> Result<DEReport>
where
	P: Problem + ?Sized,
{
	DifferentialEvolution::new(problem, config)?.solve()
}

/// Convenience function mirroring SciPy's API shape (simplified):
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs, trials are clipped into them
/// - `config`: DE configuration
pub fn differential_evolution<F>(func: &F, bounds: &[(f64, f64)], config: DEConfig) -> Result<DEReport>
where
	F: Fn(&Array1<f64>) -> f64,
{
	let problem = BoundedProblem::new(func, bounds)?;
	optimize(&problem, config)
}
