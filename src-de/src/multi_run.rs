//! Independent runs of the same problem, executed on the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{DEError, Result};
use crate::{DEConfig, DEReport, DifferentialEvolution, Problem};

/// How many runs to make and on how many threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiRunConfig {
    pub runs: usize,
    /// Size of a dedicated thread pool; `None` uses the global rayon pool
    pub num_threads: Option<usize>,
}

/// Run DE `multi.runs` times. Run `k` is tagged `config.n_run + k` and, when
/// `config.seed` is set, seeded with `seed + k`, so the whole batch is
/// reproducible regardless of thread scheduling. Reports come back in run order.
pub fn run_independent<P>(
    problem: &P,
    config: &DEConfig,
    multi: &MultiRunConfig,
) -> Result<Vec<DEReport>>
where
    P: Problem + Sync + ?Sized,
{
    let run_all = || -> Result<Vec<DEReport>> {
        (0..multi.runs)
            .into_par_iter()
            .map(|k| {
                let mut cfg = config.clone();
                cfg.n_run = config.n_run + k;
                cfg.seed = config.seed.map(|s| s.wrapping_add(k as u64));
                DifferentialEvolution::new(problem, cfg)?.solve()
            })
            .collect()
    };

    match multi.num_threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| DEError::invalid_config(format!("cannot build thread pool: {e}")))?;
            pool.install(run_all)
        }
        None => run_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundedProblem, DEConfigBuilder, optimize};
    use ndarray::Array1;

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_runs_match_sequential_seeded_runs() {
        let problem = BoundedProblem::new(sphere, &[(-3.0, 3.0); 2]).unwrap();
        let config = DEConfigBuilder::new().seed(100).popsize(8).maxiter(15).build();
        let multi = MultiRunConfig { runs: 3, num_threads: Some(2) };

        let reports = run_independent(&problem, &config, &multi).unwrap();
        assert_eq!(reports.len(), 3);
        for (k, report) in reports.iter().enumerate() {
            assert_eq!(report.n_run, 1 + k);
            let single = DEConfig { seed: Some(100 + k as u64), n_run: 1 + k, ..config.clone() };
            assert_eq!(*report, optimize(&problem, single).unwrap());
        }
    }

    #[test]
    fn test_invalid_config_fails_every_run() {
        let problem = BoundedProblem::new(sphere, &[(-3.0, 3.0); 2]).unwrap();
        let config = DEConfigBuilder::new().popsize(2).build();
        let multi = MultiRunConfig { runs: 2, num_threads: None };
        assert!(run_independent(&problem, &config, &multi).is_err());
    }
}
