//! Differential Evolution (DE) optimizer in pure Rust using ndarray
//!
//! Minimises a black-box objective over a box-bounded continuous space.
//!
//! Supported features:
//! - Variants `<best|rand>/<1|2>/<bin|exp>` parsed once into typed enums
//! - Binomial and exponential crossover
//! - Differential weight as a fixed factor or dithering in a range [min,max]
//! - Greedy, strict selection; best-so-far tracking that never regresses
//! - Stopping on a generation limit and an optional evaluation budget
//! - Per-generation logbook (min/max/mean/std of the population fitness)
//! - One seedable RNG per run, independent runs in parallel

#![allow(missing_docs)]
use std::fmt;
use std::time::Instant;

use log::Level;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod strategy;

pub mod distinct_indices;
pub mod mutation;

pub mod mutant_best1;
pub mod mutant_best2;
pub mod mutant_rand1;
pub mod mutant_rand2;

pub mod crossover_binomial;
pub mod crossover_exponential;

pub mod differential_evolution;
pub mod evolve;
pub mod logbook;
pub mod multi_run;
pub mod problem;
pub mod tracker;

pub use differential_evolution::{differential_evolution, optimize};
pub use error::{DEError, Result};
pub use evolve::{Generation, crossover, evolve_population};
pub use logbook::{FitnessStats, GenerationRecord, Logbook};
pub use multi_run::{MultiRunConfig, run_independent};
pub use mutation::{Mutation, mutant};
pub use problem::{BoundedProblem, BoundsRepair, Problem};
pub use strategy::{Crossover, DiffCount, Selection, Variant};
pub use tracker::BestIndividualTracker;

use evolve::checked_fitness;

pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
	let mut best_i = 0usize;
	let mut best_v = v[0];
	for (i, &val) in v.iter().enumerate() {
		if val < best_v {
			best_v = val;
			best_i = i;
		}
	}
	(best_i, best_v)
}

/// Configuration for the Differential Evolution optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DEConfig {
	pub variant: Variant,
	/// Differential weight F, fixed or dithered
	pub mutation: Mutation,
	pub recombination: f64, // CR in [0,1]
	pub popsize: usize,
	/// Maximum number of generations
	pub maxiter: usize,
	/// Optional evaluation budget, checked at generation boundaries
	pub max_nfev: Option<usize>,
	pub seed: Option<u64>,
	/// Run identifier used in logs when several runs are made
	pub n_run: usize,
	/// Log the statistics of every generation at info level
	pub disp: bool,
	/// Optional initial population of shape (popsize, n_params)
	pub initial_population: Option<Array2<f64>>,
}

impl Default for DEConfig {
	fn default() -> Self {
		Self {
			variant: Variant::default(),
			mutation: Mutation::default(),
			recombination: 0.9,
			popsize: 15,
			maxiter: 1000,
			max_nfev: None,
			seed: None,
			n_run: 1,
			disp: false,
			initial_population: None,
		}
	}
}

impl DEConfig {
	/// Check the configuration against a problem with `n_params` parameters.
	pub fn validate(&self, n_params: usize) -> Result<()> {
		self.mutation.validate()?;
		if !(0.0..=1.0).contains(&self.recombination) {
			return Err(DEError::InvalidCrossoverRate { rate: self.recombination });
		}
		if n_params == 0 {
			return Err(DEError::invalid_config("problem needs at least one parameter"));
		}
		let required = self.variant.min_population();
		if self.popsize < required {
			return Err(DEError::InsufficientPopulation { pop_size: self.popsize, required });
		}
		if let Some(pop) = &self.initial_population {
			if pop.dim() != (self.popsize, n_params) {
				return Err(DEError::PopulationShapeMismatch {
					expected_rows: self.popsize,
					expected_cols: n_params,
					rows: pop.nrows(),
					cols: pop.ncols(),
				});
			}
		}
		Ok(())
	}
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
#[derive(Default)]
pub struct DEConfigBuilder {
	cfg: DEConfig,
}
impl DEConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: DEConfig::default() }
	}
	pub fn variant(mut self, v: Variant) -> Self {
		self.cfg.variant = v;
		self
	}
	/// Parse and set the variant, e.g. `"rand/2/exp"`.
	pub fn variant_str(mut self, v: &str) -> Result<Self> {
		self.cfg.variant = v.parse()?;
		Ok(self)
	}
	pub fn mutation(mut self, v: Mutation) -> Self {
		self.cfg.mutation = v;
		self
	}
	pub fn recombination(mut self, v: f64) -> Self {
		self.cfg.recombination = v;
		self
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn maxiter(mut self, v: usize) -> Self {
		self.cfg.maxiter = v;
		self
	}
	pub fn max_nfev(mut self, v: usize) -> Self {
		self.cfg.max_nfev = Some(v);
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn n_run(mut self, v: usize) -> Self {
		self.cfg.n_run = v;
		self
	}
	pub fn disp(mut self, v: bool) -> Self {
		self.cfg.disp = v;
		self
	}
	pub fn initial_population(mut self, v: Array2<f64>) -> Self {
		self.cfg.initial_population = Some(v);
		self
	}
	pub fn build(self) -> DEConfig {
		self.cfg
	}
}

/// Result/Report of a DE optimization run
#[derive(Clone, PartialEq, Serialize)]
pub struct DEReport {
	/// Best parameters ever seen
	pub x: Array1<f64>,
	pub fun: f64,
	/// Total objective evaluations, initial population included
	pub nfev: usize,
	/// Index of the last completed generation
	pub nit: usize,
	pub n_run: usize,
	pub message: String,
	pub logbook: Logbook,
}

impl fmt::Debug for DEReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DEReport")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("nfev", &self.nfev)
			.field("nit", &self.nit)
			.field("n_run", &self.n_run)
			.field("message", &self.message)
			.field("logbook", &format!("len={}", self.logbook.len()))
			.finish()
	}
}

/// Information passed to the observer after each generation
pub struct DEIntermediate<'r> {
	/// Best parameters seen so far
	pub x: &'r Array1<f64>,
	pub fun: f64,
	pub iter: usize,
	pub nfev: usize,
	pub stats: FitnessStats,
	pub n_run: usize,
}

/// Differential Evolution optimizer
pub struct DifferentialEvolution<'a, P>
where
	P: Problem + ?Sized,
{
	problem: &'a P,
	config: DEConfig,
	callback: Option<Box<dyn FnMut(&DEIntermediate<'_>) + 'a>>,
}

impl<'a, P> DifferentialEvolution<'a, P>
where
	P: Problem + ?Sized,
{
	/// Create a new optimizer; the configuration is validated here, before
	/// any objective evaluation.
	pub fn new(problem: &'a P, config: DEConfig) -> Result<Self> {
		let (lower, upper) = problem.bounds();
		if lower.len() != upper.len() {
			return Err(DEError::DimensionMismatch { expected: lower.len(), got: upper.len() });
		}
		for i in 0..lower.len() {
			if !(lower[i].is_finite() && upper[i].is_finite()) || lower[i] > upper[i] {
				return Err(DEError::InvalidBounds { index: i, lower: lower[i], upper: upper[i] });
			}
		}
		config.validate(problem.n_params())?;
		Ok(Self { problem, config, callback: None })
	}

	/// Observe every generation (generation 0 included). Side effect only.
	pub fn with_callback<C>(mut self, cb: C) -> Self
	where
		C: FnMut(&DEIntermediate<'_>) + 'a,
	{
		self.callback = Some(Box::new(cb));
		self
	}

	pub fn config(&self) -> &DEConfig {
		&self.config
	}

	/// Run the optimization and return a report
	pub fn solve(&mut self) -> Result<DEReport> {
		let cfg = &self.config;
		let npop = cfg.popsize;
		let maxiter = cfg.maxiter;
		let n = self.problem.n_params();
		let level = if cfg.disp { Level::Info } else { Level::Debug };

		// Timing toggle via env var
		let timing_enabled = std::env::var("DEOPT_DE_TIMING").map(|v| v != "0").unwrap_or(false);
		let t_start = Instant::now();

		log::log!(
			level,
			"DE run {}: {} parameters, population={}, maxiter={}, max_nfev={:?}",
			cfg.n_run,
			n,
			npop,
			cfg.maxiter,
			cfg.max_nfev
		);
		log::log!(
			level,
			"  Variant: {}, Mutation: {:?}, Crossover: CR={:.3}",
			cfg.variant,
			cfg.mutation,
			cfg.recombination
		);

		// RNG
		let mut rng: StdRng = match cfg.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => {
				let mut thread_rng = rand::rng();
				StdRng::from_rng(&mut thread_rng)
			}
		};

		let mut pop = match &cfg.initial_population {
			Some(p) => p.clone(),
			None => self.problem.generate_random_pop(npop, &mut rng),
		};
		if pop.dim() != (npop, n) {
			return Err(DEError::PopulationShapeMismatch {
				expected_rows: npop,
				expected_cols: n,
				rows: pop.nrows(),
				cols: pop.ncols(),
			});
		}

		let mut energies = Array1::<f64>::zeros(npop);
		for i in 0..npop {
			energies[i] = checked_fitness(self.problem, &pop.row(i).to_owned(), i)?;
		}
		let mut nfev = npop;

		let mut tracker = BestIndividualTracker::new();
		tracker.update(&pop, &energies);
		let mut logbook = Logbook::new();

		log::log!(
			level,
			"{:>5} {:>6} {:>9} {:>14} {:>14} {:>14} {:>14}",
			"run",
			"gen",
			"nfev",
			"min",
			"max",
			"mean",
			"std"
		);
		self.observe(&mut logbook, &tracker, 0, nfev, &energies, level);

		let mut nit = 0;
		let mut budget_hit = false;
		for iter in 1..=maxiter {
			let cfg = &self.config;
			if let Some(max_nfev) = cfg.max_nfev {
				if nfev >= max_nfev {
					budget_hit = true;
					break;
				}
			}

			let t_gen0 = Instant::now();
			let generation = evolve_population(
				self.problem,
				&pop,
				&energies,
				&cfg.variant,
				&cfg.mutation,
				cfg.recombination,
				&mut rng,
			)?;
			if timing_enabled && (iter <= 5 || iter % 10 == 0) {
				log::info!(
					"TIMING gen {:4}: evolve={:.3} ms, F={:.3}, accepted={}/{}",
					iter,
					t_gen0.elapsed().as_secs_f64() * 1e3,
					generation.f,
					generation.accepted,
					npop
				);
			}

			nfev += generation.nfev;
			pop = generation.population;
			energies = generation.fitness;
			nit = iter;

			tracker.update(&pop, &energies);
			self.observe(&mut logbook, &tracker, iter, nfev, &energies, level);
		}
		// the budget may also be reached exactly by the last generation
		if let Some(max_nfev) = self.config.max_nfev {
			budget_hit |= nfev >= max_nfev;
		}

		let message = if budget_hit {
			format!("Evaluation budget reached: nfev={} >= max_nfev={:?}", nfev, self.config.max_nfev)
		} else {
			format!("Maximum generations reached: {}", maxiter)
		};

		let (x, fun) = match (tracker.best(), tracker.best_fitness()) {
			(Some(x), Some(f)) => (x.clone(), f),
			_ => return Err(DEError::invalid_config("population is empty")),
		};

		log::info!(
			"DE run {} finished: {} (best f={:.6e}, nfev={}, gen={})",
			self.config.n_run,
			message,
			fun,
			nfev,
			nit
		);
		if timing_enabled {
			log::info!("TIMING total: {:.3} s", t_start.elapsed().as_secs_f64());
		}

		Ok(DEReport { x, fun, nfev, nit, n_run: self.config.n_run, message, logbook })
	}

	/// Record one generation in the logbook and report it.
	fn observe(
		&mut self,
		logbook: &mut Logbook,
		tracker: &BestIndividualTracker,
		iter: usize,
		nfev: usize,
		energies: &Array1<f64>,
		level: Level,
	) {
		let stats = FitnessStats::compute(energies);
		logbook.record(iter, nfev, stats);
		log::log!(
			level,
			"{:>5} {:>6} {:>9} {:>14.6e} {:>14.6e} {:>14.6e} {:>14.6e}",
			self.config.n_run,
			iter,
			nfev,
			stats.min,
			stats.max,
			stats.mean,
			stats.std
		);
		if let (Some(cb), Some(x), Some(fun)) =
			(self.callback.as_mut(), tracker.best(), tracker.best_fitness())
		{
			cb(&DEIntermediate { x, fun, iter, nfev, stats, n_run: self.config.n_run });
		}
	}
}
