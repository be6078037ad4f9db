//! One generation of mutation, crossover, bounds repair and greedy selection.

use ndarray::{Array1, Array2};
use rand::Rng;

use crate::crossover_binomial::binomial_crossover;
use crate::crossover_exponential::exponential_crossover;
use crate::error::{DEError, Result};
use crate::mutation::{Mutation, mutant};
use crate::problem::Problem;
use crate::strategy::{Crossover, Variant};

/// Offspring of one generation. The buffers are owned and never alias the parents.
#[derive(Debug, Clone)]
pub struct Generation {
    pub population: Array2<f64>,
    pub fitness: Array1<f64>,
    /// Objective evaluations spent, always the population size
    pub nfev: usize,
    /// Differential weight used for this generation
    pub f: f64,
    /// Number of trials that replaced their target
    pub accepted: usize,
}

/// Recombine `target` and `mutant` into a trial vector.
pub fn crossover<R: Rng + ?Sized>(
    kind: Crossover,
    target: &Array1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Result<Array1<f64>> {
    if target.len() != mutant.len() {
        return Err(DEError::DimensionMismatch { expected: target.len(), got: mutant.len() });
    }
    if target.is_empty() {
        return Ok(target.clone());
    }
    Ok(match kind {
        Crossover::Binomial => binomial_crossover(target, mutant, cr, rng),
        Crossover::Exponential => exponential_crossover(target, mutant, cr, rng),
    })
}

pub(crate) fn checked_fitness<P: Problem + ?Sized>(
    problem: &P,
    x: &Array1<f64>,
    index: usize,
) -> Result<f64> {
    let value = problem.evaluate_fitness(x);
    if value.is_nan() {
        return Err(DEError::InvalidFitness { index, value });
    }
    Ok(value)
}

/// Evolve `population` for one generation.
///
/// Mutants are always built from the parent population and fitness; the
/// selection is strict, so a trial that only ties its target is rejected.
pub fn evolve_population<P, R>(
    problem: &P,
    population: &Array2<f64>,
    fitness: &Array1<f64>,
    variant: &Variant,
    mutation: &Mutation,
    cr: f64,
    rng: &mut R,
) -> Result<Generation>
where
    P: Problem + ?Sized,
    R: Rng + ?Sized,
{
    let npop = population.nrows();
    if fitness.len() != npop {
        return Err(DEError::DimensionMismatch { expected: npop, got: fitness.len() });
    }
    mutation.validate()?;
    if !(0.0..=1.0).contains(&cr) {
        return Err(DEError::InvalidCrossoverRate { rate: cr });
    }
    let f = mutation.sample(rng);

    let mut offspring = population.clone();
    let mut fit_offspring = fitness.clone();
    let mut accepted = 0;

    for i in 0..npop {
        let mutated = mutant(variant, population, fitness, i, f, rng)?;
        let target = population.row(i).to_owned();
        let trial = crossover(variant.crossover, &target, &mutated, cr, rng)?;
        let trial = problem.check_bounds(trial);

        let fit_trial = checked_fitness(problem, &trial, i)?;
        if fit_trial < fit_offspring[i] {
            offspring.row_mut(i).assign(&trial);
            fit_offspring[i] = fit_trial;
            accepted += 1;
        }
    }

    Ok(Generation { population: offspring, fitness: fit_offspring, nfev: npop, f, accepted })
}
