//! Differential weight (F) handling and the mutant dispatcher.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::argmin;
use crate::error::{DEError, Result};
use crate::mutant_best1::mutant_best1;
use crate::mutant_best2::mutant_best2;
use crate::mutant_rand1::mutant_rand1;
use crate::mutant_rand2::mutant_rand2;
use crate::strategy::{DiffCount, Selection, Variant};

/// Mutation setting: either a fixed factor or a uniform range (dithering)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mutation {
    /// Fixed differential weight F in (0, 2)
    Factor(f64),
    /// Dithering range [min, max] with 0 < min < max < 2, redrawn every generation
    Range { min: f64, max: f64 },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Factor(0.8)
    }
}

impl Mutation {
    /// Build a dithering range from an unordered pair.
    pub fn range(a: f64, b: f64) -> Self {
        Mutation::Range { min: a.min(b), max: a.max(b) }
    }

    pub fn validate(&self) -> Result<()> {
        let in_open = |v: f64| v > 0.0 && v < 2.0;
        match *self {
            Mutation::Factor(f) if in_open(f) => Ok(()),
            Mutation::Factor(f) => Err(DEError::InvalidMutationFactor { factor: f }),
            Mutation::Range { min, max } if in_open(min) && in_open(max) && min < max => Ok(()),
            Mutation::Range { min, max } => Err(DEError::InvalidMutationRange { min, max }),
        }
    }

    /// Weight to use for the next generation.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Mutation::Factor(f) => f,
            Mutation::Range { min, max } => rng.random_range(min..=max),
        }
    }
}

/// Build the mutant for `target` from the parent population.
///
/// The base vector is the best member (`best`) or a random member other
/// than the target (`rand`); donors are drawn without replacement and never
/// coincide with the target or the base.
pub fn mutant<R: Rng + ?Sized>(
    variant: &Variant,
    pop: &Array2<f64>,
    fitness: &Array1<f64>,
    target: usize,
    f: f64,
    rng: &mut R,
) -> Result<Array1<f64>> {
    if fitness.len() != pop.nrows() {
        return Err(DEError::DimensionMismatch { expected: pop.nrows(), got: fitness.len() });
    }
    match (variant.selection, variant.diff_count) {
        (Selection::Rand, DiffCount::One) => mutant_rand1(target, pop, f, rng),
        (Selection::Rand, DiffCount::Two) => mutant_rand2(target, pop, f, rng),
        (Selection::Best, diffs) => {
            if pop.nrows() == 0 {
                return Err(DEError::InsufficientPopulation {
                    pop_size: 0,
                    required: variant.min_population(),
                });
            }
            let (best_idx, _) = argmin(fitness);
            match diffs {
                DiffCount::One => mutant_best1(target, pop, best_idx, f, rng),
                DiffCount::Two => mutant_best2(target, pop, best_idx, f, rng),
            }
        }
    }
}
