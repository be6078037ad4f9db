//! The problem contract seen by the optimizer: bounds, random population
//! generation, bounds repair and fitness evaluation.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DEError, Result};

/// Policy used to bring an out-of-range coordinate back into `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsRepair {
    /// Saturate at the violated bound
    #[default]
    Clip,
    /// Mirror back inside the box, folding as many times as needed
    Reflect,
}

impl BoundsRepair {
    pub fn apply(self, x: &mut Array1<f64>, lower: &Array1<f64>, upper: &Array1<f64>) {
        for i in 0..x.len() {
            x[i] = match self {
                BoundsRepair::Clip => clip(x[i], lower[i], upper[i]),
                BoundsRepair::Reflect => reflect(x[i], lower[i], upper[i]),
            };
        }
    }
}

fn clip(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

fn reflect(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if !v.is_finite() || span <= 0.0 {
        return clip(v, lo, hi);
    }
    if (lo..=hi).contains(&v) {
        return v;
    }
    let y = (v - lo).rem_euclid(2.0 * span);
    if y > span { lo + (2.0 * span - y) } else { lo + y }
}

/// A bounded, minimisation problem.
pub trait Problem {
    /// Lower and upper bound of every parameter.
    fn bounds(&self) -> (&Array1<f64>, &Array1<f64>);

    /// Objective value of one individual, lower is better.
    fn evaluate_fitness(&self, x: &Array1<f64>) -> f64;

    fn n_params(&self) -> usize {
        self.bounds().0.len()
    }

    /// Return a copy of `x` with every coordinate inside its bounds.
    fn check_bounds(&self, mut x: Array1<f64>) -> Array1<f64> {
        let (lower, upper) = self.bounds();
        BoundsRepair::Clip.apply(&mut x, lower, upper);
        x
    }

    /// Uniform random population of shape `(pop_size, n_params)`.
    fn generate_random_pop<R: Rng + ?Sized>(&self, pop_size: usize, rng: &mut R) -> Array2<f64> {
        let (lower, upper) = self.bounds();
        init_random(pop_size, lower, upper, rng)
    }
}

pub(crate) fn init_random<R: Rng + ?Sized>(
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    rng: &mut R,
) -> Array2<f64> {
    let n = lower.len();
    let mut pop = Array2::<f64>::zeros((npop, n));
    for i in 0..npop {
        for j in 0..n {
            if upper[j] > lower[j] {
                let u: f64 = rng.random::<f64>();
                pop[(i, j)] = lower[j] + u * (upper[j] - lower[j]);
            } else {
                pop[(i, j)] = lower[j]; // fixed var equals bound
            }
        }
    }
    pop
}

/// Box-bounded problem wrapping a plain objective closure.
pub struct BoundedProblem<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    func: F,
    lower: Array1<f64>,
    upper: Array1<f64>,
    repair: BoundsRepair,
}

impl<F> BoundedProblem<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Create a problem from `(lower, upper)` pairs.
    pub fn new(func: F, bounds: &[(f64, f64)]) -> Result<Self> {
        if bounds.is_empty() {
            return Err(DEError::invalid_config("problem needs at least one parameter"));
        }
        let n = bounds.len();
        let mut lower = Array1::<f64>::zeros(n);
        let mut upper = Array1::<f64>::zeros(n);
        for (i, &(lo, hi)) in bounds.iter().enumerate() {
            if !(lo.is_finite() && hi.is_finite()) || hi < lo {
                return Err(DEError::InvalidBounds { index: i, lower: lo, upper: hi });
            }
            lower[i] = lo;
            upper[i] = hi;
        }
        Ok(Self { func, lower, upper, repair: BoundsRepair::default() })
    }

    pub fn with_repair(mut self, repair: BoundsRepair) -> Self {
        self.repair = repair;
        self
    }

    pub fn repair(&self) -> BoundsRepair {
        self.repair
    }
}

impl<F> Problem for BoundedProblem<F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    fn bounds(&self) -> (&Array1<f64>, &Array1<f64>) {
        (&self.lower, &self.upper)
    }

    fn evaluate_fitness(&self, x: &Array1<f64>) -> f64 {
        (self.func)(x)
    }

    fn check_bounds(&self, mut x: Array1<f64>) -> Array1<f64> {
        self.repair.apply(&mut x, &self.lower, &self.upper);
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sum(x: &Array1<f64>) -> f64 {
        x.sum()
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = BoundedProblem::new(sum, &[(0.0, 1.0), (2.0, -2.0)]).err().unwrap();
        assert!(matches!(err, DEError::InvalidBounds { index: 1, .. }));
        assert!(BoundedProblem::new(sum, &[]).is_err());
    }

    #[test]
    fn test_clip_repair() {
        let p = BoundedProblem::new(sum, &[(-1.0, 1.0); 3]).unwrap();
        let x = p.check_bounds(Array1::from(vec![-3.0, 0.25, 7.0]));
        assert_eq!(x, Array1::from(vec![-1.0, 0.25, 1.0]));
    }

    #[test]
    fn test_reflect_repair() {
        let p = BoundedProblem::new(sum, &[(0.0, 1.0); 4])
            .unwrap()
            .with_repair(BoundsRepair::Reflect);
        let x = p.check_bounds(Array1::from(vec![1.25, -0.25, 2.5, 0.5]));
        let expected = [0.75, 0.25, 0.5, 0.5];
        for (a, b) in x.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "{a} != {b}");
        }
    }

    #[test]
    fn test_random_population_within_bounds() {
        let p = BoundedProblem::new(sum, &[(-2.0, 3.0), (4.0, 4.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let pop = p.generate_random_pop(25, &mut rng);
        assert_eq!(pop.dim(), (25, 2));
        for row in pop.rows() {
            assert!(row[0] >= -2.0 && row[0] <= 3.0);
            assert_eq!(row[1], 4.0);
        }
    }
}
