use ndarray::{Array1, Array2};

use crate::argmin;

/// Best individual ever observed during a run.
///
/// The tracked fitness only moves down: a population whose best member is
/// worse than or equal to the tracked one leaves the tracker unchanged.
#[derive(Debug, Clone, Default)]
pub struct BestIndividualTracker {
    best: Option<(Array1<f64>, f64)>,
}

impl BestIndividualTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a population; returns `true` when the tracked best improved.
    pub fn update(&mut self, population: &Array2<f64>, fitness: &Array1<f64>) -> bool {
        if fitness.is_empty() {
            return false;
        }
        let (idx, fit) = argmin(fitness);
        let improved = match &self.best {
            Some((_, best_fit)) => fit < *best_fit,
            None => true,
        };
        if improved {
            self.best = Some((population.row(idx).to_owned(), fit));
        }
        improved
    }

    pub fn best(&self) -> Option<&Array1<f64>> {
        self.best.as_ref().map(|(x, _)| x)
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(|(_, f)| *f)
    }
}
