use ndarray::{Array1, Array2};
use rand::Rng;

use crate::distinct_indices::distinct_indices;
use crate::error::Result;

/// `best/1`: best member plus `f * (r0 - r1)`, donors distinct from target and best.
pub fn mutant_best1<R: Rng + ?Sized>(
    i: usize,
    pop: &Array2<f64>,
    best_idx: usize,
    f: f64,
    rng: &mut R,
) -> Result<Array1<f64>> {
    let idxs = distinct_indices(&[i, best_idx], 2, pop.nrows(), rng)?;
    let r0 = idxs[0];
    let r1 = idxs[1];
    Ok(&pop.row(best_idx) + &((&pop.row(r0) - &pop.row(r1)) * f))
}
