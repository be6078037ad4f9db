use ndarray::{Array1, Array2};
use rand::Rng;

use crate::distinct_indices::distinct_indices;
use crate::error::Result;

pub fn mutant_best2<R: Rng + ?Sized>(
    i: usize,
    pop: &Array2<f64>,
    best_idx: usize,
    f: f64,
    rng: &mut R,
) -> Result<Array1<f64>> {
    let idxs = distinct_indices(&[i, best_idx], 4, pop.nrows(), rng)?;
    let r0 = idxs[0];
    let r1 = idxs[1];
    let r2 = idxs[2];
    let r3 = idxs[3];
    Ok(&pop.row(best_idx)
        + &((&pop.row(r0) + &pop.row(r1) - &pop.row(r2) - &pop.row(r3)) * f))
}
