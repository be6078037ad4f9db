use ndarray::{Array1, Array2};
use rand::Rng;

use crate::distinct_indices::distinct_indices;
use crate::error::Result;

/// `rand/1`: random base r0 (not the target) plus `f * (r1 - r2)`.
pub fn mutant_rand1<R: Rng + ?Sized>(
    i: usize,
    pop: &Array2<f64>,
    f: f64,
    rng: &mut R,
) -> Result<Array1<f64>> {
    let idxs = distinct_indices(&[i], 3, pop.nrows(), rng)?;
    let r0 = idxs[0];
    let r1 = idxs[1];
    let r2 = idxs[2];
    Ok(&pop.row(r0) + &((&pop.row(r1) - &pop.row(r2)) * f))
}
