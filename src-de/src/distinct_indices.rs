use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{DEError, Result};

/// Draw `count` distinct indices from `0..pool_size`, none of them in `exclude`.
///
/// Sampling is without replacement; when the pool cannot supply enough
/// indices this fails instead of returning duplicates.
pub fn distinct_indices<R: Rng + ?Sized>(
    exclude: &[usize],
    count: usize,
    pool_size: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let mut excluded: Vec<usize> = exclude.iter().copied().filter(|&e| e < pool_size).collect();
    excluded.sort_unstable();
    excluded.dedup();
    if pool_size - excluded.len() < count {
        return Err(DEError::InsufficientPopulation {
            pop_size: pool_size,
            required: count + excluded.len(),
        });
    }
    // Generate a shuffled pool and take the first `count` not excluded
    let mut idxs: Vec<usize> = (0..pool_size).collect();
    idxs.shuffle(rng);
    let out: Vec<usize> = idxs
        .into_iter()
        .filter(|idx| excluded.binary_search(idx).is_err())
        .take(count)
        .collect();
    Ok(out)
}
