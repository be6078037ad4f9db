use ndarray::Array1;
use rand::Rng;

/// Binomial crossover.
///
/// A forced index `jrand` is drawn first, then one uniform draw per
/// coordinate; coordinate `j` comes from the mutant when the draw is below
/// `cr` or `j == jrand`, so the trial differs from the target in at least
/// one position.
pub fn binomial_crossover<R: Rng + ?Sized>(
    target: &Array1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let jrand = rng.random_range(0..n);
    let mut trial = target.clone();
    for j in 0..n {
        let u = rng.random::<f64>();
        if u < cr || j == jrand {
            trial[j] = mutant[j];
        }
    }
    trial
}
