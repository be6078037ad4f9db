use ndarray::Array1;
use rand::Rng;

/// Exponential crossover: copy a contiguous, wrapping run of mutant
/// coordinates starting at a random index. The run continues while a fresh
/// draw stays below `cr`, and never exceeds `n` coordinates.
pub fn exponential_crossover<R: Rng + ?Sized>(
    target: &Array1<f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let mut trial = target.clone();
    let mut j = rng.random_range(0..n);
    let mut l = 0usize;
    // ensure at least one parameter from mutant
    loop {
        trial[j] = mutant[j];
        l += 1;
        j = (j + 1) % n;
        if l >= n || rng.random::<f64>() >= cr {
            break;
        }
    }
    trial
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_copied_block_is_contiguous_with_wraparound() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 7;
        let target = Array1::from(vec![0.0; n]);
        let mutant = Array1::from(vec![1.0; n]);
        for _ in 0..100 {
            let trial = exponential_crossover(&target, &mutant, 0.6, &mut rng);
            let copied: Vec<bool> = trial.iter().map(|&v| v == 1.0).collect();
            let count = copied.iter().filter(|&&c| c).count();
            assert!(count >= 1);
            if count < n {
                // exactly one transition from copied to not-copied around the ring
                let ends = (0..n).filter(|&j| copied[j] && !copied[(j + 1) % n]).count();
                assert_eq!(ends, 1);
            }
        }
    }

    #[test]
    fn test_zero_rate_copies_one_and_full_rate_copies_all() {
        let mut rng = StdRng::seed_from_u64(12);
        let target = Array1::from(vec![0.0; 4]);
        let mutant = Array1::from(vec![1.0; 4]);
        let t0 = exponential_crossover(&target, &mutant, 0.0, &mut rng);
        assert_eq!(t0.sum(), 1.0);
        let t1 = exponential_crossover(&target, &mutant, 1.0, &mut rng);
        assert_eq!(t1, mutant);
    }
}
