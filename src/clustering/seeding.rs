use crate::Error;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;

/// How the K initial centroids are picked out of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seeding {
    /// K distinct indices drawn uniformly. Reproducible when `seed` is set.
    Random { seed: Option<u64> },
    /// Evenly spaced indices `i * N / K`.
    Spaced,
}

impl Default for Seeding {
    fn default() -> Self {
        Self::Random { seed: None }
    }
}

impl Seeding {
    /// Choose `k` distinct indices into a dataset of `n` points.
    pub fn choose(&self, k: usize, n: usize) -> Result<Vec<usize>> {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        if k == 0 || k > n {
            return Err(Error::invalid(format!(
                "cannot seed {} clusters from {} points",
                k, n
            )));
        }
        let seeds = match self {
            Self::Spaced => (0..k).map(|i| i * n / k).collect::<Vec<usize>>(),
            Self::Random { seed } => {
                let ref mut rng = SmallRng::seed_from_u64(seed.unwrap_or_else(rand::random));
                rand::seq::index::sample(rng, n, k).into_vec()
            }
        };
        log::debug!("{:<32}{:?}", "seed indices", seeds);
        Ok(seeds)
    }
}

/// The seed contract every engine relies on: exactly `k` distinct indices in `[0, n)`.
pub fn validate_seeds(seeds: &[usize], k: usize, n: usize) -> Result<()> {
    if seeds.len() != k {
        return Err(Error::invalid(format!(
            "expected {} seeds, got {}",
            k,
            seeds.len()
        )));
    }
    if let Some(i) = seeds.iter().find(|&&i| i >= n) {
        return Err(Error::invalid(format!("seed index {} outside [0, {})", i, n)));
    }
    let mut sorted = seeds.to_vec();
    sorted.sort_unstable();
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(Error::invalid(format!("seed index {} repeated", pair[0])));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_seeds_satisfy_contract() {
        for n in [1, 2, 7, 100] {
            for k in 1..=n.min(10) {
                let seeds = Seeding::Random {
                    seed: Some(n as u64),
                }
                .choose(k, n)
                .unwrap();
                assert!(validate_seeds(&seeds, k, n).is_ok());
            }
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = Seeding::Random { seed: Some(42) }.choose(5, 50).unwrap();
        let b = Seeding::Random { seed: Some(42) }.choose(5, 50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn spaced_seeds_are_even() {
        assert_eq!(Seeding::Spaced.choose(4, 10).unwrap(), vec![0, 2, 5, 7]);
        assert_eq!(Seeding::Spaced.choose(3, 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn choose_rejects_too_many_clusters() {
        assert!(Seeding::Spaced.choose(4, 3).is_err());
        assert!(Seeding::default().choose(0, 3).is_err());
    }

    #[test]
    fn validate_rejects_bad_seeds() {
        assert!(validate_seeds(&[0, 1], 3, 5).is_err());
        assert!(validate_seeds(&[0, 5], 2, 5).is_err());
        assert!(validate_seeds(&[2, 2], 2, 5).is_err());
        assert!(validate_seeds(&[4, 0], 2, 5).is_ok());
    }
}
