use crate::Coordinate;
use crate::Energy;
use crate::Error;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;

/// Distance metric for nearest-centroid search and SSE.
///
/// Every variant is symmetric, non-negative, and zero on identical inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// sqrt(Σ (a - b)²)
    #[default]
    Euclidean,
    /// Σ |a - b|
    Manhattan,
    /// max |a - b|
    Chebyshev,
}

impl Metric {
    /// Distance between two coordinate vectors of equal length.
    pub fn distance(&self, a: &[Coordinate], b: &[Coordinate]) -> Result<Energy> {
        if a.len() == b.len() {
            Ok(self.measure(a, b))
        } else {
            Err(Error::mismatch(a.len(), b.len()))
        }
    }

    /// Unchecked distance. Callers guarantee equal lengths,
    /// which holds for anything drawn from one validated Dataset.
    pub(crate) fn measure(&self, a: &[Coordinate], b: &[Coordinate]) -> Energy {
        debug_assert_eq!(a.len(), b.len());
        let deltas = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs());
        match self {
            Self::Euclidean => deltas.map(|d| d * d).sum::<Energy>().sqrt(),
            Self::Manhattan => deltas.sum::<Energy>(),
            Self::Chebyshev => deltas.fold(0., Energy::max),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "l1" => Ok(Self::Manhattan),
            "chebyshev" | "linf" => Ok(Self::Chebyshev),
            other => Err(Error::invalid(format!("unknown metric {:?}", other))),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::Manhattan => write!(f, "manhattan"),
            Self::Chebyshev => write!(f, "chebyshev"),
        }
    }
}

/// Number of positions at which two equal-length strings differ.
pub fn hamming(a: &str, b: &str) -> Result<usize> {
    let a = a.chars().collect::<Vec<char>>();
    let b = b.chars().collect::<Vec<char>>();
    if a.len() != b.len() {
        return Err(Error::mismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: [Metric; 3] = [Metric::Euclidean, Metric::Manhattan, Metric::Chebyshev];

    #[test]
    fn is_euclidean_pythagorean() {
        let d = Metric::Euclidean.distance(&[0., 0.], &[3., 4.]).unwrap();
        assert_eq!(d, 5.);
    }

    #[test]
    fn is_manhattan_and_chebyshev_correct() {
        let a = [1., -2., 3.];
        let b = [4., 2., 3.];
        assert_eq!(Metric::Manhattan.distance(&a, &b).unwrap(), 7.);
        assert_eq!(Metric::Chebyshev.distance(&a, &b).unwrap(), 4.);
    }

    #[test]
    fn is_distance_symmetric() {
        let a = [0.25, -7.5, 3.125, 11.];
        let b = [-1.5, 2., 9.75, 0.5];
        for metric in METRICS {
            assert_eq!(
                metric.distance(&a, &b).unwrap(),
                metric.distance(&b, &a).unwrap()
            );
        }
    }

    #[test]
    fn is_distance_zero_on_identity() {
        let a = [1.5, 2.5, -3.5];
        for metric in METRICS {
            assert_eq!(metric.distance(&a, &a).unwrap(), 0.);
        }
    }

    #[test]
    fn rejects_unequal_lengths() {
        assert!(matches!(
            Metric::Euclidean.distance(&[0., 0.], &[0., 0., 0.]),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn parses_metric_names() {
        assert_eq!("Euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("l1".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert_eq!(" chebyshev ".parse::<Metric>().unwrap(), Metric::Chebyshev);
        assert!("cosine".parse::<Metric>().is_err());
    }

    #[test]
    fn counts_hamming_differences() {
        assert_eq!(hamming("karolin", "kathrin").unwrap(), 3);
        assert_eq!(hamming("", "").unwrap(), 0);
        assert!(matches!(
            hamming("abc", "ab"),
            Err(Error::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
    }
}
