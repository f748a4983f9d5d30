//! Column-wise rescaling applied to a dataset before it is clustered.
//!
//! Every transform looks at one dimension at a time across all points.
//! Whenever a transform would divide by zero (a constant column, an
//! all-zero column) that column maps to 0 instead.
use crate::Coordinate;
use crate::Dataset;
use crate::Error;
use crate::Point;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Leave the data as read.
    #[default]
    None,
    /// (x - min) / (max - min)
    MinMax,
    /// x / max
    MaxNorm,
    /// x / (max - min)
    RangeNorm,
    /// (x - mean) / s, with s the sample standard deviation
    ZScore,
    /// x / sqrt(Σ x²)
    EuclidNorm,
    /// 0-based rank within the column; ties share their average rank
    Rank,
}

impl Normalization {
    /// A rescaled copy of `data`. The input is left untouched.
    pub fn apply(&self, data: &Dataset) -> Dataset {
        if let Self::None = self {
            return data.clone();
        }
        log::info!("{:<32}{:<32}", "normalizing", self);
        let columns = (0..data.d())
            .map(|d| data.column(d).collect::<Vec<Coordinate>>())
            .map(|column| self.column(&column))
            .collect::<Vec<Vec<Coordinate>>>();
        let points = (0..data.n())
            .map(|i| columns.iter().map(|c| c[i]).collect::<Vec<_>>())
            .map(Point::from)
            .collect::<Vec<Point>>();
        Dataset::unchecked(data.d(), points)
    }

    fn column(&self, xs: &[Coordinate]) -> Vec<Coordinate> {
        let min = xs.iter().copied().fold(Coordinate::INFINITY, Coordinate::min);
        let max = xs.iter().copied().fold(Coordinate::NEG_INFINITY, Coordinate::max);
        match self {
            Self::None => xs.to_vec(),
            Self::MinMax => Self::scale(xs, min, max - min),
            Self::MaxNorm => Self::scale(xs, 0., max),
            Self::RangeNorm => Self::scale(xs, 0., max - min),
            Self::ZScore => Self::zscore(xs),
            Self::EuclidNorm => {
                let norm = xs.iter().map(|x| x * x).sum::<Coordinate>().sqrt();
                Self::scale(xs, 0., norm)
            }
            Self::Rank => Self::rank(xs),
        }
    }

    /// (x - shift) / divisor, or 0 everywhere for a zero divisor
    fn scale(xs: &[Coordinate], shift: Coordinate, divisor: Coordinate) -> Vec<Coordinate> {
        if divisor == 0. {
            vec![0.; xs.len()]
        } else {
            xs.iter().map(|x| (x - shift) / divisor).collect()
        }
    }

    fn zscore(xs: &[Coordinate]) -> Vec<Coordinate> {
        if xs.len() < 2 {
            return vec![0.; xs.len()];
        }
        let n = xs.len() as Coordinate;
        let mean = xs.iter().sum::<Coordinate>() / n;
        let variance = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<Coordinate>() / (n - 1.);
        Self::scale(xs, mean, variance.sqrt())
    }

    fn rank(xs: &[Coordinate]) -> Vec<Coordinate> {
        let mut sorted = xs.to_vec();
        sorted.sort_by(Coordinate::total_cmp);
        xs.iter()
            .map(|x| {
                let lo = sorted.partition_point(|y| y.total_cmp(x).is_lt());
                let hi = sorted.partition_point(|y| y.total_cmp(x).is_le());
                (lo + hi - 1) as Coordinate / 2.
            })
            .collect()
    }
}

impl std::str::FromStr for Normalization {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "none" => Ok(Self::None),
            "min-max" | "minmax" => Ok(Self::MinMax),
            "max-norm" | "max" => Ok(Self::MaxNorm),
            "range-norm" | "range" => Ok(Self::RangeNorm),
            "z-score" | "zscore" => Ok(Self::ZScore),
            "euclid-norm" | "euclid" => Ok(Self::EuclidNorm),
            "rank" | "ranked" => Ok(Self::Rank),
            other => Err(Error::invalid(format!("unknown normalization {:?}", other))),
        }
    }
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::MinMax => write!(f, "min-max"),
            Self::MaxNorm => write!(f, "max-norm"),
            Self::RangeNorm => write!(f, "range-norm"),
            Self::ZScore => write!(f, "z-score"),
            Self::EuclidNorm => write!(f, "euclid-norm"),
            Self::Rank => write!(f, "rank"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Dataset {
        Dataset::try_from(vec![
            vec![1., 10., 7.],
            vec![3., 20., 7.],
            vec![5., 20., 7.],
            vec![7., 30., 7.],
        ])
        .unwrap()
    }

    fn column(data: &Dataset, d: usize) -> Vec<Coordinate> {
        data.column(d).collect()
    }

    #[test]
    fn none_is_identity() {
        let ref data = data();
        assert_eq!(&Normalization::None.apply(data), data);
    }

    #[test]
    fn min_max_spans_unit_interval() {
        let ref norm = Normalization::MinMax.apply(&data());
        assert_eq!(column(norm, 0), vec![0., 1. / 3., 2. / 3., 1.]);
        assert_eq!(column(norm, 1), vec![0., 0.5, 0.5, 1.]);
        assert_eq!(column(norm, 2), vec![0.; 4]);
    }

    #[test]
    fn max_norm_divides_by_column_max() {
        let ref norm = Normalization::MaxNorm.apply(&data());
        assert_eq!(column(norm, 1), vec![1. / 3., 2. / 3., 2. / 3., 1.]);
        assert_eq!(column(norm, 2), vec![1.; 4]);
    }

    #[test]
    fn range_norm_divides_by_range() {
        let ref norm = Normalization::RangeNorm.apply(&data());
        assert_eq!(column(norm, 0), vec![1. / 6., 3. / 6., 5. / 6., 7. / 6.]);
        assert_eq!(column(norm, 2), vec![0.; 4]);
    }

    #[test]
    fn z_score_centers_and_scales() {
        let ref norm = Normalization::ZScore.apply(&data());
        let xs = column(norm, 0);
        let mean = xs.iter().sum::<f64>() / 4.;
        let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / 3.;
        assert!(mean.abs() < 1e-12);
        assert!((var - 1.).abs() < 1e-12);
        assert_eq!(column(norm, 2), vec![0.; 4]);
    }

    #[test]
    fn z_score_of_single_point_is_zero() {
        let ref data = Dataset::try_from(vec![vec![4., -2.]]).unwrap();
        let ref norm = Normalization::ZScore.apply(data);
        assert_eq!(norm.point(0).coordinates(), &[0., 0.]);
    }

    #[test]
    fn euclid_norm_gives_unit_columns() {
        let ref norm = Normalization::EuclidNorm.apply(&data());
        for d in 0..norm.d() {
            let length = column(norm, d).iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((length - 1.).abs() < 1e-12);
        }
    }

    #[test]
    fn euclid_norm_of_zero_column_is_zero() {
        let ref data = Dataset::try_from(vec![vec![0., 1.], vec![0., 2.]]).unwrap();
        let ref norm = Normalization::EuclidNorm.apply(data);
        assert_eq!(column(norm, 0), vec![0., 0.]);
    }

    #[test]
    fn rank_averages_ties() {
        let ref norm = Normalization::Rank.apply(&data());
        assert_eq!(column(norm, 0), vec![0., 1., 2., 3.]);
        assert_eq!(column(norm, 1), vec![0., 1.5, 1.5, 3.]);
        assert_eq!(column(norm, 2), vec![1.5; 4]);
    }

    #[test]
    fn rank_ignores_input_order() {
        let ref data = Dataset::try_from(vec![vec![9.], vec![-1.], vec![4.]]).unwrap();
        let ref norm = Normalization::Rank.apply(data);
        assert_eq!(column(norm, 0), vec![2., 0., 1.]);
    }

    #[test]
    fn input_is_not_mutated() {
        let ref data = data();
        let before = data.clone();
        let _ = Normalization::MinMax.apply(data);
        let _ = Normalization::MaxNorm.apply(data);
        assert_eq!(data, &before);
    }

    #[test]
    fn parses_names() {
        assert_eq!("min_max".parse::<Normalization>().unwrap(), Normalization::MinMax);
        assert_eq!("Z-Score".parse::<Normalization>().unwrap(), Normalization::ZScore);
        assert_eq!("rank".parse::<Normalization>().unwrap(), Normalization::Rank);
        assert!("softmax".parse::<Normalization>().is_err());
    }
}
