use crate::Coordinate;
use crate::Error;
use crate::Point;
use crate::Result;

/// N points that all share dimension D.
///
/// Construction is the only place ragged or non-finite input is rejected;
/// everything downstream may assume `point.d() == self.d()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    dimensions: usize,
    points: Vec<Point>,
}

impl Dataset {
    /// Shape-preserving rebuild from points already known to be `dimensions` wide.
    pub(crate) fn unchecked(dimensions: usize, points: Vec<Point>) -> Self {
        debug_assert!(points.iter().all(|p| p.d() == dimensions));
        Self { dimensions, points }
    }
    /// Number of points N.
    pub fn n(&self) -> usize {
        self.points.len()
    }
    /// Dimension D shared by every point.
    pub fn d(&self) -> usize {
        self.dimensions
    }
    pub fn point(&self, i: usize) -> &Point {
        &self.points[i]
    }
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
    /// All values of dimension `d`, in point order.
    pub fn column(&self, d: usize) -> impl Iterator<Item = Coordinate> + '_ {
        self.points.iter().map(move |p| p[d])
    }
}

impl TryFrom<Vec<Point>> for Dataset {
    type Error = Error;
    fn try_from(points: Vec<Point>) -> Result<Self> {
        let dimensions = points
            .first()
            .map(Point::d)
            .ok_or_else(|| Error::invalid("dataset has no points"))?;
        if dimensions == 0 {
            return Err(Error::invalid("points have no coordinates"));
        }
        if let Some(ragged) = points.iter().find(|p| p.d() != dimensions) {
            return Err(Error::mismatch(dimensions, ragged.d()));
        }
        match points
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.iter().find(|x| !x.is_finite()).map(|&x| (i, x)))
        {
            Some((i, x)) => Err(Error::invalid(format!(
                "point {} has non-finite coordinate {}",
                i, x
            ))),
            None => Ok(Self { dimensions, points }),
        }
    }
}

impl TryFrom<Vec<Vec<Coordinate>>> for Dataset {
    type Error = Error;
    fn try_from(rows: Vec<Vec<Coordinate>>) -> Result<Self> {
        Self::try_from(rows.into_iter().map(Point::from).collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dataset() {
        let rows: Vec<Vec<Coordinate>> = vec![];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![0., 0.], vec![1., 1.], vec![2.]];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let rows = vec![vec![0., 0.], vec![x, 1.]];
            assert!(matches!(
                Dataset::try_from(rows),
                Err(Error::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn exposes_shape_and_columns() {
        let data = Dataset::try_from(vec![vec![0., 1.], vec![2., 3.], vec![4., 5.]]).unwrap();
        assert_eq!(data.n(), 3);
        assert_eq!(data.d(), 2);
        assert_eq!(data.column(1).collect::<Vec<_>>(), vec![1., 3., 5.]);
    }
}
