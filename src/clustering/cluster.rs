use crate::Energy;
use crate::Error;
use crate::Metric;
use crate::Point;
use crate::Result;

/// A centroid together with the points assigned to it during the current iteration.
///
/// Members are borrowed from the dataset being clustered, so a Cluster
/// never outlives the data it partitions. The centroid is always D-dimensional:
/// it starts as a copy of a seed point and is only ever replaced by a mean of
/// D-dimensional members.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    index: usize,
    metric: Metric,
    centroid: Point,
    members: Vec<&'a Point>,
}

impl<'a> Cluster<'a> {
    /// A cluster at position `index` whose initial centroid is a copy of `seed`.
    pub fn new(index: usize, seed: &Point, metric: Metric) -> Self {
        Self {
            index,
            metric,
            centroid: seed.clone(),
            members: Vec::new(),
        }
    }

    /// Position of this cluster in its engine, 0-based.
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn centroid(&self) -> &Point {
        &self.centroid
    }
    pub fn members(&self) -> &[&'a Point] {
        &self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
    /// Dimension D of the centroid and of every admissible member.
    pub fn d(&self) -> usize {
        self.centroid.d()
    }

    /// Assign a point to this cluster for the current iteration.
    pub fn insert(&mut self, point: &'a Point) -> Result<()> {
        if point.d() != self.d() {
            return Err(Error::mismatch(self.d(), point.d()));
        }
        self.members.push(point);
        Ok(())
    }

    /// Forget this iteration's members. The centroid is untouched.
    pub fn clear_points(&mut self) {
        self.members.clear();
    }

    /// Move the centroid to the arithmetic mean of the current members.
    ///
    /// With no members the mean is undefined: the centroid is left exactly
    /// where it was and `EmptyCluster` is returned, so no NaN ever leaks out.
    pub fn calc_centroid(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyCluster(self.index));
        }
        let n = self.len() as Energy;
        let sums = self
            .members
            .iter()
            .fold(vec![0.; self.d()], |mut sums, point| {
                sums.iter_mut().zip(point.iter()).for_each(|(s, x)| *s += x);
                sums
            });
        self.centroid = sums.into_iter().map(|s| s / n).collect::<Vec<_>>().into();
        Ok(())
    }

    /// Σ distance(member, centroid)² over the current members.
    pub fn sum_squared_error(&self) -> Energy {
        self.members
            .iter()
            .map(|point| self.metric.measure(point, &self.centroid))
            .map(|d| d * d)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point> {
        vec![
            Point::from([1., 2., 3.]),
            Point::from([3., 2., 1.]),
            Point::from([2., 8., -4.]),
        ]
    }

    #[test]
    fn centroid_is_member_mean() {
        let ref points = points();
        let mut cluster = Cluster::new(0, &points[0], Metric::Euclidean);
        points.iter().for_each(|p| cluster.insert(p).unwrap());
        cluster.calc_centroid().unwrap();
        for d in 0..cluster.d() {
            let mean = points.iter().map(|p| p[d]).sum::<Energy>() / points.len() as Energy;
            assert_eq!(cluster.centroid()[d], mean);
        }
    }

    #[test]
    fn empty_cluster_keeps_centroid() {
        let ref seed = Point::from([4., -1.]);
        let mut cluster = Cluster::new(3, seed, Metric::Euclidean);
        assert!(matches!(cluster.calc_centroid(), Err(Error::EmptyCluster(3))));
        assert_eq!(cluster.centroid(), seed);
        assert!(cluster.centroid().iter().all(|x| x.is_finite()));
    }

    #[test]
    fn insert_rejects_wrong_dimension() {
        let ref seed = Point::from([0., 0.]);
        let ref wrong = Point::from([1., 1., 1.]);
        let mut cluster = Cluster::new(0, seed, Metric::Euclidean);
        assert!(matches!(
            cluster.insert(wrong),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
        assert!(cluster.is_empty());
    }

    #[test]
    fn clear_points_keeps_centroid() {
        let ref points = points();
        let mut cluster = Cluster::new(0, &points[2], Metric::Euclidean);
        points.iter().for_each(|p| cluster.insert(p).unwrap());
        cluster.calc_centroid().unwrap();
        let centroid = cluster.centroid().clone();
        cluster.clear_points();
        assert!(cluster.is_empty());
        assert_eq!(cluster.centroid(), &centroid);
    }

    #[test]
    fn sse_sums_squared_distances() {
        let ref a = Point::from([0., 0.]);
        let ref b = Point::from([0., 2.]);
        let mut cluster = Cluster::new(0, a, Metric::Euclidean);
        cluster.insert(a).unwrap();
        cluster.insert(b).unwrap();
        assert_eq!(cluster.sum_squared_error(), 4.);
        cluster.calc_centroid().unwrap();
        assert_eq!(cluster.centroid(), &Point::from([0., 1.]));
        assert_eq!(cluster.sum_squared_error(), 2.);
    }

    #[test]
    fn sse_of_empty_cluster_is_zero() {
        let ref seed = Point::from([1., 1.]);
        assert_eq!(Cluster::new(0, seed, Metric::Manhattan).sum_squared_error(), 0.);
    }
}
