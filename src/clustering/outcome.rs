use super::*;
use crate::Energy;
use crate::Point;

/// The final state of a k-means run.
///
/// Clusters carry their final centroids and the members from the last
/// assignment phase; `assignments` is the same partition indexed by point.
#[derive(Debug, Clone)]
pub struct Clustering<'a> {
    clusters: Vec<Cluster<'a>>,
    assignments: Vec<usize>,
    losses: Vec<Energy>,
}

impl<'a> Clustering<'a> {
    pub(crate) fn new(
        clusters: Vec<Cluster<'a>>,
        assignments: Vec<usize>,
        losses: Vec<Energy>,
    ) -> Self {
        Self {
            clusters,
            assignments,
            losses,
        }
    }

    pub fn k(&self) -> usize {
        self.clusters.len()
    }
    pub fn clusters(&self) -> &[Cluster<'a>] {
        &self.clusters
    }
    pub fn into_clusters(self) -> Vec<Cluster<'a>> {
        self.clusters
    }
    /// Cluster index of every point, in dataset order.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }
    /// Total SSE after each iteration that ran.
    pub fn losses(&self) -> &[Energy] {
        &self.losses
    }
    /// Iterations actually run, which is fewer than configured after early convergence.
    pub fn iterations(&self) -> usize {
        self.losses.len()
    }
    /// Total SSE after the final iteration.
    pub fn loss(&self) -> Energy {
        self.losses.last().copied().unwrap_or_default()
    }
    pub fn centroids(&self) -> impl Iterator<Item = &Point> {
        self.clusters.iter().map(Cluster::centroid)
    }
}
