use super::*;
use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Interrupt;
use crate::Point;
use crate::Result;
use rayon::prelude::*;

/// Lloyd's k-means over a borrowed dataset.
///
/// One engine is one run: it owns its K clusters and its loss history,
/// and holds nothing process-wide, so independent runs may proceed
/// concurrently over the same data.
///
/// Each iteration is
/// 1. clear the previous iteration's members,
/// 2. assign every point to its nearest centroid (ties go to the lowest index),
/// 3. move every centroid to the mean of its members,
/// 4. record the total SSE.
///
/// Members are therefore cleared between iterations but retained after
/// the final one.
pub struct KMeans<'a> {
    data: &'a Dataset,
    config: Config,
    clusters: Vec<Cluster<'a>>,
    assignments: Vec<usize>,
    losses: Vec<Energy>,
    interrupt: Option<Interrupt>,
}

impl<'a> KMeans<'a> {
    /// Seed one cluster per index in `seeds`, after checking
    /// `1 <= k <= N`, at least one iteration, and k distinct in-range seeds.
    pub fn new(data: &'a Dataset, config: Config, seeds: &[usize]) -> Result<Self> {
        config.validate()?;
        if config.k > data.n() {
            return Err(Error::invalid(format!(
                "k = {} exceeds the {} points available",
                config.k,
                data.n()
            )));
        }
        validate_seeds(seeds, config.k, data.n())?;
        let clusters = seeds
            .iter()
            .enumerate()
            .map(|(j, &i)| Cluster::new(j, data.point(i), config.metric))
            .collect::<Vec<Cluster<'a>>>();
        Ok(Self {
            data,
            config,
            clusters,
            assignments: Vec::new(),
            losses: Vec::new(),
            interrupt: None,
        })
    }

    /// Observe `interrupt` at every iteration boundary.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn clusters(&self) -> &[Cluster<'a>] {
        &self.clusters
    }
    /// Total SSE after each completed iteration.
    pub fn losses(&self) -> &[Energy] {
        &self.losses
    }
    /// Cluster index of every point, as of the last assignment phase.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Nearest cluster to `point` and the distance to its centroid.
    /// Scans centroids in index order and only moves on a strict improvement,
    /// so equidistant clusters resolve to the lowest index.
    pub fn neighbor(&self, point: &Point) -> Result<(usize, Energy)> {
        if point.d() == self.data.d() {
            Ok(self.nearest(point))
        } else {
            Err(Error::mismatch(self.data.d(), point.d()))
        }
    }

    fn nearest(&self, point: &Point) -> (usize, Energy) {
        self.clusters
            .iter()
            .map(|c| self.config.metric.measure(point, c.centroid()))
            .enumerate()
            .fold((0, Energy::INFINITY), |(j, best), (i, d)| {
                if d < best { (i, d) } else { (j, best) }
            })
    }

    /// Nearest cluster of every point against the current centroids.
    /// Reads centroids only, so repeated calls agree until the next update.
    pub fn assign(&self) -> Vec<usize> {
        self.data
            .points()
            .par_iter()
            .map(|p| self.nearest(p).0)
            .collect()
    }

    /// Sum of every cluster's SSE against its current members.
    pub fn loss(&self) -> Energy {
        self.clusters.iter().map(Cluster::sum_squared_error).sum()
    }

    /// One full Lloyd iteration. Returns the total SSE.
    pub fn step(&mut self) -> Result<Energy> {
        self.clusters.iter_mut().for_each(Cluster::clear_points);
        let data = self.data;
        self.assignments = self.assign();
        for (point, &j) in data.iter().zip(self.assignments.iter()) {
            self.clusters[j].insert(point)?;
        }
        for cluster in self.clusters.iter_mut() {
            match cluster.calc_centroid() {
                Ok(()) => {}
                Err(Error::EmptyCluster(j)) if self.config.empty == EmptyPolicy::Freeze => {
                    log::warn!("{:<32}{:<32}", "empty cluster frozen", j)
                }
                Err(e) => return Err(e),
            }
        }
        for cluster in self.clusters.iter() {
            log::debug!(
                "{:<32}{:<32}",
                format!("cluster {} sse", cluster.index() + 1),
                cluster.sum_squared_error()
            );
        }
        let loss = self.loss();
        self.losses.push(loss);
        log::info!(
            "{:<32}{:<32}",
            format!("iteration {} total sse", self.losses.len()),
            loss
        );
        Ok(loss)
    }

    /// Iterate until the configured termination, then hand back the result.
    pub fn run(mut self) -> Result<Clustering<'a>> {
        log::info!(
            "{:<32}{:<32}",
            "kmeans iterating",
            format!("k={} n={} d={}", self.config.k, self.data.n(), self.data.d())
        );
        for t in 0..self.config.termination.t() {
            if self.interrupt.as_ref().is_some_and(Interrupt::tripped) {
                return Err(Error::Interrupted(t + 1));
            }
            let prev = self.losses.last().copied();
            let next = self.step()?;
            if prev.is_some_and(|prev| self.config.termination.converged(prev, next)) {
                log::info!("{:<32}{:<32}", "kmeans converged", t + 1);
                break;
            }
        }
        Ok(Clustering::from(self))
    }
}

impl<'a> From<KMeans<'a>> for Clustering<'a> {
    fn from(kmeans: KMeans<'a>) -> Self {
        Self::new(kmeans.clusters, kmeans.assignments, kmeans.losses)
    }
}

/// Cluster `data` into `k` groups over exactly `iterations` Lloyd iterations,
/// starting from the points at `seeds`, with Euclidean distance.
pub fn kmeans<'a>(
    data: &'a Dataset,
    k: usize,
    iterations: usize,
    seeds: &[usize],
) -> Result<Vec<Cluster<'a>>> {
    let config = Config {
        k,
        termination: Termination::Iterations(iterations),
        ..Config::default()
    };
    Ok(KMeans::new(data, config, seeds)?.run()?.into_clusters())
}
