use crate::Energy;
use crate::Error;
use crate::KMEANS_CLUSTER_COUNT;
use crate::KMEANS_ITERATIONS;
use crate::Metric;
use crate::Normalization;
use crate::Result;
use crate::Seeding;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// What to do when a cluster ends an assignment phase with no members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPolicy {
    /// Keep the previous centroid and carry on.
    #[default]
    Freeze,
    /// Abort the run with `Error::EmptyCluster`.
    Fail,
}

/// When the Lloyd loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Run exactly this many iterations.
    Iterations(usize),
    /// Run at most this many iterations, stopping once the relative
    /// change in total SSE between iterations is within the tolerance.
    Convergent(usize, Energy),
}

impl Termination {
    /// Upper bound on iterations.
    pub fn t(&self) -> usize {
        match self {
            Self::Iterations(t) | Self::Convergent(t, _) => *t,
        }
    }
    /// Whether the loss moving from `prev` to `next` ends the run early.
    pub fn converged(&self, prev: Energy, next: Energy) -> bool {
        match self {
            Self::Iterations(_) => false,
            Self::Convergent(_, tolerance) if prev == 0. => next <= *tolerance,
            Self::Convergent(_, tolerance) => ((prev - next) / prev).abs() <= *tolerance,
        }
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::Iterations(KMEANS_ITERATIONS)
    }
}

/// Everything needed to configure one clustering run, short of the data and seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub k: usize,
    pub metric: Metric,
    pub empty: EmptyPolicy,
    pub termination: Termination,
    pub normalization: Normalization,
    pub seeding: Seeding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: KMEANS_CLUSTER_COUNT,
            metric: Metric::default(),
            empty: EmptyPolicy::default(),
            termination: Termination::default(),
            normalization: Normalization::default(),
            seeding: Seeding::default(),
        }
    }
}

impl Config {
    /// Read a JSON configuration; absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader::<_, Self>(std::io::BufReader::new(file))?;
        log::debug!("{:<32}{}", "loaded config", path.display());
        Ok(config)
    }

    /// Checks that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::invalid("k must be at least 1"));
        }
        if self.termination.t() == 0 {
            return Err(Error::invalid("iterations must be at least 1"));
        }
        if let Termination::Convergent(_, tolerance) = self.termination {
            if !(tolerance >= 0. && tolerance.is_finite()) {
                return Err(Error::invalid(format!(
                    "tolerance {} is not a finite non-negative number",
                    tolerance
                )));
            }
        }
        Ok(())
    }
}
