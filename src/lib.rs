//! Lloyd's k-means clustering over fixed-dimension numeric points.
//!
//! ## Core Types
//!
//! - [`Point`] — An immutable coordinate vector
//! - [`Dataset`] — N points sharing one dimension D
//! - [`Cluster`] — A centroid plus the points assigned to it this iteration
//! - [`KMeans`] — The engine that alternates assignment and update phases
//! - [`Metric`] — Distance used for nearest-centroid search
//!
//! ## Collaborators
//!
//! - [`Normalization`] — Column-wise transforms applied before clustering
//! - [`Seeding`] — Selection of the K initial centroid indices
//! - [`table`] — CSV input, cluster listing output, JSON reports
pub mod clustering;
pub mod dataset;
pub mod error;
pub mod normalize;
pub mod point;
pub mod table;

pub use clustering::*;
pub use dataset::*;
pub use error::*;
pub use normalize::*;
pub use point::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// A single coordinate of a point or centroid.
pub type Coordinate = f64;
/// Distances, squared errors, and convergence tolerances.
pub type Energy = f64;

// ============================================================================
// K-MEANS DEFAULTS
// ============================================================================
/// Lloyd iterations when nothing else is configured.
pub const KMEANS_ITERATIONS: usize = 16;
/// Number of clusters when nothing else is configured.
pub const KMEANS_CLUSTER_COUNT: usize = 2;

// ============================================================================
// CANCELLATION
// ============================================================================
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Cooperative cancellation flag, checked by the engine once per iteration boundary.
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Request that any run observing this flag stop at its next iteration boundary.
    pub fn trip(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn tripped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level, plus DEBUG level
/// into `file` when one is given.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter, file: Option<&std::path::Path>) -> anyhow::Result<()> {
    use anyhow::Context;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];
    if let Some(path) = file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        loggers.push(simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            config,
            file,
        ));
    }
    simplelog::CombinedLogger::init(loggers).context("initialize logger")
}

/// Trip `interrupt` when "Q" + Enter arrives on stdin.
/// The watcher thread exits quietly when stdin closes.
#[cfg(feature = "cli")]
pub fn brb(interrupt: Interrupt) {
    std::thread::spawn(move || {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().eq_ignore_ascii_case("Q") => {
                    log::warn!("graceful interrupt requested, finishing current iteration...");
                    interrupt.trip();
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}
