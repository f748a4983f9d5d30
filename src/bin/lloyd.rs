//! Lloyd Binary
//!
//! Clusters the points of a delimited text file and writes every point
//! back out with the 1-based index of the cluster it landed in.
//!
//! Type "Q" + Enter while it runs to stop at the next iteration boundary.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use lloyd::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Cluster delimited points with Lloyd's k-means", long_about = None)]
struct Args {
    #[arg(required = true, help = "Delimited text file, one point per row")]
    input: PathBuf,
    #[arg(required = true, help = "Listing to write: coordinates then cluster index")]
    output: PathBuf,
    #[arg(required = true, help = "Number of clusters")]
    k: usize,
    #[arg(required = true, help = "Number of iterations (an upper bound with --tolerance)")]
    iterations: usize,
    #[arg(long, help = "JSON configuration; flags given here take precedence")]
    config: Option<PathBuf>,
    #[arg(long, help = "euclidean | manhattan | chebyshev")]
    metric: Option<Metric>,
    #[arg(
        long,
        help = "none | min-max | max-norm | range-norm | z-score | euclid-norm | rank"
    )]
    normalize: Option<Normalization>,
    #[arg(long, conflicts_with = "spaced", help = "Seed for random centroid selection")]
    seed: Option<u64>,
    #[arg(long, help = "Seed centroids at evenly spaced points instead of randomly")]
    spaced: bool,
    #[arg(long, help = "Stop once total SSE changes by at most this fraction")]
    tolerance: Option<Energy>,
    #[arg(long, help = "Fail instead of freezing a cluster that loses all its points")]
    fail_empty: bool,
    #[arg(long, default_value_t = ',', help = "Field delimiter of the input")]
    delimiter: char,
    #[arg(long, help = "Skip the first row of the input")]
    headers: bool,
    #[arg(long, help = "Also write a JSON summary of the run here")]
    report: Option<PathBuf>,
    #[arg(long, help = "Also write DEBUG logs here")]
    log_file: Option<PathBuf>,
    #[arg(long, help = "Worker threads for the assignment phase [default: all cores]")]
    threads: Option<usize>,
    #[arg(short, long, action = clap::ArgAction::Count, help = "More logging (-v, -vv)")]
    verbose: u8,
}

impl Args {
    fn level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    fn delimiter(&self) -> anyhow::Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter {:?} is not a single ASCII byte", self.delimiter))
    }

    /// File configuration, if any, overridden by whatever was passed on the command line.
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => Config::default(),
        };
        let tolerance = match config.termination {
            Termination::Convergent(_, tolerance) => self.tolerance.or(Some(tolerance)),
            Termination::Iterations(_) => self.tolerance,
        };
        config.k = self.k;
        config.termination = match tolerance {
            Some(tolerance) => Termination::Convergent(self.iterations, tolerance),
            None => Termination::Iterations(self.iterations),
        };
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(normalization) = self.normalize {
            config.normalization = normalization;
        }
        if self.spaced {
            config.seeding = Seeding::Spaced;
        } else if let Some(seed) = self.seed {
            config.seeding = Seeding::Random { seed: Some(seed) };
        }
        if self.fail_empty {
            config.empty = EmptyPolicy::Fail;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(args.level(), args.log_file.as_deref())?;
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.unwrap_or_else(num_cpus::get))
        .build_global()
        .context("configure thread pool")?;
    let config = args.config()?;
    let raw = table::load(&args.input, args.delimiter()?, args.headers)
        .with_context(|| format!("read points from {}", args.input.display()))?;
    let ref data = config.normalization.apply(&raw);
    let seeds = config.seeding.choose(config.k, data.n())?;
    let interrupt = Interrupt::default();
    brb(interrupt.clone());
    let clustering = KMeans::new(data, config, &seeds)?
        .with_interrupt(interrupt)
        .run()?;

    println!("{}", "Clustering complete. Final centroids:".bold());
    for cluster in clustering.clusters() {
        println!(
            "{:<16}{:>8} points    {}",
            format!("centroid {}", cluster.index() + 1).green(),
            cluster.len(),
            cluster.centroid()
        );
    }
    println!("{:<16}{}", "total sse".cyan(), clustering.loss());

    table::save_listing(&args.output, clustering.clusters())
        .with_context(|| format!("write listing to {}", args.output.display()))?;
    if let Some(ref path) = args.report {
        table::Report::new(data, &clustering)
            .save(path)
            .with_context(|| format!("write report to {}", path.display()))?;
    }
    Ok(())
}
