//! Reading points from delimited text and writing clustering results back out.
use crate::Cluster;
use crate::Clustering;
use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Point;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// Parse one point per row from delimited text.
///
/// Fields are trimmed and blank lines skipped. Rows of different
/// lengths are rejected as a dimension mismatch rather than by the CSV layer.
pub fn parse<R: Read>(reader: R, delimiter: u8, headers: bool) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(csv::Position::line).unwrap_or_default();
        let row = record
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|source| Error::Parse {
                    line,
                    value: field.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Dataset::try_from(rows)
}

/// Load a dataset from a delimited text file.
pub fn load(path: &Path, delimiter: u8, headers: bool) -> Result<Dataset> {
    log::info!("{:<32}{}", "reading points", path.display());
    let data = parse(std::fs::File::open(path)?, delimiter, headers)?;
    log::info!("{:<32}{}", "points read", format!("n={} d={}", data.n(), data.d()));
    Ok(data)
}

/// One line per member, `c1, c2, ..., cD, j`, where `j` is the 1-based
/// cluster index. Lines are grouped by cluster in cluster order.
pub fn write_listing<W: Write>(writer: &mut W, clusters: &[Cluster]) -> Result<()> {
    for cluster in clusters {
        for point in cluster.members() {
            writeln!(writer, "{}, {}", point, cluster.index() + 1)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write the member listing to `path`, replacing any existing file.
pub fn save_listing(path: &Path, clusters: &[Cluster]) -> Result<()> {
    log::info!("{:<32}{}", "writing listing", path.display());
    let ref mut writer = BufWriter::new(std::fs::File::create(path)?);
    write_listing(writer, clusters)
}

/// Per-cluster figures for the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// 1-based, matching the listing.
    pub cluster: usize,
    pub size: usize,
    pub sse: Energy,
    pub centroid: Point,
}

impl From<&Cluster<'_>> for Summary {
    fn from(cluster: &Cluster) -> Self {
        Self {
            cluster: cluster.index() + 1,
            size: cluster.len(),
            sse: cluster.sum_squared_error(),
            centroid: cluster.centroid().clone(),
        }
    }
}

/// Machine-readable digest of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub n: usize,
    pub d: usize,
    pub k: usize,
    pub iterations: usize,
    pub sse: Energy,
    pub losses: Vec<Energy>,
    pub clusters: Vec<Summary>,
}

impl Report {
    pub fn new(data: &Dataset, clustering: &Clustering) -> Self {
        Self {
            n: data.n(),
            d: data.d(),
            k: clustering.k(),
            iterations: clustering.iterations(),
            sse: clustering.loss(),
            losses: clustering.losses().to_vec(),
            clusters: clustering.clusters().iter().map(Summary::from).collect(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        log::info!("{:<32}{}", "writing report", path.display());
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
