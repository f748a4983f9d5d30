pub mod cluster;
pub use cluster::*;

pub mod config;
pub use config::*;

pub mod kmeans;
pub use kmeans::*;

pub mod metric;
pub use metric::*;

pub mod outcome;
pub use outcome::*;

pub mod seeding;
pub use seeding::*;
