use crate::Coordinate;
use serde::Deserialize;
use serde::Serialize;
use std::ops::Deref;

/// An ordered vector of coordinates.
///
/// Points read from input are never mutated; centroids are Points
/// that the owning cluster replaces wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(Vec<Coordinate>);

impl Point {
    /// Dimension D of this point.
    pub fn d(&self) -> usize {
        self.0.len()
    }
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }
}

impl Deref for Point {
    type Target = [Coordinate];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Coordinate>> for Point {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }
}

impl<const D: usize> From<[Coordinate; D]> for Point {
    fn from(coordinates: [Coordinate; D]) -> Self {
        Self(coordinates.to_vec())
    }
}

impl From<Point> for Vec<Coordinate> {
    fn from(point: Point) -> Self {
        point.0
    }
}

/// Comma-separated coordinates, e.g. `0.5, 1.0, -2.0`.
impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut coordinates = self.0.iter();
        if let Some(first) = coordinates.next() {
            write!(f, "{:?}", first)?;
        }
        coordinates.try_for_each(|x| write!(f, ", {:?}", x))
    }
}
