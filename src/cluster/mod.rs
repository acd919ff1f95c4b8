//! A cluster of unit cubes on the integer lattice.

use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::Serialize;

use crate::{lattice::LatticePoint, Error, Result};

mod generator;
pub use generator::{generate, ClusterGenerator, GeneratorConfig};

/// A cluster, represented as the ordered list of the anchors of its cubes.
///
/// The order is insertion order; for generated clusters the first point is
/// always the origin. All points are distinct and there is at least one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cluster {
    points: Vec<LatticePoint>,
}

impl TryFrom<Vec<LatticePoint>> for Cluster {
    type Error = Error;

    fn try_from(points: Vec<LatticePoint>) -> Result<Self> {
        Self::new(points)
    }
}

/// Writing clusters out by hand as coordinate triples is convenient in
/// tests.
impl TryFrom<&[(i32, i32, i32)]> for Cluster {
    type Error = Error;

    fn try_from(points: &[(i32, i32, i32)]) -> Result<Self> {
        Self::new(points.iter().copied().map(LatticePoint::from).collect())
    }
}

impl Cluster {
    /// Create a new [`Cluster`] from `points`, rejecting empty input and
    /// repeated points.
    ///
    /// Connectivity is not required here, see [`Cluster::is_connected`].
    pub fn new(points: Vec<LatticePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyCluster);
        }

        let mut seen = HashSet::with_capacity(points.len());
        for p in &points {
            if !seen.insert(*p) {
                return Err(Error::DuplicatePoint(*p));
            }
        }

        Ok(Self { points })
    }

    /// Only for callers that already guarantee the invariants.
    pub(crate) fn new_unchecked(points: Vec<LatticePoint>) -> Self {
        debug_assert!(!points.is_empty());
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with [`Cluster::len`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &LatticePoint> {
        self.points.iter()
    }

    pub fn contains(&self, point: &LatticePoint) -> bool {
        self.points.contains(point)
    }

    /// The minimum and maximum corners of the anchors.
    pub fn bounds(&self) -> (LatticePoint, LatticePoint) {
        let first = self.points[0];
        self.points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)))
    }

    /// Size of the bounding box in cubes along each axis.
    pub fn dims(&self) -> (usize, usize, usize) {
        let (lo, hi) = self.bounds();
        let d = hi - lo;
        (d.x as usize + 1, d.y as usize + 1, d.z as usize + 1)
    }

    /// Check that every cube can be reached from the first one by
    /// stepping across shared faces.
    pub fn is_connected(&self) -> bool {
        let occupied: HashSet<_> = self.points.iter().copied().collect();

        let mut visited = HashSet::with_capacity(self.points.len());
        let mut to_explore = VecDeque::new();

        visited.insert(self.points[0]);
        to_explore.push_back(self.points[0]);

        while let Some(p) = to_explore.pop_front() {
            for next in p.faces() {
                if occupied.contains(&next) && visited.insert(next) {
                    to_explore.push_back(next);
                }
            }
        }

        visited.len() == occupied.len()
    }

    /// Create a new [`Cluster`] with every cube moved by `offset`.
    pub fn translated(&self, offset: LatticePoint) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
        }
    }

    /// Create a new [`Cluster`] moved so that its minimum corner is the
    /// origin, with the points sorted.
    ///
    /// Two clusters have the same shape (up to translation) exactly when
    /// their normalized forms are equal.
    pub fn normalized(&self) -> Self {
        let (lo, _) = self.bounds();
        let mut points: Vec<_> = self.points.iter().map(|p| *p - lo).collect();
        points.sort_unstable();
        Self { points }
    }
}

impl core::fmt::Display for Cluster {
    // One block per y level, highest level first. Inside a block, rows
    // are z and columns are x.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (lo, hi) = self.bounds();
        let width = (hi.x - lo.x + 1) as usize;

        let mut out = String::new();

        for y in (lo.y..=hi.y).rev() {
            out.push_str(&format!("y = {y}\n"));
            for z in lo.z..=hi.z {
                for x in lo.x..=hi.x {
                    if self.contains(&LatticePoint::new(x, y, z)) {
                        out.push('#');
                    } else {
                        out.push('.');
                    }
                }
                out.push('\n');
            }

            for _ in 0..width {
                out.push('-');
            }
            out.push('\n');
        }

        write!(f, "{}", out.trim_end())
    }
}
