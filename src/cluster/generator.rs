//! Random growth of connected clusters.
//!
//! Starting from a single cube at the origin, the cluster grows by picking a
//! uniformly random unoccupied face-neighbour of the cubes placed so far,
//! until the target size is reached or no candidate is left.

use std::ops::RangeInclusive;

use hashbrown::HashSet;
use rand::Rng;

use super::Cluster;
use crate::{lattice::LatticePoint, Error, Result};

/// Settings for [`ClusterGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Smallest target size (inclusive).
    pub min_cubes: usize,
    /// Largest target size (inclusive).
    pub max_cubes: usize,
    /// If set, the cluster must fit in an `extent`³ box.
    pub extent: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_cubes: 3,
            max_cubes: 7,
            extent: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_range(min_cubes: usize, max_cubes: usize) -> Self {
        Self {
            min_cubes,
            max_cubes,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_cubes == 0 || self.min_cubes > self.max_cubes {
            return Err(Error::InvalidRange {
                min: self.min_cubes,
                max: self.max_cubes,
            });
        }

        if self.extent == Some(0) {
            return Err(Error::InvalidExtent);
        }

        Ok(())
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.min_cubes..=self.max_cubes
    }

    /// Make sure every view of a generated cluster fits on a `size` by
    /// `size` drawing grid. Without an extent, the grid size becomes the
    /// extent.
    pub fn fit_to_grid(self, size: u32) -> Result<Self> {
        match self.extent {
            Some(extent) if extent > size => Err(Error::ExtentExceedsGrid { extent, size }),
            Some(_) => Ok(self),
            None => Ok(Self {
                extent: Some(size),
                ..self
            }),
        }
    }
}

/// A validated [`GeneratorConfig`] that can produce clusters.
#[derive(Clone, Copy, Debug)]
pub struct ClusterGenerator {
    config: GeneratorConfig,
}

impl ClusterGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a cluster whose target size is drawn uniformly from the
    /// configured range.
    ///
    /// The result may be smaller than the target if the growth runs out of
    /// candidates, which can only happen when an extent is configured.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Cluster {
        let target = rng.random_range(self.config.range());
        self.generate_exact(target, rng)
    }

    /// Generate a cluster with at most `target` cubes.
    pub fn generate_exact<R: Rng>(&self, target: usize, rng: &mut R) -> Cluster {
        let mut growth = Growth::new(self.config.extent);

        while growth.points.len() < target {
            if !growth.step(rng) {
                tracing::debug!(
                    target,
                    placed = growth.points.len(),
                    "Frontier exhausted before reaching target size"
                );
                break;
            }
        }

        tracing::debug!(target, cubes = growth.points.len(), "Generated cluster");

        Cluster::new_unchecked(growth.points)
    }
}

/// Generate a cluster with a target size drawn uniformly from
/// `n_min..=n_max`.
pub fn generate<R: Rng>(n_min: usize, n_max: usize, rng: &mut R) -> Result<Cluster> {
    let generator = ClusterGenerator::new(GeneratorConfig::with_range(n_min, n_max))?;
    Ok(generator.generate(rng))
}

/// The state of one growth run.
struct Growth {
    points: Vec<LatticePoint>,
    occupied: HashSet<LatticePoint>,
    frontier: Vec<LatticePoint>,
    /// Everything that ever entered the frontier, including candidates
    /// discarded for not fitting, so they are not offered again.
    seen: HashSet<LatticePoint>,
    extent: Option<i32>,
    lo: LatticePoint,
    hi: LatticePoint,
}

impl Growth {
    fn new(extent: Option<u32>) -> Self {
        let mut me = Self {
            points: Vec::new(),
            occupied: HashSet::new(),
            frontier: Vec::new(),
            seen: HashSet::new(),
            extent: extent.map(|e| e.min(i32::MAX as u32) as i32),
            lo: LatticePoint::ORIGIN,
            hi: LatticePoint::ORIGIN,
        };

        me.place(LatticePoint::ORIGIN);
        me
    }

    /// Whether adding `p` keeps the bounding box within the extent.
    fn fits(&self, p: LatticePoint) -> bool {
        let Some(extent) = self.extent else {
            return true;
        };

        let d = self.hi.max(p) - self.lo.min(p);
        d.x < extent && d.y < extent && d.z < extent
    }

    fn place(&mut self, p: LatticePoint) {
        self.points.push(p);
        self.occupied.insert(p);
        self.lo = self.lo.min(p);
        self.hi = self.hi.max(p);

        for next in p.faces() {
            if !self.occupied.contains(&next) && self.seen.insert(next) {
                self.frontier.push(next);
            }
        }
    }

    /// Place one more cube. Returns `false` if there was no candidate left.
    fn step<R: Rng>(&mut self, rng: &mut R) -> bool {
        while !self.frontier.is_empty() {
            let idx = rng.random_range(0..self.frontier.len());
            let candidate = self.frontier.swap_remove(idx);

            // The bounding box only grows, so a candidate that does not fit
            // now never will.
            if !self.fits(candidate) {
                tracing::trace!(%candidate, "Discarding candidate outside extent");
                continue;
            }

            tracing::trace!(%candidate, frontier = self.frontier.len(), "Placing cube");
            self.place(candidate);
            return true;
        }

        false
    }
}
