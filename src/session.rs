//! State of one puzzle as seen by an interactive front end.

use rand::Rng;

use crate::{
    cluster::{Cluster, ClusterGenerator},
    grid::DrawingGrid,
    lattice::GridCell,
    projection::{expected_silhouette, Silhouette, ViewAxis},
    verify::{verify_report, Report, Verdict},
    Result,
};

/// The current cluster, the selected view and the drawing so far.
#[derive(Clone, Debug)]
pub struct PuzzleSession {
    generator: ClusterGenerator,
    cluster: Cluster,
    view: ViewAxis,
    grid: DrawingGrid,
}

impl PuzzleSession {
    pub fn new<R: Rng>(generator: ClusterGenerator, grid: DrawingGrid, rng: &mut R) -> Self {
        let cluster = generator.generate(rng);
        let mut grid = grid;
        grid.clear();

        Self {
            generator,
            cluster,
            view: ViewAxis::default(),
            grid,
        }
    }

    /// Start over with a new cluster and an empty grid. The view is kept.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        self.cluster = self.generator.generate(rng);
        self.grid.clear();
        tracing::info!(cubes = self.cluster.len(), "Started new puzzle");
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    pub fn view(&self) -> ViewAxis {
        self.view
    }

    pub fn grid(&self) -> &DrawingGrid {
        &self.grid
    }

    /// Switch to `view`. The drawing is discarded, since it was made for
    /// the previous view.
    pub fn select_view(&mut self, view: ViewAxis) {
        self.view = view;
        self.grid.clear();
    }

    pub fn add(&mut self, cell: GridCell) -> Result<bool> {
        self.grid.add(cell)
    }

    pub fn remove(&mut self, cell: GridCell) -> bool {
        self.grid.remove(cell)
    }

    pub fn toggle(&mut self, cell: GridCell) -> Result<bool> {
        self.grid.toggle(cell)
    }

    /// Toggle the cell under a pixel position.
    pub fn click(&mut self, px: f64, py: f64) -> Result<(GridCell, bool)> {
        let cell = self.grid.cell_at_pixel(px, py)?;
        let marked = self.grid.toggle(cell)?;
        Ok((cell, marked))
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn expected(&self) -> Silhouette {
        expected_silhouette(&self.cluster, self.view)
    }

    pub fn verify(&self) -> Verdict {
        self.report().verdict
    }

    pub fn report(&self) -> Report {
        verify_report(&self.expected(), self.grid.cells())
    }
}
