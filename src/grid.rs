//! The square grid the user draws a projection on.

use hashbrown::HashSet;

use crate::{lattice::GridCell, projection::ViewAxis, Error, Result};

pub const DEFAULT_GRID_SIZE: u32 = 10;
pub const DEFAULT_CELL_PIXELS: u32 = 20;

/// The cells drawn so far on a `size` by `size` grid.
#[derive(Clone, Debug)]
pub struct DrawingGrid {
    size: u32,
    cell_pixels: u32,
    cells: HashSet<GridCell>,
}

impl Default for DrawingGrid {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            cell_pixels: DEFAULT_CELL_PIXELS,
            cells: HashSet::new(),
        }
    }
}

impl DrawingGrid {
    pub fn new(size: u32, cell_pixels: u32) -> Result<Self> {
        if size == 0 || cell_pixels == 0 || size > i32::MAX as u32 {
            return Err(Error::InvalidGridSize);
        }

        Ok(Self {
            size,
            cell_pixels,
            cells: HashSet::new(),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, cell: &GridCell) -> bool {
        self.cells.contains(cell)
    }

    pub fn in_bounds(&self, cell: &GridCell) -> bool {
        let size = self.size as i32;
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    fn check_bounds(&self, cell: GridCell) -> Result<()> {
        if self.in_bounds(&cell) {
            Ok(())
        } else {
            Err(Error::OutOfGrid {
                cell,
                size: self.size,
            })
        }
    }

    /// The cell under the pixel position `(px, py)`.
    pub fn cell_at_pixel(&self, px: f64, py: f64) -> Result<GridCell> {
        let step = self.cell_pixels as f64;
        let cell = GridCell::new((px / step).floor() as i32, (py / step).floor() as i32);
        self.check_bounds(cell)?;
        Ok(cell)
    }

    /// Mark `cell`. Returns whether the grid changed.
    pub fn add(&mut self, cell: GridCell) -> Result<bool> {
        self.check_bounds(cell)?;
        let added = self.cells.insert(cell);
        if added {
            tracing::debug!(%cell, "Added square");
        }
        Ok(added)
    }

    /// Unmark `cell`. Returns whether the grid changed.
    pub fn remove(&mut self, cell: GridCell) -> bool {
        let removed = self.cells.remove(&cell);
        if removed {
            tracing::debug!(%cell, "Removed square");
        }
        removed
    }

    /// Flip `cell`. Returns whether it is marked afterwards.
    pub fn toggle(&mut self, cell: GridCell) -> Result<bool> {
        if self.remove(cell) {
            Ok(false)
        } else {
            self.add(cell)
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.cells.iter().copied()
    }

    /// Label printed next to grid row `row` for `view`, or `None` if the
    /// grid has no such row.
    ///
    /// Views looking along a horizontal axis number their rows from the
    /// bottom, so the labels run backwards.
    pub fn row_label(&self, view: ViewAxis, row: u32) -> Option<u32> {
        if row >= self.size {
            return None;
        }

        if view.plane().flip_vertical {
            Some(self.size - 1 - row)
        } else {
            Some(row)
        }
    }

    /// Draw the grid as text, with labels for `view`.
    pub fn render(&self, view: ViewAxis) -> String {
        let (col_axis, row_axis) = view.axis_labels();
        let label_width = format!("{}", self.size - 1).len();

        let mut out = String::new();

        out.push_str(&" ".repeat(label_width + 1));
        for col in 0..self.size {
            out.push_str(&format!("{:>w$} ", col, w = label_width));
        }
        out.push_str(col_axis);
        out.push('\n');

        let rows = (0..self.size).filter_map(|row| Some((row, self.row_label(view, row)?)));
        for (row, label) in rows {
            out.push_str(&format!("{:>w$} ", label, w = label_width));
            for col in 0..self.size {
                let mark = if self.contains(&GridCell::new(col as i32, row as i32)) {
                    '#'
                } else {
                    '.'
                };
                out.push_str(&format!("{:>w$} ", mark, w = label_width));
            }
            out.push('\n');
        }

        out.push_str(row_axis);
        out
    }
}
