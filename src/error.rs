use thiserror::Error;

use crate::lattice::{GridCell, LatticePoint};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid cube count range {min}..={max}: need 1 <= min <= max")]
    InvalidRange { min: usize, max: usize },

    #[error("cluster extent must be at least 1")]
    InvalidExtent,

    #[error("a cluster needs at least one cube")]
    EmptyCluster,

    #[error("cube {0} appears more than once")]
    DuplicatePoint(LatticePoint),

    #[error("cell {cell} is outside the {size}x{size} grid")]
    OutOfGrid { cell: GridCell, size: u32 },

    #[error("grid size and cell size must both be at least 1")]
    InvalidGridSize,

    #[error("cluster extent {extent} does not fit on the {size}x{size} grid")]
    ExtentExceedsGrid { extent: u32, size: u32 },

    #[error("unknown view `{0}`, expected one of: top, left, front")]
    ParseView(String),

    #[error("cannot parse `{0}` as a grid cell, expected `x,y`")]
    ParseCell(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
