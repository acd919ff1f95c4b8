//! Random polycube puzzles: grow a connected cluster of unit cubes, then
//! check a hand-drawn orthographic projection of it.


mod error;
pub use error::{Error, Result};

pub mod cluster;
pub mod grid;
pub mod lattice;
pub mod projection;
pub mod session;
pub mod survey;
pub mod verify;

pub use cluster::{generate, Cluster, ClusterGenerator, GeneratorConfig};
pub use lattice::{GridCell, LatticePoint};
pub use projection::{expected_silhouette, Silhouette, ViewAxis};
pub use verify::{verify, verify_report, Verdict};
