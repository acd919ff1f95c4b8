//! Orthographic projections of clusters onto a 2D grid.

use std::{fmt, str::FromStr};

use hashbrown::{HashMap, HashSet};
use serde::Serialize;

use crate::{
    cluster::Cluster,
    lattice::{Axis, GridCell, LatticePoint},
    Error,
};

/// The direction the cluster is looked at from.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewAxis {
    #[default]
    Top,
    Left,
    Front,
}

/// How a [`ViewAxis`] maps lattice coordinates to grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plane {
    /// Becomes the grid column.
    pub horizontal: Axis,
    /// Becomes the grid row.
    pub vertical: Axis,
    /// Collapsed; the viewer sits on its positive side.
    pub depth: Axis,
    /// Rows count downwards from the highest coordinate instead of upwards
    /// from the lowest, so the top of the grid is the top of the object.
    pub flip_vertical: bool,
}

impl ViewAxis {
    pub const ALL: [ViewAxis; 3] = [ViewAxis::Top, ViewAxis::Left, ViewAxis::Front];

    pub const fn plane(self) -> Plane {
        match self {
            ViewAxis::Top => Plane {
                horizontal: Axis::X,
                vertical: Axis::Z,
                depth: Axis::Y,
                flip_vertical: false,
            },
            ViewAxis::Left => Plane {
                horizontal: Axis::Z,
                vertical: Axis::Y,
                depth: Axis::X,
                flip_vertical: true,
            },
            ViewAxis::Front => Plane {
                horizontal: Axis::X,
                vertical: Axis::Y,
                depth: Axis::Z,
                flip_vertical: true,
            },
        }
    }

    /// Names of the lattice axes along the grid columns and rows.
    pub const fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            ViewAxis::Top => ("X", "Z"),
            ViewAxis::Left => ("Z", "Y"),
            ViewAxis::Front => ("X", "Y"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ViewAxis::Top => "top",
            ViewAxis::Left => "left",
            ViewAxis::Front => "front",
        }
    }
}

impl fmt::Display for ViewAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => Ok(ViewAxis::Top),
            "left" | "l" => Ok(ViewAxis::Left),
            "front" | "f" => Ok(ViewAxis::Front),
            _ => Err(Error::ParseView(s.to_string())),
        }
    }
}

/// A set of grid cells, translated so that the smallest column and the
/// smallest row are both 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<GridCell>")]
pub struct Silhouette {
    cells: HashSet<GridCell>,
}

impl From<Silhouette> for Vec<GridCell> {
    fn from(value: Silhouette) -> Self {
        value.sorted()
    }
}

impl Silhouette {
    /// Create a new [`Silhouette`] from arbitrary cells. Duplicates
    /// collapse and the result is moved so its minimum corner is `(0, 0)`.
    pub fn normalized<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = GridCell>,
    {
        let cells: Vec<GridCell> = cells.into_iter().collect();

        let Some(min_x) = cells.iter().map(|c| c.x).min() else {
            return Self::default();
        };
        let min_y = cells.iter().map(|c| c.y).min().unwrap_or(0);
        let min = GridCell::new(min_x, min_y);

        Self {
            cells: cells.into_iter().map(|c| c - min).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &GridCell) -> bool {
        self.cells.contains(cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    /// Number of columns spanned.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.x + 1).max().unwrap_or(0) as usize
    }

    /// Number of rows spanned.
    pub fn height(&self) -> usize {
        self.cells.iter().map(|c| c.y + 1).max().unwrap_or(0) as usize
    }

    /// The cells in row-major order.
    pub fn sorted(&self) -> Vec<GridCell> {
        let mut cells: Vec<_> = self.cells.iter().copied().collect();
        cells.sort_unstable_by_key(|c| (c.y, c.x));
        cells
    }
}

impl fmt::Display for Silhouette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                if self.contains(&GridCell::new(x, y)) {
                    out.push('#');
                } else {
                    out.push('.');
                }
            }
            out.push('\n');
        }

        write!(f, "{}", out.trim_end())
    }
}

/// Compute the silhouette of `cluster` seen from `axis`.
///
/// Cubes that line up along the depth axis land on the same cell; the one
/// nearest the viewer represents the group. The row coordinate is flipped
/// for views whose vertical axis is world-up.
pub fn expected_silhouette(cluster: &Cluster, axis: ViewAxis) -> Silhouette {
    let plane = axis.plane();

    let mut nearest: HashMap<(i32, i32), LatticePoint> = HashMap::with_capacity(cluster.len());

    for p in cluster.iter() {
        let key = (p.coord(plane.horizontal), p.coord(plane.vertical));
        nearest
            .entry(key)
            .and_modify(|rep| {
                if p.coord(plane.depth) > rep.coord(plane.depth) {
                    *rep = *p;
                }
            })
            .or_insert(*p);
    }

    let reps = nearest.values();

    let min_h = reps.clone().map(|p| p.coord(plane.horizontal)).min();
    let min_v = reps.clone().map(|p| p.coord(plane.vertical)).min();
    let max_v = reps.clone().map(|p| p.coord(plane.vertical)).max();

    let (Some(min_h), Some(min_v), Some(max_v)) = (min_h, min_v, max_v) else {
        return Silhouette::default();
    };
    let span_v = max_v - min_v;

    let cells = reps
        .map(|p| {
            let col = p.coord(plane.horizontal) - min_h;
            let row = p.coord(plane.vertical) - min_v;
            let row = if plane.flip_vertical { span_v - row } else { row };
            GridCell::new(col, row)
        })
        .collect();

    Silhouette { cells }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cluster(points: &[(i32, i32, i32)]) -> Cluster {
        Cluster::try_from(points).unwrap()
    }

    fn cells(cells: &[(i32, i32)]) -> Silhouette {
        Silhouette::normalized(cells.iter().copied().map(GridCell::from))
    }

    #[test]
    fn single_cube_all_views() {
        let c = cluster(&[(0, 0, 0)]);
        for axis in ViewAxis::ALL {
            assert_eq!(expected_silhouette(&c, axis), cells(&[(0, 0)]));
        }
    }

    #[test]
    fn top_uses_x_and_z() {
        let c = cluster(&[(0, 0, 0), (1, 0, 0), (1, 0, 1)]);
        assert_eq!(
            expected_silhouette(&c, ViewAxis::Top),
            cells(&[(0, 0), (1, 0), (1, 1)])
        );
    }

    #[test]
    fn top_collapses_stacked_cubes() {
        let c = cluster(&[(0, 0, 0), (0, 1, 0)]);
        assert_eq!(expected_silhouette(&c, ViewAxis::Top), cells(&[(0, 0)]));
    }

    #[test]
    fn front_flips_rows() {
        let c = cluster(&[(0, 0, 0), (0, 1, 0), (1, 0, 0)]);

        // The upper cube is on row 0.
        let expected = cells(&[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(expected_silhouette(&c, ViewAxis::Front), expected);
    }

    #[test]
    fn left_uses_z_and_flipped_y() {
        let c = cluster(&[(0, 0, 0), (0, 1, 0), (0, 0, 1), (1, 0, 1)]);

        let expected = cells(&[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(expected_silhouette(&c, ViewAxis::Left), expected);

        // Front sees x instead of z.
        let expected = cells(&[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(expected_silhouette(&c, ViewAxis::Front), expected);

        // Shift the upper cube along x: front changes, left does not.
        let d = cluster(&[(1, 0, 0), (1, 1, 0), (1, 0, 1), (0, 0, 1)]);
        assert_eq!(
            expected_silhouette(&d, ViewAxis::Left),
            expected_silhouette(&c, ViewAxis::Left)
        );
        assert_eq!(
            expected_silhouette(&d, ViewAxis::Front),
            cells(&[(1, 0), (0, 1), (1, 1)])
        );
    }

    #[test]
    fn l_shape_differs_between_left_and_front() {
        // Along x on the floor, then up.
        let c = cluster(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0)]);

        assert_eq!(
            expected_silhouette(&c, ViewAxis::Front),
            cells(&[(2, 0), (0, 1), (1, 1), (2, 1)])
        );
        assert_eq!(
            expected_silhouette(&c, ViewAxis::Left),
            cells(&[(0, 0), (0, 1)])
        );
        assert_eq!(
            expected_silhouette(&c, ViewAxis::Top),
            cells(&[(0, 0), (1, 0), (2, 0)])
        );
    }

    #[test]
    fn projection_is_already_normalized() {
        let c = cluster(&[(-3, 4, 7), (-3, 5, 7), (-2, 5, 7), (-2, 5, 8)]);
        for axis in ViewAxis::ALL {
            let s = expected_silhouette(&c, axis);
            assert_eq!(s.iter().map(|c| c.x).min(), Some(0));
            assert_eq!(s.iter().map(|c| c.y).min(), Some(0));
        }
    }

    #[test]
    fn normalize_translates_and_dedups() {
        let s = Silhouette::normalized(
            [(5, 5), (6, 5), (5, 5), (6, 7)]
                .into_iter()
                .map(GridCell::from),
        );

        assert_eq!(s.len(), 3);
        assert_eq!(
            s.sorted(),
            vec![GridCell::new(0, 0), GridCell::new(1, 0), GridCell::new(1, 2)]
        );
        assert_eq!((s.width(), s.height()), (2, 3));
    }

    #[test]
    fn normalize_empty() {
        let s = Silhouette::normalized(std::iter::empty());
        assert!(s.is_empty());
        assert_eq!(format!("{s}"), "");
    }

    #[test]
    fn display() {
        let s = cells(&[(0, 0), (1, 1), (2, 1)]);
        assert_eq!(format!("{s}"), "#..\n.##");
    }

    #[test]
    fn parse_view() {
        assert_eq!("Top".parse::<ViewAxis>().unwrap(), ViewAxis::Top);
        assert_eq!("left".parse::<ViewAxis>().unwrap(), ViewAxis::Left);
        assert_eq!(" FRONT ".parse::<ViewAxis>().unwrap(), ViewAxis::Front);
        assert!(matches!("side".parse::<ViewAxis>(), Err(Error::ParseView(_))));
    }
}
