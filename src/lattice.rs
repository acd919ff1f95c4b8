//! Integer lattice coordinates for cubes and grid cells.

use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

use serde::Serialize;

use crate::Error;

/// The six face-neighbour offsets: ±1 along exactly one axis.
pub const FACE_OFFSETS: [LatticePoint; 6] = [
    LatticePoint::new(1, 0, 0),
    LatticePoint::new(-1, 0, 0),
    LatticePoint::new(0, 1, 0),
    LatticePoint::new(0, -1, 0),
    LatticePoint::new(0, 0, 1),
    LatticePoint::new(0, 0, -1),
];

/// The anchor (minimum corner) of a unit cube, occupying
/// `[x, x + 1] × [y, y + 1] × [z, z + 1]`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Default, Serialize)]
pub struct LatticePoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// One of the three lattice axes.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl LatticePoint {
    pub const ORIGIN: LatticePoint = LatticePoint::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The coordinate of this point along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// All six face-adjacent points.
    pub fn faces(self) -> impl Iterator<Item = LatticePoint> + Clone {
        FACE_OFFSETS.into_iter().map(move |offset| self + offset)
    }

    /// Whether `self` and `other` share a face.
    pub fn is_face_adjacent(&self, other: &LatticePoint) -> bool {
        let d = *self - *other;
        d.x.abs() + d.y.abs() + d.z.abs() == 1
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl Add for LatticePoint {
    type Output = LatticePoint;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for LatticePoint {
    type Output = LatticePoint;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<(i32, i32, i32)> for LatticePoint {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A square on a 2D grid. `x` is the column, `y` the row (rows grow
/// downwards on screen).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Default, Serialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for GridCell {
    type Output = GridCell;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridCell {
    type Output = GridCell;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Parses `x,y`, optionally wrapped in parentheses.
impl FromStr for GridCell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || Error::ParseCell(s.to_string());

        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');

        let (x, y) = inner.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;

        Ok(Self::new(x, y))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn faces_are_adjacent_and_distinct() {
        let p = LatticePoint::new(2, -1, 5);
        let faces: Vec<_> = p.faces().collect();

        assert_eq!(faces.len(), 6);
        for (i, f) in faces.iter().enumerate() {
            assert!(p.is_face_adjacent(f));
            assert!(!faces[i + 1..].contains(f));
        }
    }

    #[test]
    fn diagonal_is_not_adjacent() {
        let a = LatticePoint::ORIGIN;
        assert!(!a.is_face_adjacent(&LatticePoint::new(1, 1, 0)));
        assert!(!a.is_face_adjacent(&a));
        assert!(!a.is_face_adjacent(&LatticePoint::new(2, 0, 0)));
    }

    #[test]
    fn parse_cell() {
        assert_eq!("3,4".parse::<GridCell>().unwrap(), GridCell::new(3, 4));
        assert_eq!(" (0, -2) ".parse::<GridCell>().unwrap(), GridCell::new(0, -2));
        assert!("3".parse::<GridCell>().is_err());
        assert!("a,b".parse::<GridCell>().is_err());
    }
}
