use core::fmt;
use core::ops::{Add, Mul};
use serde::{Deserialize, Serialize};

/// Single coordinate axis, shared by board and display space.
pub type Coord = i32;

/// Count type used for mine counts and tile counts.
pub type TileCount = u32;

/// Integer `(x, y)` pair. On a board `x` is the column and `y` the row; after
/// scaling the same type carries display coordinates.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Whether this lies inside `[0, bounds.x) × [0, bounds.y)`.
    pub const fn is_within(self, bounds: Position) -> bool {
        self.x >= 0 && self.x < bounds.x && self.y >= 0 && self.y < bounds.y
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Component-wise product.
impl Mul for Position {
    type Output = Position;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Grids are stored row-major with shape `(height, width)`, so the row comes first.
/// Only meaningful for in-bounds positions.
impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.y as usize, self.x as usize]
    }
}

pub const fn area(size: Position) -> TileCount {
    let w = if size.x > 0 { size.x as TileCount } else { 0 };
    let h = if size.y > 0 { size.y as TileCount } else { 0 };
    w.saturating_mul(h)
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `center`, returning a value only when it remains in bounds.
fn apply_delta(center: Position, delta: (Coord, Coord), bounds: Position) -> Option<Position> {
    let (dx, dy) = delta;
    let next = Position::new(center.x.checked_add(dx)?, center.y.checked_add(dy)?);
    next.is_within(bounds).then_some(next)
}

/// King-move neighbors of a position, clipped to the bounds. Yields nothing when the
/// center itself is out of bounds.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Position,
    bounds: Position,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Position, bounds: Position) -> Self {
        let index = if center.is_within(bounds) {
            0
        } else {
            DISPLACEMENTS.len() as u8
        };
        Self {
            center,
            bounds,
            index,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Position = Position::new(4, 3);

    #[test]
    fn neighbor_count_depends_on_placement() {
        assert_eq!(NeighborIter::new(Position::new(0, 0), BOUNDS).count(), 3);
        assert_eq!(NeighborIter::new(Position::new(3, 2), BOUNDS).count(), 3);
        assert_eq!(NeighborIter::new(Position::new(1, 0), BOUNDS).count(), 5);
        assert_eq!(NeighborIter::new(Position::new(0, 1), BOUNDS).count(), 5);
        assert_eq!(NeighborIter::new(Position::new(1, 1), BOUNDS).count(), 8);
    }

    #[test]
    fn out_of_bounds_center_has_no_neighbors() {
        assert_eq!(NeighborIter::new(Position::new(-1, 0), BOUNDS).count(), 0);
        assert_eq!(NeighborIter::new(Position::new(4, 1), BOUNDS).count(), 0);
    }

    #[test]
    fn neighbors_never_include_center() {
        let center = Position::new(2, 1);
        assert!(NeighborIter::new(center, BOUNDS).all(|pos| pos != center));
    }

    #[test]
    fn display_matches_bracketed_pair() {
        use alloc::string::ToString;
        assert_eq!(Position::new(3, -2).to_string(), "[3, -2]");
    }
}
