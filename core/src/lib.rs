#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod game;
mod generator;
mod tile;
mod types;

/// Smallest accepted board width and height.
pub const MIN_BOARD_SIDE: Coord = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Position,
    pub bombs: TileCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Position, bombs: TileCount) -> Self {
        Self { size, bombs }
    }

    /// Validated configuration: both sides at least [`MIN_BOARD_SIDE`] and no more
    /// mines than tiles.
    pub fn new(size: Position, bombs: TileCount) -> Result<Self> {
        check_size(size)?;
        let capacity = area(size);
        if bombs > capacity {
            return Err(GameError::TooManyMines {
                requested: bombs,
                capacity,
            });
        }
        Ok(Self::new_unchecked(size, bombs))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(Position::new(9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(Position::new(16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(Position::new(30, 16), 99)
    }

    pub const fn total_tiles(&self) -> TileCount {
        area(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

pub(crate) fn check_size(size: Position) -> Result<()> {
    if size.x < MIN_BOARD_SIDE || size.y < MIN_BOARD_SIDE {
        Err(GameError::InvalidSize {
            width: size.x,
            height: size.y,
        })
    } else {
        Ok(())
    }
}
