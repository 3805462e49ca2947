use thiserror::Error;

use crate::{Coord, Position, TileCount};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size should be at least 3x3, got {width}x{height}")]
    InvalidSize { width: Coord, height: Coord },
    #[error("Board position {0} out of bounds")]
    PositionOutOfBounds(Position),
    #[error("Board tile index {0} out of bounds")]
    IndexOutOfBounds(usize),
    #[error("Mine layout shape does not match board size")]
    InvalidBoardShape,
    #[error("Board content was already generated")]
    AlreadyPopulated,
    #[error("Too many mines, requested {requested} but only {capacity} tiles")]
    TooManyMines {
        requested: TileCount,
        capacity: TileCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
