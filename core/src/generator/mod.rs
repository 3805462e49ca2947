use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Produces the mine mask for a board, shaped `(height, width)`.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig, safe: Position) -> Result<Array2<bool>>;
}

/// Places mines exactly where told, ignoring the safe position. Handy for fixtures
/// and for replaying a known layout.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Position>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: impl IntoIterator<Item = Position>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(self, config: GameConfig, _safe: Position) -> Result<Array2<bool>> {
        let mut mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for pos in self.mines {
            if !pos.is_within(config.size) {
                return Err(GameError::PositionOutOfBounds(pos));
            }
            mask[pos.to_nd_index()] = true;
        }
        Ok(mask)
    }
}
