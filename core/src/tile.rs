use serde::{Deserialize, Serialize};

use crate::Position;

/// Player-visible state of a tile.
///
/// `Hidden` and `HiddenFlagged` toggle into each other; `Revealed` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    HiddenFlagged,
    Revealed,
}

impl TileState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::HiddenFlagged)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Background of a tile as a renderer should paint it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileFill {
    Hidden,
    Revealed,
    Exploded,
}

/// Colors indexed by adjacent mine count, `[1]` through `[8]` are used.
const COUNT_COLORS: [&str; 9] = [
    "#000000", "#0000ff", "#008000", "#ff0000", "#000080", "#800000", "#008080", "#000000",
    "#800080",
];

const FLAG_COLOR: &str = "red";
const DEFAULT_LABEL_COLOR: &str = "black";

/// One cell of the grid. Owned by [`crate::Board`]; everything outside the crate
/// only ever sees shared references.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    board_position: Position,
    display_position: Position,
    state: TileState,
    has_bomb: bool,
    adjacent_bomb_count: u8,
}

impl Tile {
    pub(crate) fn new(board_position: Position, display_position: Position) -> Self {
        Self {
            board_position,
            display_position,
            state: TileState::Hidden,
            has_bomb: false,
            adjacent_bomb_count: 0,
        }
    }

    pub fn board_position(&self) -> Position {
        self.board_position
    }

    pub fn display_position(&self) -> Position {
        self.display_position
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    /// Always `false` until the board is populated.
    pub fn has_bomb(&self) -> bool {
        self.has_bomb
    }

    /// Always `0` until the board is populated.
    pub fn adjacent_bomb_count(&self) -> u8 {
        self.adjacent_bomb_count
    }

    pub fn is_revealed(&self) -> bool {
        self.state == TileState::Revealed
    }

    pub fn fill(&self) -> TileFill {
        match self.state {
            TileState::Hidden | TileState::HiddenFlagged => TileFill::Hidden,
            TileState::Revealed if self.has_bomb => TileFill::Exploded,
            TileState::Revealed => TileFill::Revealed,
        }
    }

    /// Text drawn on top of the tile, if any.
    pub fn label(&self) -> Option<char> {
        match self.state {
            TileState::Hidden => None,
            TileState::HiddenFlagged => Some('F'),
            TileState::Revealed if self.has_bomb => Some('B'),
            TileState::Revealed if self.adjacent_bomb_count > 0 => {
                char::from_digit(self.adjacent_bomb_count.into(), 10)
            }
            TileState::Revealed => None,
        }
    }

    pub fn label_color(&self) -> &'static str {
        match self.state {
            TileState::HiddenFlagged => FLAG_COLOR,
            TileState::Revealed if !self.has_bomb => COUNT_COLORS
                .get(usize::from(self.adjacent_bomb_count))
                .copied()
                .unwrap_or(DEFAULT_LABEL_COLOR),
            _ => DEFAULT_LABEL_COLOR,
        }
    }

    pub(crate) fn place_bomb(&mut self) {
        self.has_bomb = true;
    }

    pub(crate) fn set_adjacent_bomb_count(&mut self, count: u8) {
        self.adjacent_bomb_count = count;
    }

    /// Moves a hidden (not flagged) tile to `Revealed`. Returns whether it changed.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.state == TileState::Hidden {
            self.state = TileState::Revealed;
            true
        } else {
            false
        }
    }

    /// Reveals regardless of a flag, used when the game is lost.
    pub(crate) fn force_reveal(&mut self) -> bool {
        let changed = self.state != TileState::Revealed;
        self.state = TileState::Revealed;
        changed
    }

    /// Switches between `Hidden` and `HiddenFlagged`. Returns whether it changed.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        match self.state {
            TileState::Hidden => {
                self.state = TileState::HiddenFlagged;
                true
            }
            TileState::HiddenFlagged => {
                self.state = TileState::Hidden;
                true
            }
            TileState::Revealed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Tile {
        Tile::new(Position::new(1, 2), Position::new(36, 69))
    }

    #[test]
    fn new_tile_is_hidden_and_empty() {
        let t = tile();
        assert_eq!(t.state(), TileState::Hidden);
        assert!(!t.has_bomb());
        assert_eq!(t.adjacent_bomb_count(), 0);
        assert_eq!(t.fill(), TileFill::Hidden);
        assert_eq!(t.label(), None);
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        let mut t = tile();
        assert!(t.toggle_flag());
        assert_eq!(t.state(), TileState::HiddenFlagged);
        assert_eq!(t.label(), Some('F'));
        assert_eq!(t.label_color(), "red");
        assert!(t.toggle_flag());
        assert_eq!(t.state(), TileState::Hidden);
    }

    #[test]
    fn flagged_tile_resists_plain_reveal_but_not_forced_one() {
        let mut t = tile();
        t.toggle_flag();
        assert!(!t.reveal());
        assert_eq!(t.state(), TileState::HiddenFlagged);
        assert!(t.force_reveal());
        assert_eq!(t.state(), TileState::Revealed);
    }

    #[test]
    fn revealed_tile_ignores_flag_toggles() {
        let mut t = tile();
        assert!(t.reveal());
        for _ in 0..3 {
            assert!(!t.toggle_flag());
            assert_eq!(t.state(), TileState::Revealed);
        }
    }

    #[test]
    fn revealed_labels_follow_contents() {
        let mut t = tile();
        t.set_adjacent_bomb_count(3);
        t.reveal();
        assert_eq!(t.fill(), TileFill::Revealed);
        assert_eq!(t.label(), Some('3'));
        assert_eq!(t.label_color(), "#ff0000");

        let mut zero = tile();
        zero.reveal();
        assert_eq!(zero.label(), None);

        let mut mine = tile();
        mine.place_bomb();
        mine.reveal();
        assert_eq!(mine.fill(), TileFill::Exploded);
        assert_eq!(mine.label(), Some('B'));
        assert_eq!(mine.label_color(), "black");
    }
}
