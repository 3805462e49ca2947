use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Size of a rendered tile in display units.
pub const TILE_SIZE: Position = Position::new(30, 30);

/// Gap between rendered tiles, and between the outer tiles and the border.
pub const TILE_GAP: Position = Position::new(3, 3);

/// The grid of tiles plus everything needed to fill it with mines.
///
/// Tiles live in a row-major `(height, width)` array, so the tile at `(x, y)` sits at
/// linear index `y * width + x`. Tile state only changes through the crate itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    size: Position,
    max_bomb_count: TileCount,
    bomb_count: TileCount,
    populated: bool,
    seed: u64,
    hidden_safe_count: TileCount,
    tiles: Array2<Tile>,
}

impl Board {
    /// Empty board whose mine layout will be seeded from the wall clock.
    pub fn new(size: Position, max_bomb_count: TileCount) -> Result<Self> {
        Self::with_seed(size, max_bomb_count, clock_seed())
    }

    /// Empty board with a reproducible mine layout.
    pub fn with_seed(size: Position, max_bomb_count: TileCount, seed: u64) -> Result<Self> {
        check_size(size)?;

        let tiles = Array2::from_shape_fn(size.to_nd_index(), |(y, x)| {
            let board_position = Position::new(x as Coord, y as Coord);
            Tile::new(board_position, Self::board_to_display(board_position))
        });

        Ok(Self {
            size,
            max_bomb_count,
            bomb_count: 0,
            populated: false,
            seed,
            hidden_safe_count: area(size),
            tiles,
        })
    }

    pub fn from_config(config: GameConfig) -> Result<Self> {
        Self::new(config.size, config.bombs)
    }

    pub fn size(&self) -> Position {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.x
    }

    pub fn height(&self) -> Coord {
        self.size.y
    }

    pub fn total_tiles(&self) -> TileCount {
        area(self.size)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn max_bomb_count(&self) -> TileCount {
        self.max_bomb_count
    }

    /// Mines actually placed, `0` until populated.
    pub fn bomb_count(&self) -> TileCount {
        self.bomb_count
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn flagged_count(&self) -> TileCount {
        self.tiles
            .iter()
            .filter(|tile| tile.state() == TileState::HiddenFlagged)
            .count() as TileCount
    }

    /// Tiles without a mine that are not revealed yet.
    pub fn hidden_safe_count(&self) -> TileCount {
        self.hidden_safe_count
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.size)
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.is_in_bounds(pos).then(|| &self.tiles[pos.to_nd_index()])
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn iter_adjacent(&self, pos: Position) -> NeighborIter {
        NeighborIter::new(pos, self.size)
    }

    pub fn adjacent_positions(&self, pos: Position) -> Vec<Position> {
        self.iter_adjacent(pos).collect()
    }

    pub fn adjacent_tiles(&self, pos: Position) -> impl Iterator<Item = &Tile> {
        self.iter_adjacent(pos)
            .map(|neighbor| &self.tiles[neighbor.to_nd_index()])
    }

    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.is_in_bounds(pos)
            .then(|| pos.y as usize * self.size.x as usize + pos.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Result<Position> {
        if index >= self.total_tiles() as usize {
            return Err(GameError::IndexOutOfBounds(index));
        }
        let width = self.size.x as usize;
        Ok(Position::new((index % width) as Coord, (index / width) as Coord))
    }

    /// Places mines with the board's seed, keeping `safe` and its neighbors clear.
    pub fn generate_content(&mut self, safe: Position) -> Result<()> {
        let generator = RandomMinefieldGenerator::new(self.seed);
        self.generate_content_with(safe, generator)
    }

    /// Fills the board once using `generator`, then computes adjacency counts.
    pub fn generate_content_with(
        &mut self,
        safe: Position,
        generator: impl MinefieldGenerator,
    ) -> Result<()> {
        if self.populated {
            return Err(GameError::AlreadyPopulated);
        }
        if !self.is_in_bounds(safe) {
            return Err(GameError::PositionOutOfBounds(safe));
        }

        let config = GameConfig::new_unchecked(self.size, self.max_bomb_count);
        let mask = generator.generate(config, safe)?;
        if mask.dim() != self.tiles.dim() {
            return Err(GameError::InvalidBoardShape);
        }

        let mut bomb_count = 0;
        for (tile, _) in self.tiles.iter_mut().zip(mask.iter()).filter(|(_, m)| **m) {
            tile.place_bomb();
            bomb_count += 1;
        }

        for y in 0..self.size.y {
            for x in 0..self.size.x {
                let pos = Position::new(x, y);
                let count = self.adjacent_tiles(pos).filter(|t| t.has_bomb()).count() as u8;
                self.tiles[pos.to_nd_index()].set_adjacent_bomb_count(count);
            }
        }

        self.bomb_count = bomb_count;
        self.hidden_safe_count = self.total_tiles() - bomb_count;
        self.populated = true;
        log::debug!(
            "Populated {}x{} board around {} with {} of {} requested mines",
            self.size.x,
            self.size.y,
            safe,
            bomb_count,
            self.max_bomb_count
        );
        Ok(())
    }

    /// Top-left display corner of the tile at `pos`.
    pub fn board_to_display(pos: Position) -> Position {
        TILE_GAP + pos * (TILE_SIZE + TILE_GAP)
    }

    /// Board position under a display point, if any.
    pub fn display_to_board(&self, point: Position) -> Option<Position> {
        let pitch = TILE_SIZE + TILE_GAP;
        let pos = Position::new(point.x.div_euclid(pitch.x), point.y.div_euclid(pitch.y));
        pos.is_within(self.size).then_some(pos)
    }

    /// Size of the whole rendered surface.
    pub fn display_extent(&self) -> Position {
        Self::board_to_display(self.size)
    }

    /// Reveals a `Hidden` tile, returning a copy of it when it changed.
    pub(crate) fn reveal(&mut self, pos: Position) -> Option<Tile> {
        if !self.is_in_bounds(pos) {
            return None;
        }
        let tile = &mut self.tiles[pos.to_nd_index()];
        if !tile.reveal() {
            return None;
        }
        if !tile.has_bomb() {
            self.hidden_safe_count -= 1;
        }
        Some(*tile)
    }

    /// Reveals every mined tile, flagged or not.
    pub(crate) fn reveal_mines(&mut self) -> TileCount {
        self.tiles
            .iter_mut()
            .filter(|tile| tile.has_bomb())
            .map(|tile| tile.force_reveal())
            .filter(|&changed| changed)
            .count() as TileCount
    }

    pub(crate) fn toggle_flag(&mut self, pos: Position) -> bool {
        self.is_in_bounds(pos) && self.tiles[pos.to_nd_index()].toggle_flag()
    }
}

fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
