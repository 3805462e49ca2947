use sapper_core::{Board, Presenter, TileCount, TileFill};
use std::fmt;

/// Draws the game as plain text. Each render replaces the pending frame, which the
/// caller prints when it is ready to.
#[derive(Debug, Default)]
pub struct TextPresenter {
    bombs_left: TileCount,
    elapsed_secs: f64,
    timer_running: bool,
    banner: Option<&'static str>,
    frame: Option<String>,
}

impl TextPresenter {
    pub fn take_frame(&mut self) -> Option<String> {
        self.frame.take()
    }
}

impl Presenter for TextPresenter {
    fn set_bombs_left(&mut self, bombs_left: TileCount) {
        self.bombs_left = bombs_left;
    }

    fn start_timer(&mut self) {
        self.elapsed_secs = 0.0;
        self.timer_running = true;
    }

    fn stop_timer(&mut self) {
        self.timer_running = false;
    }

    fn tick(&mut self, delta_secs: f64) {
        if self.timer_running {
            self.elapsed_secs += delta_secs;
        }
    }

    fn announce_win(&mut self) {
        self.banner = Some("You WON!");
    }

    fn announce_loss(&mut self) {
        self.banner = Some("You LOSE!");
    }

    fn render(&mut self, board: &Board) {
        let view = BoardView {
            board,
            bombs_left: self.bombs_left,
            elapsed_secs: self.elapsed_secs as u64,
            banner: self.banner,
        };
        self.frame = Some(view.to_string());
    }
}

struct BoardView<'a> {
    board: &'a Board,
    bombs_left: TileCount,
    elapsed_secs: u64,
    banner: Option<&'static str>,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mines: {}  time: {}s", self.bombs_left, self.elapsed_secs)?;

        write!(f, "   ")?;
        for x in 0..self.board.width() {
            write!(f, "{:>2}", x % 100)?;
        }
        writeln!(f)?;

        let width = self.board.width() as usize;
        for (i, tile) in self.board.tiles().enumerate() {
            if i % width == 0 {
                write!(f, "{:>2} ", tile.board_position().y % 100)?;
            }
            let glyph = match (tile.label(), tile.fill()) {
                (Some(label), _) => label,
                (None, TileFill::Hidden) => '#',
                (None, _) => '.',
            };
            write!(f, "{glyph:>2}")?;
            if i % width == width - 1 {
                writeln!(f)?;
            }
        }

        if let Some(banner) = self.banner {
            writeln!(f, "{banner}")?;
        }
        Ok(())
    }
}
