use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::BitOr;

use crate::*;

/// Kind of input applied to a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Reveal a hidden tile, or chord on a revealed one.
    Primary,
    /// Toggle a flag.
    Secondary,
}

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// What handling one action did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    NoChange,
    /// Something other than a reveal changed, a flag or the first population.
    Changed,
    Revealed,
    HitMine,
    Won,
}

impl ActionOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Used to merge outcomes when revealing several tiles
impl BitOr for ActionOutcome {
    type Output = ActionOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ActionOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (Changed, _) | (_, Changed) => Changed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Receives counters and game-end signals. Implementations decide how to show them.
pub trait Presenter {
    fn set_bombs_left(&mut self, bombs_left: TileCount);
    fn start_timer(&mut self);
    fn stop_timer(&mut self);
    fn tick(&mut self, delta_secs: f64);
    fn announce_win(&mut self);
    fn announce_loss(&mut self);
    fn render(&mut self, board: &Board);
}

/// Presenter that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn set_bombs_left(&mut self, _bombs_left: TileCount) {}
    fn start_timer(&mut self) {}
    fn stop_timer(&mut self) {}
    fn tick(&mut self, _delta_secs: f64) {}
    fn announce_win(&mut self) {}
    fn announce_loss(&mut self) {}
    fn render(&mut self, _board: &Board) {}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    elapsed_secs: f64,
    timer_active: bool,
    outcome: Outcome,
    triggered_mine: Option<Position>,
    moves: u32,
}

impl Session {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    /// Actions that changed the game.
    pub fn moves(&self) -> u32 {
        self.moves
    }
}

/// Applies player actions to a board and reports the results to a presenter.
#[derive(Debug)]
pub struct Game<P: Presenter> {
    board: Board,
    presenter: P,
    session: Session,
}

impl<P: Presenter> Game<P> {
    pub fn new(board: Board, presenter: P) -> Self {
        Self {
            board,
            presenter,
            session: Session::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn outcome(&self) -> Outcome {
        self.session.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.session.outcome.is_finished()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Mines not yet accounted for by a flag, never below zero.
    pub fn bombs_left(&self) -> TileCount {
        self.board
            .bomb_count()
            .saturating_sub(self.board.flagged_count())
    }

    /// Handles one action on the tile at `pos`. Once the game is finished every
    /// action is a no-op.
    pub fn handle(&mut self, pos: Position, action: Action) -> Result<ActionOutcome> {
        if !self.board.is_in_bounds(pos) {
            return Err(GameError::PositionOutOfBounds(pos));
        }
        if self.is_finished() {
            return Ok(ActionOutcome::NoChange);
        }

        let outcome = match action {
            Action::Primary => self.primary(pos)?,
            Action::Secondary => self.secondary(pos),
        };

        if outcome.has_update() {
            self.session.moves += 1;
            self.presenter.render(&self.board);
        }
        Ok(outcome)
    }

    /// Advances the elapsed time while the timer runs, then asks for a redraw.
    pub fn tick(&mut self, delta_secs: f64) {
        if self.session.timer_active && delta_secs > 0.0 {
            self.session.elapsed_secs += delta_secs;
            self.presenter.tick(delta_secs);
        }
        self.presenter.render(&self.board);
    }

    fn primary(&mut self, pos: Position) -> Result<ActionOutcome> {
        use ActionOutcome::*;

        let mut outcome = NoChange;
        if !self.board.is_populated() {
            self.board.generate_content(pos)?;
            self.update_bombs_left();
            self.start_timer();
            outcome = Changed;
        }

        let Some(&tile) = self.board.tile(pos) else {
            return Err(GameError::PositionOutOfBounds(pos));
        };

        Ok(outcome
            | match tile.state() {
                TileState::Hidden => self.reveal_from(pos),
                TileState::Revealed => self.chord(&tile),
                TileState::HiddenFlagged => NoChange,
            })
    }

    fn secondary(&mut self, pos: Position) -> ActionOutcome {
        let changed = self.board.toggle_flag(pos);
        self.update_bombs_left();
        if changed {
            ActionOutcome::Changed
        } else {
            ActionOutcome::NoChange
        }
    }

    /// Reveals the hidden neighbors of a revealed tile once it has at least as many
    /// flagged neighbors as adjacent mines. Whether the flags are right does not matter.
    fn chord(&mut self, tile: &Tile) -> ActionOutcome {
        let pos = tile.board_position();
        let flagged = self
            .board
            .adjacent_tiles(pos)
            .filter(|t| t.state() == TileState::HiddenFlagged)
            .count();
        if flagged < usize::from(tile.adjacent_bomb_count()) {
            return ActionOutcome::NoChange;
        }

        let hidden: Vec<Position> = self
            .board
            .adjacent_tiles(pos)
            .filter(|t| t.state() == TileState::Hidden)
            .map(Tile::board_position)
            .collect();
        log::debug!("Chord at {} over {} hidden neighbors", pos, hidden.len());

        let mut outcome = ActionOutcome::NoChange;
        for neighbor in hidden {
            if self.is_finished() {
                break;
            }
            outcome = outcome | self.reveal_from(neighbor);
        }
        outcome
    }

    /// Reveals the tile at `start`, flood-filling through zero-count tiles. Flagged
    /// tiles are never opened by the fill; every tile is opened at most once.
    fn reveal_from(&mut self, start: Position) -> ActionOutcome {
        let mut outcome = ActionOutcome::NoChange;
        let mut to_visit = VecDeque::from([start]);

        while let Some(pos) = to_visit.pop_front() {
            // skip anything revealed or flagged since it was queued
            let Some(tile) = self.board.reveal(pos) else {
                continue;
            };

            if tile.has_bomb() {
                self.lose(pos);
                return ActionOutcome::HitMine;
            }
            log::trace!(
                "Revealed tile at {}, mine count: {}",
                pos,
                tile.adjacent_bomb_count()
            );
            outcome = ActionOutcome::Revealed;

            if self.board.hidden_safe_count() == 0 {
                self.win();
                return ActionOutcome::Won;
            }

            if tile.adjacent_bomb_count() == 0 {
                let board = &self.board;
                to_visit.extend(board.iter_adjacent(pos).filter(|&neighbor| {
                    board
                        .tile(neighbor)
                        .is_some_and(|t| t.state() == TileState::Hidden)
                }));
            }
        }

        outcome
    }

    fn lose(&mut self, pos: Position) {
        let revealed = self.board.reveal_mines();
        log::debug!("Hit mine at {}, revealed {} more mines", pos, revealed);
        self.session.triggered_mine = Some(pos);
        self.session.outcome = Outcome::Lost;
        self.stop_timer();
        self.presenter.announce_loss();
    }

    fn win(&mut self) {
        log::debug!("Board cleared after {:.1}s", self.session.elapsed_secs);
        self.session.outcome = Outcome::Won;
        self.stop_timer();
        self.presenter.announce_win();
    }

    fn start_timer(&mut self) {
        self.session.timer_active = true;
        self.presenter.start_timer();
    }

    fn stop_timer(&mut self) {
        self.session.timer_active = false;
        self.presenter.stop_timer();
    }

    fn update_bombs_left(&mut self) {
        let bombs_left = self.bombs_left();
        self.presenter.set_bombs_left(bombs_left);
    }
}
