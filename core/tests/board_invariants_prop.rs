//! Invariants of board generation and reveal that must hold for any size, seed and
//! first click.
use proptest::prelude::*;
use sapper_core::{
    Action, ActionOutcome, Board, Game, NullPresenter, Outcome, Position, TileCount, TileState,
};
use std::collections::BTreeSet;

fn board_and_click() -> impl Strategy<Value = (Position, TileCount, u64, Position)> {
    (3i32..9, 3i32..9).prop_flat_map(|(w, h)| {
        (
            Just(Position::new(w, h)),
            0..=(w * h) as TileCount,
            any::<u64>(),
            (0..w, 0..h).prop_map(|(x, y)| Position::new(x, y)),
        )
    })
}

proptest! {
    #[test]
    fn adjacency_is_in_bounds_and_unique(
        (size, _, _, pos) in board_and_click(),
    ) {
        let board = Board::with_seed(size, 0, 0).unwrap();
        let adjacent = board.adjacent_positions(pos);
        let unique: BTreeSet<_> = adjacent.iter().copied().collect();

        prop_assert!(adjacent.len() <= 8);
        prop_assert_eq!(unique.len(), adjacent.len());
        prop_assert!(!unique.contains(&pos));
        for p in adjacent {
            prop_assert!(board.tile(p).is_some());
            prop_assert!((p.x - pos.x).abs() <= 1 && (p.y - pos.y).abs() <= 1);
        }
    }

    #[test]
    fn generation_keeps_safe_zone_and_caps_mines(
        (size, bombs, seed, safe) in board_and_click(),
    ) {
        let mut board = Board::with_seed(size, bombs, seed).unwrap();
        board.generate_content(safe).unwrap();

        let zone = board.adjacent_positions(safe).len() as TileCount + 1;
        prop_assert_eq!(board.bomb_count(), bombs.min(board.total_tiles() - zone));
        prop_assert!(!board.tile(safe).unwrap().has_bomb());
        for p in board.adjacent_positions(safe) {
            prop_assert!(!board.tile(p).unwrap().has_bomb());
        }
        prop_assert_eq!(
            board.tiles().filter(|t| t.has_bomb()).count() as TileCount,
            board.bomb_count()
        );
    }

    #[test]
    fn adjacency_counts_match_neighbors(
        (size, bombs, seed, safe) in board_and_click(),
    ) {
        let mut board = Board::with_seed(size, bombs, seed).unwrap();
        board.generate_content(safe).unwrap();

        for tile in board.tiles() {
            let expected = board
                .adjacent_tiles(tile.board_position())
                .filter(|t| t.has_bomb())
                .count();
            prop_assert_eq!(usize::from(tile.adjacent_bomb_count()), expected);
        }
    }

    #[test]
    fn first_click_never_loses_and_opens_a_closed_region(
        (size, bombs, seed, safe) in board_and_click(),
    ) {
        let board = Board::with_seed(size, bombs, seed).unwrap();
        let mut game = Game::new(board, NullPresenter);

        let outcome = game.handle(safe, Action::Primary).unwrap();
        prop_assert_ne!(outcome, ActionOutcome::HitMine);
        prop_assert_ne!(game.outcome(), Outcome::Lost);

        let board = game.board();
        for tile in board.tiles().filter(|t| t.is_revealed()) {
            prop_assert!(!tile.has_bomb());
            // a revealed zero never borders a hidden tile unless the game is over
            if tile.adjacent_bomb_count() == 0 && game.outcome() == Outcome::InProgress {
                for n in board.adjacent_tiles(tile.board_position()) {
                    prop_assert_eq!(n.state(), TileState::Revealed);
                }
            }
        }
        let hidden_safe = board
            .tiles()
            .filter(|t| !t.has_bomb() && !t.is_revealed())
            .count() as TileCount;
        prop_assert_eq!(hidden_safe, board.hidden_safe_count());
    }
}
