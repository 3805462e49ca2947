use rand::rngs::SmallRng;

use super::*;

/// How a mine spot is drawn from the remaining candidate pool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CandidateDraw {
    /// Every remaining candidate is equally likely.
    #[default]
    Uniform,
    /// Draws from all but the last remaining candidate, which is only taken once it
    /// is the sole one left. Kept to reproduce layouts from older builds.
    SkipLast,
}

impl CandidateDraw {
    fn pick(self, rng: &mut SmallRng, remaining: usize) -> usize {
        use rand::prelude::*;

        match self {
            Self::Uniform => rng.random_range(0..remaining),
            Self::SkipLast if remaining > 1 => rng.random_range(0..remaining - 1),
            Self::SkipLast => 0,
        }
    }
}

/// Purely random placement, except that the safe position and its neighbors never
/// receive a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    draw: CandidateDraw,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draw: CandidateDraw::default(),
        }
    }

    pub fn with_draw(self, draw: CandidateDraw) -> Self {
        Self { draw, ..self }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig, safe: Position) -> Result<Array2<bool>> {
        use rand::prelude::*;

        let size = config.size;
        if !safe.is_within(size) {
            return Err(GameError::PositionOutOfBounds(safe));
        }

        let width = size.x as usize;
        let excluded: Vec<usize> = core::iter::once(safe)
            .chain(NeighborIter::new(safe, size))
            .map(|pos| pos.y as usize * width + pos.x as usize)
            .collect();
        let mut candidates: Vec<usize> = (0..config.total_tiles() as usize)
            .filter(|index| !excluded.contains(index))
            .collect();

        if candidates.len() < config.bombs as usize {
            log::warn!(
                "Safe zone around {} leaves room for {} mines, requested {}",
                safe,
                candidates.len(),
                config.bombs
            );
        }

        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: TileCount = 0;
        while placed < config.bombs && !candidates.is_empty() {
            let spot = self.draw.pick(&mut rng, candidates.len());
            let index = candidates.remove(spot);
            mask[[index / width, index % width]] = true;
            placed += 1;
        }

        log::debug!("Placed {} mines with seed {}", placed, self.seed);
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_count(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&m| m).count()
    }

    #[test]
    fn safe_zone_stays_clear_on_full_request() {
        let config = GameConfig::new_unchecked(Position::new(4, 4), 16);
        let safe = Position::new(0, 0);
        let mask = RandomMinefieldGenerator::new(7)
            .generate(config, safe)
            .unwrap();

        assert_eq!(mine_count(&mask), 12);
        for pos in core::iter::once(safe).chain(NeighborIter::new(safe, config.size)) {
            assert!(!mask[pos.to_nd_index()], "mine inside safe zone at {pos}");
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = GameConfig::beginner();
        let safe = Position::new(4, 4);
        let a = RandomMinefieldGenerator::new(42).generate(config, safe).unwrap();
        let b = RandomMinefieldGenerator::new(42).generate(config, safe).unwrap();
        assert_eq!(a, b);
        assert_eq!(mine_count(&a), 10);
    }

    #[test]
    fn rejects_safe_position_outside_board() {
        let config = GameConfig::beginner();
        let result = RandomMinefieldGenerator::new(0).generate(config, Position::new(9, 0));
        assert_eq!(
            result,
            Err(GameError::PositionOutOfBounds(Position::new(9, 0)))
        );
    }

    // 3 wide and 4 tall with the safe spot on the top edge: rows 0 and 1 are excluded,
    // leaving six candidates of which (2, 3) is the last in pool order.
    const TALL: GameConfig = GameConfig::new_unchecked(Position::new(3, 4), 1);
    const TOP_EDGE: Position = Position::new(1, 0);
    const LAST_CANDIDATE: Position = Position::new(2, 3);

    #[test]
    fn uniform_draw_can_pick_last_candidate() {
        let hit = (0..256).any(|seed| {
            RandomMinefieldGenerator::new(seed)
                .generate(TALL, TOP_EDGE)
                .unwrap()[LAST_CANDIDATE.to_nd_index()]
        });
        assert!(hit);
    }

    #[test]
    fn skip_last_draw_never_picks_last_candidate_first() {
        for seed in 0..256 {
            let mask = RandomMinefieldGenerator::new(seed)
                .with_draw(CandidateDraw::SkipLast)
                .generate(TALL, TOP_EDGE)
                .unwrap();
            assert_eq!(mine_count(&mask), 1);
            assert!(!mask[LAST_CANDIDATE.to_nd_index()], "seed {seed}");
        }
    }

    #[test]
    fn skip_last_draw_still_exhausts_pool() {
        let config = GameConfig::new_unchecked(TALL.size, 6);
        let mask = RandomMinefieldGenerator::new(3)
            .with_draw(CandidateDraw::SkipLast)
            .generate(config, TOP_EDGE)
            .unwrap();
        assert_eq!(mine_count(&mask), 6);
        assert!(mask[LAST_CANDIDATE.to_nd_index()]);
    }
}
