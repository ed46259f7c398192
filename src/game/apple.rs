use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use super::state::Position;

/// Sampling attempts per board cell before a slow placement is logged
const SLOW_SAMPLING_FACTOR: u64 = 64;

/// The apple: one cell, moved to a random free spot whenever it is eaten
#[derive(Debug, Clone)]
pub struct Apple {
    position: Position,
    rng: StdRng,
}

impl Apple {
    pub fn new(rng: StdRng) -> Self {
        Self {
            position: Position::new(0, 0),
            rng,
        }
    }

    /// Deterministic apple placement, for reproducible runs and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Put the apple on a specific cell
    pub fn place_at(&mut self, position: Position) {
        self.position = position;
    }

    /// Sample cells in `[0, board_size)²` until one is not excluded, then move there.
    ///
    /// `board_size` must be in `1..=i32::MAX`; `GameConfig::validate` guarantees this
    /// for simulation boards. There is no retry limit: if `exclude` rejects every
    /// cell this never returns.
    pub fn relocate<F>(&mut self, board_size: usize, exclude: F)
    where
        F: Fn(Position) -> bool,
    {
        debug_assert!(
            board_size > 0 && board_size <= i32::MAX as usize,
            "board size {board_size} out of range"
        );
        let size = board_size as i32;
        let warn_after = (board_size as u64).pow(2) * SLOW_SAMPLING_FACTOR;
        let mut attempts: u64 = 0;

        loop {
            let x = self.rng.gen_range(0..size);
            let y = self.rng.gen_range(0..size);
            let candidate = Position::new(x, y);
            if !exclude(candidate) {
                self.position = candidate;
                return;
            }

            attempts += 1;
            if attempts == warn_after {
                warn!(attempts, board_size, "apple placement is taking unusually long");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relocate_stays_on_board() {
        let mut apple = Apple::seeded(7);
        for _ in 0..500 {
            apple.relocate(20, |_| false);
            assert!(apple.position().is_within(20));
        }
    }

    #[test]
    fn test_relocate_converges_on_single_free_cell() {
        let free = Position::new(3, 17);
        let mut apple = Apple::seeded(42);

        for _ in 0..20 {
            apple.relocate(20, |p| p != free);
            assert_eq!(apple.position(), free);
        }
    }

    #[test]
    fn test_relocate_avoids_excluded_cells() {
        let blocked: Vec<Position> = (0..10).map(|x| Position::new(x, 0)).collect();
        let mut apple = Apple::seeded(1);

        for _ in 0..200 {
            apple.relocate(10, |p| blocked.contains(&p));
            assert!(!blocked.contains(&apple.position()));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Apple::seeded(99);
        let mut b = Apple::seeded(99);
        for _ in 0..10 {
            a.relocate(20, |_| false);
            b.relocate(20, |_| false);
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    #[cfg(debug_assertions)]
    fn test_relocate_rejects_empty_board() {
        let mut apple = Apple::seeded(0);
        apple.relocate(0, |_| false);
    }

    #[test]
    fn test_place_at() {
        let mut apple = Apple::seeded(0);
        apple.place_at(Position::new(11, 10));
        assert_eq!(apple.position(), Position::new(11, 10));
    }
}
