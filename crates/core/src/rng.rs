//! RNG module - bag randomizer
//!
//! Each bag holds one of each of the seven kinds, shuffled with Fisher-Yates.
//! Pieces are popped from the end until the bag is empty, then a new bag is
//! shuffled. Any 7 consecutive bag draws are therefore a permutation of all
//! seven kinds.
//!
//! Also provides a simple LCG so a seed reproduces a game.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Remaining kinds of the current bag; drawn from the end.
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw the next kind.
    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        match self.bag.pop() {
            Some(kind) => kind,
            // refill() always leaves seven kinds behind.
            None => unreachable!("bag refilled but empty"),
        }
    }

    /// Drop the current bag; the RNG keeps its state.
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Kinds left in the current bag, next draw last.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(90) < 90);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = PieceBag::new(1);

        let mut drawn: Vec<_> = (0..7).map(|_| bag.draw()).collect();
        drawn.sort_by_key(|k| k.id());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_bag_auto_refill() {
        let mut bag = PieceBag::new(1);
        for _ in 0..7 {
            bag.draw();
        }
        bag.draw();
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_windows_stay_permutations_after_reset() {
        let mut bag = PieceBag::new(3);
        for _ in 0..3 {
            bag.draw();
        }
        bag.reset();

        for _ in 0..4 {
            let mut window: Vec<_> = (0..7).map(|_| bag.draw()).collect();
            window.sort_by_key(|k| k.id());
            assert_eq!(window, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceBag::new(99);
        let mut b = PieceBag::new(99);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
