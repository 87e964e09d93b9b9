//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece (I, J, L, O, S, T, Z), shuffled with a
//! seeded LCG. Pieces are drawn from the back of the bag until it is empty,
//! then a new bag is shuffled. Any 7 consecutive draws starting at a bag
//! boundary are a permutation of all 7 kinds.
//!
//! Replays depend on this being bit-for-bit reproducible for a given seed.
//!
//! The generator is kept as is even though its low bits cycle quickly and
//! `next_int` reduces with `% max`: bag order is visibly patterned across
//! nearby seeds (seeds 1, 3, 5, 7 and 11 all draw O second). Changing the
//! formula would break every recorded replay.

use crate::types::ShapeKind;

/// 31-bit linear congruential generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    const MULTIPLIER: u32 = 1_103_515_245;
    const INCREMENT: u32 = 12_345;
    const MASK: u32 = 0x7fff_ffff;

    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self { seed, state: seed }
    }

    /// Generate the next 31-bit value
    pub fn next_u31(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & Self::MASK;
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_int(&mut self, max: u32) -> u32 {
        self.next_u31() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_int((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Rewind to the start of the sequence for `seed`
    pub fn reset(&mut self, seed: u32) {
        self.seed = seed;
        self.state = seed;
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Randomizer {
    /// Current bag; the live part is `bag[..len]`
    bag: [ShapeKind; 7],
    /// Pieces left in the current bag
    len: usize,
    rng: SimpleRng,
}

impl Randomizer {
    /// Create a new randomizer with the given seed and shuffle the first bag
    pub fn new(seed: u32) -> Self {
        let mut randomizer = Self {
            bag: ShapeKind::ALL,
            len: 0,
            rng: SimpleRng::new(seed),
        };
        randomizer.refill_bag();
        randomizer
    }

    fn refill_bag(&mut self) {
        self.bag = ShapeKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.len = self.bag.len();
    }

    /// Draw the next piece
    pub fn next(&mut self) -> ShapeKind {
        if self.len == 0 {
            self.refill_bag();
        }
        self.len -= 1;
        self.bag[self.len]
    }

    /// Peek at the next piece without consuming it
    pub fn peek(&self) -> ShapeKind {
        if self.len > 0 {
            return self.bag[self.len - 1];
        }

        // The next bag is shuffled on a copy so the live sequence is untouched;
        // `next()` will shuffle the exact same permutation.
        let mut preview_rng = self.rng.clone();
        let mut next_bag = ShapeKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[next_bag.len() - 1]
    }

    /// Reinitialize the bag and the underlying sequence
    pub fn reset(&mut self, seed: u32) {
        self.rng.reset(seed);
        self.refill_bag();
    }

    /// Seed this sequence started from
    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Pieces left in the current bag, next draw last
    pub fn remaining(&self) -> &[ShapeKind] {
        &self.bag[..self.len]
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
