//! RNG module - uniform random piece generation
//!
//! Each piece is drawn independently and uniformly from the seven kinds; there is
//! no bag, so droughts of a given kind are possible.
//! One piece is always held back as the "next" preview.
//!
//! Uses a simple seeded LCG so games are reproducible.

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator with a one-piece preview
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// The queued "next" piece
    next: PieceKind,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed; the first preview is drawn immediately
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::next_piece(&mut rng);
        Self { next, rng }
    }

    /// Uniform draw from the seven kinds, independent of history
    pub fn next_piece(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Peek at the queued piece without consuming it
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Hand out the queued piece and queue a freshly drawn one
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.next;
        self.next = Self::next_piece(&mut self.rng);
        piece
    }

    /// Current RNG state (a valid seed to continue the same stream)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Replace the queued piece
    #[cfg(test)]
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
