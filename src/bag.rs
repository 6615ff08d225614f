use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::shapes::ShapeKind;

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> ShapeKind;

    /// Starts over, as on a game reset.
    fn refill(&mut self);
}

// ============================================================================
// Bag Randomizer
// ============================================================================

/// Draws kinds without replacement; every kind appears once per cycle of
/// `ShapeKind::ALL.len()` draws.
#[derive(Clone, Debug)]
pub struct Bag<R = StdRng> {
    remaining: Vec<ShapeKind>,
    rng: R,
}

impl Bag<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> Bag<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            remaining: ShapeKind::ALL.to_vec(),
            rng,
        }
    }

    /// Kinds not yet drawn in the current cycle.
    pub fn remaining(&self) -> &[ShapeKind] {
        &self.remaining
    }

    pub fn draw_kind(&mut self) -> ShapeKind {
        if self.remaining.is_empty() {
            self.remaining.extend_from_slice(&ShapeKind::ALL);
        }
        let index = self.rng.gen_range(0..self.remaining.len());
        self.remaining.swap_remove(index)
    }

    pub fn draw(&mut self) -> Piece {
        Piece::spawn(self.draw_kind())
    }
}

impl<R: Rng> PieceProvider for Bag<R> {
    fn next_piece(&mut self) -> ShapeKind {
        self.draw_kind()
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend_from_slice(&ShapeKind::ALL);
    }
}

// ============================================================================
// Scripted Provider
// ============================================================================

pub struct SequencePieceProvider {
    pieces: Vec<ShapeKind>,
    index: usize,
}

impl SequencePieceProvider {
    pub fn new(pieces: Vec<ShapeKind>) -> Self {
        assert!(!pieces.is_empty(), "sequence must contain at least one kind");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> ShapeKind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }

    fn refill(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn each_cycle_contains_every_kind_once() {
        let mut bag = Bag::seeded(7);
        for _ in 0..5 {
            let cycle: HashSet<ShapeKind> = (0..ShapeKind::ALL.len()).map(|_| bag.draw_kind()).collect();
            assert_eq!(cycle.len(), ShapeKind::ALL.len());
        }
    }

    #[test]
    fn remaining_shrinks_then_refills() {
        let mut bag = Bag::seeded(1);
        assert_eq!(bag.remaining().len(), 8);
        let first = bag.draw_kind();
        assert_eq!(bag.remaining().len(), 7);
        assert!(!bag.remaining().contains(&first));

        for _ in 0..7 {
            bag.draw_kind();
        }
        assert!(bag.remaining().is_empty());
        bag.draw_kind();
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Bag::seeded(42);
        let mut b = Bag::seeded(42);
        let xs: Vec<_> = (0..24).map(|_| a.draw_kind()).collect();
        let ys: Vec<_> = (0..24).map(|_| b.draw_kind()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn draw_spawns_piece() {
        let mut bag = Bag::seeded(3);
        let piece = bag.draw();
        assert_eq!(piece, Piece::spawn(piece.kind));
    }

    #[test]
    fn refill_restarts_the_cycle() {
        let mut bag = Bag::seeded(9);
        bag.draw_kind();
        bag.draw_kind();
        bag.refill();
        assert_eq!(bag.remaining().len(), ShapeKind::ALL.len());
    }

    #[test]
    fn sequence_provider_cycles_and_rewinds() {
        let mut provider = SequencePieceProvider::new(vec![ShapeKind::I, ShapeKind::O]);
        assert_eq!(provider.next_piece(), ShapeKind::I);
        assert_eq!(provider.next_piece(), ShapeKind::O);
        assert_eq!(provider.next_piece(), ShapeKind::I);
        provider.refill();
        assert_eq!(provider.next_piece(), ShapeKind::I);
    }
}
