//! RNG module - 7-bag piece randomizer
//!
//! Each bag holds one of each kind (I, L, J, O, T, S, Z), shuffled with an
//! unbiased Fisher-Yates pass. Bags are appended to a FIFO queue so the next
//! pieces can be previewed; the queue is topped up before every draw while it
//! holds [`BAG_LOOKAHEAD`] or fewer pieces.
//!
//! Seeding goes through `StdRng`, so the same seed replays the same sequence.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, BAG_LOOKAHEAD, BAG_SIZE, PREVIEW_LEN};

/// A uniformly random permutation of all seven kinds.
pub fn shuffled_bag<R: Rng + ?Sized>(rng: &mut R) -> [PieceKind; BAG_SIZE] {
    let mut bag = PieceKind::ALL;
    bag.shuffle(rng);
    bag
}

/// Lookahead queue fed by shuffled bags.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    queue: VecDeque<PieceKind>,
    rng: StdRng,
    seed: u64,
}

impl PieceQueue {
    /// Create an empty queue; the first draw fills it.
    pub fn new(seed: u64) -> Self {
        Self {
            queue: VecDeque::with_capacity(BAG_LOOKAHEAD + 2 * BAG_SIZE),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this queue was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn top_up(&mut self) {
        while self.queue.len() <= BAG_LOOKAHEAD {
            let bag = shuffled_bag(&mut self.rng);
            self.queue.extend(bag);
        }
    }

    /// Pop the next piece, refilling first so the queue never starves.
    pub fn draw(&mut self) -> PieceKind {
        self.top_up();
        match self.queue.pop_front() {
            Some(kind) => kind,
            None => unreachable!("queue topped up above lookahead"),
        }
    }

    /// The `i`-th upcoming piece, if it is already queued.
    pub fn peek(&self, i: usize) -> Option<PieceKind> {
        self.queue.get(i).copied()
    }

    /// Upcoming pieces shown to the player. Empty until the first draw.
    pub fn preview(&self) -> ArrayVec<PieceKind, PREVIEW_LEN> {
        self.queue.iter().take(PREVIEW_LEN).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop all queued pieces. The RNG keeps its stream position.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_one_of_each(pieces: &[PieceKind]) {
        assert_eq!(pieces.len(), 7);
        for kind in PieceKind::ALL {
            assert_eq!(
                pieces.iter().filter(|&&k| k == kind).count(),
                1,
                "kind {kind:?} in {pieces:?}"
            );
        }
    }

    #[test]
    fn shuffled_bag_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            assert_one_of_each(&shuffled_bag(&mut rng));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PieceQueue::new(12345);
        let mut b = PieceQueue::new(12345);
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn draws_are_fair_per_bag() {
        let mut queue = PieceQueue::new(7);
        for _ in 0..10 {
            let bag: Vec<_> = (0..7).map(|_| queue.draw()).collect();
            assert_one_of_each(&bag);
        }
    }

    #[test]
    fn lookahead_stays_above_threshold_after_draw() {
        let mut queue = PieceQueue::new(3);
        assert!(queue.is_empty());
        for _ in 0..40 {
            queue.draw();
            assert!(queue.len() >= BAG_LOOKAHEAD);
            assert_eq!(queue.preview().len(), PREVIEW_LEN);
        }
    }

    #[test]
    fn first_draw_queues_two_bags() {
        let mut queue = PieceQueue::new(1);
        queue.draw();
        assert_eq!(queue.len(), 2 * BAG_SIZE - 1);
    }

    #[test]
    fn preview_matches_following_draws() {
        let mut queue = PieceQueue::new(21);
        queue.draw();
        let preview = queue.preview();
        for expected in preview {
            assert_eq!(queue.draw(), expected);
        }
    }

    #[test]
    fn clear_empties_queue() {
        let mut queue = PieceQueue::new(5);
        queue.draw();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.peek(0), None);
        assert!(queue.preview().is_empty());
    }
}
