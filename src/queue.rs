//! Seeded queue of shapes offered for placement.

use crate::shape::Shape;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{collections::VecDeque, sync::Arc};

/// The shape currently offered for placement plus a preview of the next
/// ones.
///
/// Shapes are drawn uniformly from a catalogue with a seeded generator, so two
/// queues built from the same catalogue and seed produce the same sequence.
#[derive(Debug, Clone)]
pub struct ShapeQueue {
    // shared between clones, only `pending` and the generator change
    catalog: Arc<[Shape]>,
    seed: u64,
    draws: u64,
    rng: StdRng,
    // front is the current shape
    pending: VecDeque<Shape>,
}

impl ShapeQueue {
    /// Create a queue holding one current shape and `preview_len` upcoming
    /// shapes.
    ///
    /// # Panics
    ///
    /// Panics if `catalog` is empty.
    pub fn new(catalog: impl Into<Arc<[Shape]>>, preview_len: usize, seed: u64) -> Self {
        let catalog = catalog.into();
        assert!(!catalog.is_empty(), "Shape catalog cannot be empty.");

        let mut queue = Self {
            catalog,
            seed,
            draws: 0,
            rng: StdRng::seed_from_u64(seed),
            pending: VecDeque::with_capacity(preview_len + 1),
        };

        for _ in 0..=preview_len {
            let shape = queue.draw();
            queue.pending.push_back(shape);
        }

        queue
    }

    fn draw(&mut self) -> Shape {
        let index = self.rng.gen_range(0..self.catalog.len());
        self.draws += 1;
        log::trace!("Drew catalog shape [{}] (draw #{})", index, self.draws);
        self.catalog[index].clone()
    }

    /// The shape currently offered.
    pub fn current(&self) -> &Shape {
        // `pending` always holds at least the current shape
        &self.pending[0]
    }

    /// The previewed shapes after the current one, in order.
    pub fn upcoming(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.pending.iter().skip(1)
    }

    /// Number of shapes drawn from the catalogue so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// The catalogue shapes are drawn from.
    pub fn catalog(&self) -> &[Shape] {
        &self.catalog
    }

    /// Drop the current shape, promote the next one and draw a replacement
    /// for the end of the preview. Returns the new current shape.
    pub fn advance(&mut self) -> &Shape {
        self.pending.pop_front();
        let shape = self.draw();
        self.pending.push_back(shape);
        self.current()
    }
}

impl PartialEq for ShapeQueue {
    fn eq(&self, other: &Self) -> bool {
        // generator state is fully determined by the seed and draw count
        self.seed == other.seed
            && self.draws == other.draws
            && self.catalog == other.catalog
            && self.pending == other.pending
    }
}

impl Eq for ShapeQueue {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    #[should_panic(expected = "Shape catalog cannot be empty.")]
    fn test_empty_catalog() {
        let _ = ShapeQueue::new(Vec::<Shape>::new(), 2, 0);
    }

    #[test]
    fn test_preview_length() {
        let queue = ShapeQueue::new(catalog::standard(), 3, 1);
        assert_eq!(queue.upcoming().count(), 3);
        assert_eq!(queue.draws(), 4);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ShapeQueue::new(catalog::standard(), 2, 42);
        let mut b = ShapeQueue::new(catalog::standard(), 2, 42);

        for _ in 0..20 {
            assert_eq!(a.current(), b.current());
            assert_eq!(a, b);
            a.advance();
            b.advance();
        }
    }

    #[test]
    fn test_advance_promotes_next() {
        let mut queue = ShapeQueue::new(catalog::standard(), 2, 9);
        let next = queue.upcoming().next().cloned().unwrap();
        let promoted = queue.advance().clone();
        assert_eq!(promoted, next);
        assert_eq!(queue.upcoming().count(), 2);
    }

    #[test]
    fn test_single_shape_catalog() {
        let mut queue = ShapeQueue::new(vec![catalog::o_tetromino()], 0, 3);
        assert_eq!(queue.current(), &catalog::o_tetromino());
        assert_eq!(queue.advance(), &catalog::o_tetromino());
        assert_eq!(queue.upcoming().count(), 0);
    }

    #[test]
    fn test_clone_shares_catalog() {
        let mut queue = ShapeQueue::new(catalog::standard(), 2, 8);
        let saved = queue.clone();
        queue.advance();

        assert!(std::ptr::eq(queue.catalog(), saved.catalog()));
        assert_ne!(queue, saved);
    }

    #[test]
    fn test_clone_restores_sequence() {
        let mut queue = ShapeQueue::new(catalog::standard(), 1, 5);
        let saved = queue.clone();
        let drawn: Vec<_> = (0..5).map(|_| queue.advance().clone()).collect();

        let mut replay = saved;
        let replayed: Vec<_> = (0..5).map(|_| replay.advance().clone()).collect();
        assert_eq!(drawn, replayed);
    }
}
