/// Bounded history of recent frames and the fade applied when drawing it
use std::collections::{vec_deque, VecDeque};

/// Append-at-tail, evict-from-head history
///
/// Iteration order is insertion order: oldest first.
#[derive(Debug, Clone)]
pub struct TrailBuffer<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> TrailBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Change the capacity, evicting the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict();
    }

    /// Append a snapshot, dropping the oldest while over capacity
    pub fn push(&mut self, entry: T) {
        self.entries.push_back(entry);
        self.evict();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&T> {
        self.entries.back()
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

/// Opacity ramp across a trail, faintest for the oldest entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeCurve {
    /// Opacity added to every entry of a multi-entry trail
    pub floor: f32,
    /// Slope of the ramp from oldest to newest
    pub gamma: f32,
}

impl FadeCurve {
    pub fn new(floor: f32, gamma: f32) -> Self {
        Self { floor, gamma }
    }

    /// Opacity for entry `index` of `count`, in `[0, 1]`
    ///
    /// A lone entry is fully opaque; otherwise
    /// `min(floor + gamma * index / (count - 1), 1)`.
    pub fn alpha(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return 1.0;
        }
        let t = index as f32 / (count - 1) as f32;
        (self.floor + self.gamma * t).clamp(0.0, 1.0)
    }

    /// Opacities for every entry of a trail of `count` entries
    pub fn alphas(&self, count: usize) -> impl Iterator<Item = f32> + '_ {
        (0..count).map(move |i| self.alpha(i, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut trail = TrailBuffer::new(3);
        for i in 0..5 {
            trail.push(i);
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(trail.newest(), Some(&4));
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut trail = TrailBuffer::new(4);
        for n in 1..=10 {
            trail.push(n);
            assert_eq!(trail.len(), n.min(4));
        }
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut trail = TrailBuffer::new(0);
        trail.push("pose");
        assert!(trail.is_empty());
    }

    #[test]
    fn test_shrinking_capacity_evicts_immediately() {
        let mut trail = TrailBuffer::new(5);
        for i in 0..5 {
            trail.push(i);
        }
        trail.set_capacity(2);
        assert_eq!(trail.iter().copied().collect::<Vec<_>>(), vec![3, 4]);

        trail.set_capacity(6);
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn test_single_entry_is_opaque() {
        let fade = FadeCurve::new(0.1, 0.0);
        assert_eq!(fade.alpha(0, 1), 1.0);
    }

    #[test]
    fn test_alpha_ramp_is_monotonic_and_bounded() {
        for gamma in [0.0, 0.3, 0.9, 1.0] {
            for count in 2..=20 {
                let fade = FadeCurve::new(0.1, gamma);
                let alphas: Vec<f32> = fade.alphas(count).collect();
                assert!(alphas.windows(2).all(|w| w[0] <= w[1]));
                assert!(*alphas.last().unwrap() <= 1.0);
                assert!((alphas[0] - 0.1).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_alpha_saturates() {
        let fade = FadeCurve::new(0.1, 0.9);
        assert!((fade.alpha(1, 3) - 0.55).abs() < 1e-6);
        assert!((fade.alpha(2, 3) - 1.0).abs() < 1e-6);
    }
}
