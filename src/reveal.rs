//! One-shot reveal of page sections as they scroll into view.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Observe/unobserve capability of the platform's intersection tracking.
pub trait ObserveCapability<K> {
    fn observe(&self, target: &K);
    fn unobserve(&self, target: &K);
}

/// A single intersection report for a watched element.
#[derive(Debug, Clone)]
pub struct Intersection<K> {
    pub target: K,
    pub is_intersecting: bool,
    pub ratio: f64,
}

pub struct RevealTracker<K, O> {
    observer: O,
    threshold: f64,
    watched: Vec<(K, RevealState)>,
}

impl<K: PartialEq + Clone, O: ObserveCapability<K>> RevealTracker<K, O> {
    pub fn new(observer: O, threshold: f64) -> Self {
        Self { observer, threshold, watched: Vec::new() }
    }

    /// Starts watching `target`. Elements already known are left as they are.
    pub fn watch(&mut self, target: K) {
        if self.position(&target).is_some() {
            return;
        }
        self.observer.observe(&target);
        self.watched.push((target, RevealState::Pending));
    }

    /// Applies a batch of intersection reports and returns the elements that
    /// just became visible. Each element is returned at most once over the
    /// tracker's lifetime.
    pub fn on_entries(&mut self, entries: impl IntoIterator<Item = Intersection<K>>) -> Vec<K> {
        let mut revealed = Vec::new();
        for entry in entries {
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            let Some(idx) = self.position(&entry.target) else {
                continue;
            };
            let (target, state) = &mut self.watched[idx];
            if *state == RevealState::Revealed {
                continue;
            }
            *state = RevealState::Revealed;
            self.observer.unobserve(target);
            revealed.push(target.clone());
        }
        revealed
    }

    pub fn state(&self, target: &K) -> Option<RevealState> {
        self.position(target).map(|idx| self.watched[idx].1)
    }

    pub fn pending_count(&self) -> usize {
        self.watched
            .iter()
            .filter(|(_, state)| *state == RevealState::Pending)
            .count()
    }

    fn position(&self, target: &K) -> Option<usize> {
        self.watched.iter().position(|(k, _)| k == target)
    }
}
