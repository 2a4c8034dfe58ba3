//! Event subscriptions and size observation for the minimap.
//!
//! The host routes raw events to [`crate::ScrollSyncMinimap::handle`]; an
//! event is only acted on while its [`Topic`] is registered. Container and
//! minimap topics live for as long as a container is attached, the global
//! pointer topics only for the duration of a drag.

use std::collections::HashSet;

/// Event source a listener can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    ContainerScroll,
    ContainerResize,
    MinimapResize,
    ContentChange,
    /// Press on the minimap itself
    PointerDown,
    /// Global pointer motion, anywhere on screen
    PointerMove,
    /// Global pointer release, anywhere on screen
    PointerUp,
}

impl Topic {
    /// Registered while a container is attached
    pub const ATTACHED: [Topic; 5] = [
        Topic::ContainerScroll,
        Topic::ContainerResize,
        Topic::MinimapResize,
        Topic::ContentChange,
        Topic::PointerDown,
    ];

    /// Registered while a drag session is active
    pub const DRAG: [Topic; 2] = [Topic::PointerMove, Topic::PointerUp];
}

/// Set of currently registered topics
#[derive(Debug, Default, Clone)]
pub struct Listeners {
    active: HashSet<Topic>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the topic was already registered
    pub fn register(&mut self, topic: Topic) -> bool {
        self.active.insert(topic)
    }

    pub fn register_all(&mut self, topics: &[Topic]) {
        for topic in topics {
            self.register(*topic);
        }
    }

    /// Returns `false` if the topic was not registered
    pub fn deregister(&mut self, topic: Topic) -> bool {
        self.active.remove(&topic)
    }

    pub fn deregister_all(&mut self, topics: &[Topic]) {
        for topic in topics {
            self.deregister(*topic);
        }
    }

    #[inline]
    pub fn is_registered(&self, topic: Topic) -> bool {
        self.active.contains(&topic)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Observe size changes of one element.
///
/// Hosts with native resize notifications can implement this directly;
/// [`PollingSizeObserver`] covers hosts that can only re-measure.
pub trait SizeObserver {
    /// Feed the latest measurement. Returns `true` when the size differs
    /// from what was last observed, meaning dependents must recompute.
    fn observe(&mut self, size: f64) -> bool;

    /// Last observed size, if any
    fn last(&self) -> Option<f64>;
}

/// Detects size changes by comparing each measurement with the previous one
#[derive(Debug, Default, Clone)]
pub struct PollingSizeObserver {
    last: Option<f64>,
}

impl PollingSizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last size so the next measurement always reports a change
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl SizeObserver for PollingSizeObserver {
    fn observe(&mut self, size: f64) -> bool {
        let changed = self.last != Some(size);
        self.last = Some(size);
        changed
    }

    fn last(&self) -> Option<f64> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_deregister() {
        let mut listeners = Listeners::new();
        assert!(listeners.register(Topic::ContainerScroll));
        assert!(!listeners.register(Topic::ContainerScroll));
        assert!(listeners.is_registered(Topic::ContainerScroll));

        assert!(listeners.deregister(Topic::ContainerScroll));
        assert!(!listeners.deregister(Topic::ContainerScroll));
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_bulk_topics() {
        let mut listeners = Listeners::new();
        listeners.register_all(&Topic::ATTACHED);
        listeners.register_all(&Topic::DRAG);
        assert_eq!(listeners.len(), 7);

        listeners.deregister_all(&Topic::DRAG);
        assert!(!listeners.is_registered(Topic::PointerMove));
        assert!(listeners.is_registered(Topic::PointerDown));

        listeners.clear();
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_polling_observer() {
        let mut observer = PollingSizeObserver::new();
        assert_eq!(observer.last(), None);
        // First measurement is always a change
        assert!(observer.observe(24.0));
        assert!(!observer.observe(24.0));
        assert!(observer.observe(30.0));
        assert_eq!(observer.last(), Some(30.0));

        observer.reset();
        assert!(observer.observe(30.0));
    }
}
