//! In-memory host history.
//!
//! Stands in for the host environment's session history (the browser's
//! back/forward stack, or a native shell's navigation stack). The
//! [`LocationStore`](crate::LocationStore) pushes entries on programmatic
//! navigation and asks it to step back or forward when the user does.

use std::collections::VecDeque;

/// Direction of a history change, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// A new entry was pushed.
    Push,
    /// The current entry was replaced.
    Replace,
    /// Stepped back one entry.
    Back,
    /// Stepped forward one entry.
    Forward,
    /// The host reported a change the store did not initiate.
    Pop,
}

/// Record of one history transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    /// Path before the change.
    pub from: String,
    /// Path after the change.
    pub to: String,
    /// How the change happened.
    pub direction: NavigationDirection,
}

/// Back/forward stack of paths with a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: VecDeque<String>,
    current: usize,
    limit: Option<usize>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: VecDeque::from([initial.into()]),
            current: 0,
            limit: None,
        }
    }

    /// Keep at most `limit` entries, dropping the oldest first.
    ///
    /// A limit of zero is treated as one.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.max(1));
        self.enforce_limit();
        self
    }

    /// Path of the current entry.
    pub fn current(&self) -> &str {
        &self.entries[self.current]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push a new entry, discarding everything after the cursor.
    pub fn push(&mut self, path: impl Into<String>) -> RouteChangeEvent {
        let to = path.into();
        let from = self.current().to_string();

        self.entries.truncate(self.current + 1);
        self.entries.push_back(to.clone());
        self.current += 1;
        self.enforce_limit();

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Push,
        }
    }

    /// Overwrite the current entry.
    pub fn replace(&mut self, path: impl Into<String>) -> RouteChangeEvent {
        let to = path.into();
        let from = std::mem::replace(&mut self.entries[self.current], to.clone());

        RouteChangeEvent {
            from,
            to,
            direction: NavigationDirection::Replace,
        }
    }

    /// Step back one entry, if possible.
    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_back() {
            return None;
        }
        let from = self.current().to_string();
        self.current -= 1;

        Some(RouteChangeEvent {
            from,
            to: self.current().to_string(),
            direction: NavigationDirection::Back,
        })
    }

    /// Step forward one entry, if possible.
    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_forward() {
            return None;
        }
        let from = self.current().to_string();
        self.current += 1;

        Some(RouteChangeEvent {
            from,
            to: self.current().to_string(),
            direction: NavigationDirection::Forward,
        })
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Peek at the entry `back()` would move to.
    pub fn peek_back(&self) -> Option<&str> {
        self.current
            .checked_sub(1)
            .map(|i| self.entries[i].as_str())
    }

    /// Peek at the entry `forward()` would move to.
    pub fn peek_forward(&self) -> Option<&str> {
        self.entries.get(self.current + 1).map(String::as_str)
    }

    /// Drop every entry except the current one.
    pub fn clear(&mut self) {
        let keep = self.current().to_string();
        self.entries.clear();
        self.entries.push_back(keep);
        self.current = 0;
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else { return };
        while self.entries.len() > limit && self.current > 0 {
            self.entries.pop_front();
            self.current -= 1;
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let mut history = MemoryHistory::default();
        assert_eq!(history.current(), "/");

        history.push("/planets");
        history.push("/planeta/3");
        assert_eq!(history.current(), "/planeta/3");

        let event = history.back().unwrap();
        assert_eq!(event.from, "/planeta/3");
        assert_eq!(event.to, "/planets");
        assert_eq!(event.direction, NavigationDirection::Back);

        history.forward();
        assert_eq!(history.current(), "/planeta/3");
        assert!(history.forward().is_none());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::default();
        history.push("/a");
        history.push("/b");
        history.back();
        history.push("/c");

        assert_eq!(history.len(), 3);
        assert!(!history.can_go_forward());
        assert_eq!(history.peek_back(), Some("/a"));
    }

    #[test]
    fn test_replace() {
        let mut history = MemoryHistory::default();
        history.push("/socios");
        let event = history.replace("/socios/1");

        assert_eq!(event.from, "/socios");
        assert_eq!(history.current(), "/socios/1");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_back_at_start() {
        let mut history = MemoryHistory::new("/start");
        assert!(!history.can_go_back());
        assert!(history.back().is_none());
        assert_eq!(history.peek_back(), None);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = MemoryHistory::default().with_limit(2);
        history.push("/a");
        history.push("/b");

        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), "/b");
        assert_eq!(history.peek_back(), Some("/a"));
    }

    #[test]
    fn test_clear_keeps_current() {
        let mut history = MemoryHistory::default();
        history.push("/a");
        history.push("/b");
        history.back();
        history.clear();

        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), "/a");
    }
}
