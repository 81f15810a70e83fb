use carriot_link::MovementRecord;
use std::collections::VecDeque;
use std::fmt;

/// Bounded list of entries, newest first.
#[derive(Debug, Clone)]
pub struct History<T> {
    records: VecDeque<T>,
    capacity: usize,
    placeholder: &'static str,
}

/// Movements the API accepted from this dashboard.
pub type MovementHistory = History<MovementRecord>;

impl MovementHistory {
    pub fn new(capacity: usize) -> Self {
        Self::with_placeholder(capacity, "No movements yet")
    }
}

impl<T> History<T> {
    /// `placeholder` is what an empty history displays as.
    pub fn with_placeholder(capacity: usize, placeholder: &'static str) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
            placeholder,
        }
    }

    pub fn push(&mut self, record: T) {
        if self.capacity == 0 {
            return;
        }
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    /// Replaces the contents with `records`, given newest first.
    pub fn replace(&mut self, records: impl IntoIterator<Item = T>) {
        self.records = records.into_iter().take(self.capacity).collect();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.records.truncate(capacity);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&T> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }
}

impl<T: fmt::Display> fmt::Display for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            return write!(f, "{}", self.placeholder);
        }
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carriot_link::{CommandId, MovementRequest, Speed};

    fn record(action: &str) -> MovementRecord {
        MovementRequest::new(CommandId::new(action), Speed::Normal).into()
    }

    #[test]
    fn test_keeps_newest_within_capacity() {
        let mut history = MovementHistory::new(3);
        for action in ["adelante", "atras", "detener", "90-derecha"] {
            history.push(record(action));
        }

        let actions: Vec<_> = history.iter().map(|r| r.action.as_str()).collect();
        assert_eq!(actions, vec!["90-derecha", "detener", "atras"]);
        assert_eq!(history.latest().unwrap().action.as_str(), "90-derecha");
    }

    #[test]
    fn test_shrinking_capacity_drops_oldest() {
        let mut history = MovementHistory::new(5);
        for action in ["a", "b", "c", "d"] {
            history.push(record(action));
        }
        history.set_capacity(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().last().unwrap().action.as_str(), "c");

        history.set_capacity(0);
        history.push(record("e"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_display_lists_one_movement_per_line() {
        let mut history = MovementHistory::new(5);
        assert_eq!(history.to_string(), "No movements yet");

        history.push(record("atras"));
        history.push(record("vuelta-atras-derecha"));
        let text = history.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("VUELTA ATRAS DERECHA | NORMAL"));
        assert!(lines[1].ends_with("ATRAS | NORMAL"));
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut history = MovementHistory::new(usize::MAX);
        history.push(record("adelante"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), usize::MAX);
    }

    #[test]
    fn test_replace_keeps_newest_within_capacity() {
        let mut history: History<&str> = History::with_placeholder(2, "Loading...");
        assert_eq!(history.to_string(), "Loading...");

        history.push("stale");
        history.replace(["newest", "middle", "oldest"]);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec!["newest", "middle"]);
        assert_eq!(history.to_string(), "newest\nmiddle");
    }
}
