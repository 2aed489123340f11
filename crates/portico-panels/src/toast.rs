//! Non-blocking toast queue.
//!
//! Failed mutations surface here instead of through blocking dialogs.
//! The queue is bounded; pushing onto a full queue evicts the oldest
//! toast first.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// One queued toast.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Dismissal handle. Time-ordered, so renderers can sort stably.
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded FIFO of toasts awaiting display or dismissal.
///
/// Not synchronized itself; owners guard it with their own lock.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    capacity: usize,
}

impl ToastQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            toasts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Enqueue a toast and return its id, evicting the oldest when full.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> Uuid {
        let toast = Toast {
            id: Uuid::now_v7(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        };
        let id = toast.id;
        if self.toasts.len() == self.capacity {
            self.toasts.pop_front();
        }
        self.toasts.push_back(toast);
        id
    }

    /// Remove a toast by id. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: Uuid) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Owned copy, oldest first, for embedding in snapshots.
    pub fn to_vec(&self) -> Vec<Toast> {
        self.toasts.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_grows_and_returns_distinct_ids() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastLevel::Error, "first");
        let b = queue.push(ToastLevel::Info, "second");

        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);
        let messages: Vec<&str> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn full_queue_evicts_oldest() {
        let mut queue = ToastQueue::new(2);
        queue.push(ToastLevel::Error, "one");
        queue.push(ToastLevel::Error, "two");
        queue.push(ToastLevel::Error, "three");

        assert_eq!(queue.len(), 2);
        let messages: Vec<&str> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastLevel::Error, "keep");
        let b = queue.push(ToastLevel::Error, "drop");

        queue.dismiss(b);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().map(|t| t.id), Some(a));

        // Dismissing an already-gone id changes nothing.
        queue.dismiss(b);
        assert_eq!(queue.len(), 1);
    }
}
