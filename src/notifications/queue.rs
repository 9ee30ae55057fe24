// SPDX-License-Identifier: MPL-2.0
//! Backlogs and the display set used by the scheduler.
//!
//! - [`PendingQueue`]: FIFO of admitted messages not yet shown
//! - [`DisplaySet`]: ordered messages currently shown
//! - [`RemovalQueue`]: FIFO of expired messages awaiting their exit

use super::message::{Message, MessageKey};
use std::collections::VecDeque;

/// A message together with the key it was admitted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: MessageKey,
    pub message: Message,
}

impl Entry {
    pub fn new(key: MessageKey, message: Message) -> Self {
        Self { key, message }
    }

    /// Returns true if both entries carry the same non-zero id.
    #[must_use]
    pub fn same_identity(&self, id: u32) -> bool {
        id != 0 && self.message.id() == id
    }
}

/// Messages waiting to be displayed, oldest first.
#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: VecDeque<Entry>,
}

impl PendingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, entry: Entry) {
        self.entries.push_back(entry);
    }

    /// Puts an entry back at the head, ahead of everything else.
    pub fn push_front(&mut self, entry: Entry) {
        self.entries.push_front(entry);
    }

    pub fn pop_front(&mut self) -> Option<Entry> {
        self.entries.pop_front()
    }

    /// Returns true if a message with this non-zero id is queued.
    #[must_use]
    pub fn contains_id(&self, id: u32) -> bool {
        self.entries.iter().any(|e| e.same_identity(id))
    }

    /// Empties the queue, returning how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

/// Messages currently shown, in the order they were displayed.
#[derive(Debug, Default)]
pub struct DisplaySet {
    entries: Vec<Entry>,
}

impl DisplaySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Removes an entry, keeping the order of the others.
    pub fn remove(&mut self, key: MessageKey) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(pos))
    }

    #[must_use]
    pub fn get(&self, key: MessageKey) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    #[must_use]
    pub fn contains(&self, key: MessageKey) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn contains_id(&self, id: u32) -> bool {
        self.entries.iter().any(|e| e.same_identity(id))
    }

    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

/// Keys of displayed messages whose time is up, oldest expiry first.
#[derive(Debug, Default)]
pub struct RemovalQueue {
    keys: VecDeque<MessageKey>,
}

impl RemovalQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key. A key already waiting keeps its place.
    ///
    /// Returns false if the key was already queued.
    pub fn push_back(&mut self, key: MessageKey) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push_back(key);
        true
    }

    pub fn pop_front(&mut self) -> Option<MessageKey> {
        self.keys.pop_front()
    }

    /// Drops a key wherever it is in the queue.
    pub fn remove(&mut self, key: MessageKey) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        self.keys.len() != before
    }

    #[must_use]
    pub fn contains(&self, key: MessageKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: u64, id: u32) -> Entry {
        Entry::new(MessageKey::new(key), Message::new(format!("m{key}")).with_id(id))
    }

    #[test]
    fn pending_queue_is_fifo() {
        let mut queue = PendingQueue::new();
        queue.push_back(entry(1, 0));
        queue.push_back(entry(2, 0));
        queue.push_back(entry(3, 0));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_front())
            .map(|e| e.key.value())
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn pending_queue_push_front_jumps_the_line() {
        let mut queue = PendingQueue::new();
        queue.push_back(entry(1, 0));
        queue.push_front(entry(2, 0));
        assert_eq!(queue.pop_front().map(|e| e.key.value()), Some(2));
    }

    #[test]
    fn zero_id_never_matches() {
        let mut queue = PendingQueue::new();
        queue.push_back(entry(1, 0));
        assert!(!queue.contains_id(0));

        let mut set = DisplaySet::new();
        set.insert(entry(2, 0));
        assert!(!set.contains_id(0));
    }

    #[test]
    fn contains_id_finds_non_zero_ids() {
        let mut queue = PendingQueue::new();
        queue.push_back(entry(1, 5));
        assert!(queue.contains_id(5));
        assert!(!queue.contains_id(6));
    }

    #[test]
    fn clear_reports_dropped_count() {
        let mut queue = PendingQueue::new();
        queue.push_back(entry(1, 0));
        queue.push_back(entry(2, 0));
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn display_set_remove_keeps_order() {
        let mut set = DisplaySet::new();
        set.insert(entry(1, 0));
        set.insert(entry(2, 0));
        set.insert(entry(3, 0));

        let removed = set.remove(MessageKey::new(2)).expect("entry present");
        assert_eq!(removed.key.value(), 2);
        let keys: Vec<_> = set.iter().map(|e| e.key.value()).collect();
        assert_eq!(keys, vec![1, 3]);
        assert!(set.remove(MessageKey::new(2)).is_none());
    }

    #[test]
    fn removal_queue_ignores_repeated_keys() {
        let mut queue = RemovalQueue::new();
        assert!(queue.push_back(MessageKey::new(1)));
        assert!(!queue.push_back(MessageKey::new(1)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn removal_queue_remove_from_middle() {
        let mut queue = RemovalQueue::new();
        queue.push_back(MessageKey::new(1));
        queue.push_back(MessageKey::new(2));
        queue.push_back(MessageKey::new(3));

        assert!(queue.remove(MessageKey::new(2)));
        assert!(!queue.remove(MessageKey::new(2)));
        let keys: Vec<_> = queue.iter().map(|k| k.value()).collect();
        assert_eq!(keys, vec![1, 3]);
    }
}
