//! Rolling mission log shown to the player.

use crate::core::constants::LOG_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded message log. Holds the last `LOG_CAPACITY` messages, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameLog {
    messages: VecDeque<String>,
}

impl GameLog {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Append a message, evicting the oldest once the log is full.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.messages.len() >= LOG_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message, if any.
    pub fn last(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Number of messages currently held that equal `message`.
    pub fn count(&self, message: &str) -> usize {
        self.messages.iter().filter(|m| m.as_str() == message).count()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.messages.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_is_empty() {
        let log = GameLog::new();
        assert!(log.is_empty());
        assert_eq!(log.last(), None);
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut log = GameLog::new();
        log.push("First");
        log.push("Second");
        log.push("Third");

        let messages: Vec<&str> = log.iter().collect();
        assert_eq!(messages, vec!["First", "Second", "Third"]);
        assert_eq!(log.last(), Some("Third"));
    }

    #[test]
    fn test_push_evicts_oldest_at_capacity() {
        let mut log = GameLog::new();
        for i in 0..LOG_CAPACITY {
            log.push(format!("Message {i}"));
        }
        assert_eq!(log.len(), LOG_CAPACITY);

        log.push("Overflow");
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.iter().next(), Some("Message 1"));
        assert_eq!(log.last(), Some("Overflow"));
    }

    #[test]
    fn test_count_matches_exact_messages() {
        let mut log = GameLog::new();
        log.push("Warning: Fuel running low!");
        log.push("Hit drone for 10 damage!");
        log.push("Warning: Fuel running low!");
        assert_eq!(log.count("Warning: Fuel running low!"), 2);
        assert_eq!(log.count("Missed drone!"), 0);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut log = GameLog::new();
        log.push("Welcome to Mecha Dungeon Delver!");
        let json = serde_json::to_string(&log).expect("serialize");
        let loaded: GameLog = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loaded.to_vec(), log.to_vec());
    }
}
