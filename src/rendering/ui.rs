//! # User Interface Elements
//!
//! The narrative message log shown beside the map.

use crate::{config, GameEvent, MessageImportance};
use std::collections::VecDeque;

/// One line in the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub importance: MessageImportance,
}

impl LogEntry {
    /// Prefix a text front end puts before the message.
    pub fn marker(&self) -> &'static str {
        match self.importance {
            MessageImportance::Low => " ",
            MessageImportance::Normal => ">",
            MessageImportance::High => "!",
            MessageImportance::Critical => "‼",
        }
    }
}

/// Newest-first log of narrative messages with a fixed capacity.
///
/// Older entries are discarded once the capacity is exceeded.
///
/// # Examples
///
/// ```
/// use descent::{GameEvent, MessageImportance, MessageLog};
///
/// let mut log = MessageLog::new();
/// log.add_message("first".to_string(), MessageImportance::Normal);
/// log.add_event(&GameEvent::Welcome);
/// assert_eq!(log.latest(), Some("Welcome to the dungeon!"));
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<LogEntry>,
    max_messages: usize,
}

impl MessageLog {
    /// Creates a log holding the standard number of messages.
    pub fn new() -> Self {
        Self::with_capacity(config::MESSAGE_LOG_CAPACITY)
    }

    pub fn with_capacity(max_messages: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_messages),
            max_messages,
        }
    }

    /// Adds a message at the front, dropping the oldest beyond capacity.
    pub fn add_message(&mut self, text: String, importance: MessageImportance) {
        self.messages.push_front(LogEntry { text, importance });
        self.messages.truncate(self.max_messages);
    }

    pub fn add_event(&mut self, event: &GameEvent) {
        self.add_message(event.to_string(), event.importance());
    }

    /// Adds events in the order they happened, so the last one ends up newest.
    pub fn add_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.add_event(event);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Text of the most recent message.
    pub fn latest(&self) -> Option<&str> {
        self.messages.front().map(|entry| entry.text.as_str())
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.messages.iter()
    }

    /// Entries at or above `threshold`, newest first.
    pub fn at_least(&self, threshold: MessageImportance) -> impl Iterator<Item = &LogEntry> {
        self.messages
            .iter()
            .filter(move |entry| entry.importance >= threshold)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
