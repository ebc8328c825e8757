//! In-memory chat transcript.

use crate::models::chat::{ChatMessage, HistoryTurn};

/// Ordered list of messages; insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Project the whole transcript into role-tagged turns.
    pub fn history(&self) -> Vec<HistoryTurn> {
        self.messages.iter().map(HistoryTurn::from).collect()
    }
}
