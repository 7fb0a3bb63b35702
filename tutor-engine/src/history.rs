//! Bounded per-conversation dialogue history.

use prompt::ChatMessage;

/// Maximum stored turns per conversation. Holds after every completed call;
/// trimming always drops from the oldest end.
pub const MAX_HISTORY: usize = 10;

/// Ordered record of user/assistant turns for one conversation. The system
/// instruction is synthesized fresh per call and never stored here.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    turns: Vec<ChatMessage>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatMessage::user(text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ChatMessage::assistant(text));
    }

    /// All stored turns, oldest first.
    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    /// Every turn except the most recent one. This is the history window sent
    /// to the backend alongside the active query, which must not appear twice.
    pub fn prior(&self) -> &[ChatMessage] {
        match self.turns.len() {
            0 => &[],
            n => &self.turns[..n - 1],
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drops the oldest turns until at most [`MAX_HISTORY`] remain.
    pub fn trim(&mut self) {
        if self.turns.len() > MAX_HISTORY {
            let excess = self.turns.len() - MAX_HISTORY;
            self.turns.drain(..excess);
        }
    }
}
