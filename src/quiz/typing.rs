//! Typed answers checked against the translation.
//!
//! Practice only: results here never touch review state.

use super::step_forward;
use crate::models::WordEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingStatus {
    #[default]
    Idle,
    Right,
    Wrong,
}

/// Strip all whitespace and lowercase, so spacing and case never matter.
pub fn normalize_answer(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub struct Typing {
    items: Vec<WordEntry>,
    index: usize,
    status: TypingStatus,
}

impl Typing {
    pub fn new(items: Vec<WordEntry>) -> Self {
        Self {
            items,
            index: 0,
            status: TypingStatus::Idle,
        }
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.items.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn status(&self) -> TypingStatus {
        self.status
    }

    /// Check an answer. Can be repeated; the latest submission wins.
    pub fn submit(&mut self, answer: &str) -> TypingStatus {
        let Some(entry) = self.current() else {
            return self.status;
        };
        let right = normalize_answer(answer) == normalize_answer(&entry.translation);
        self.status = if right {
            TypingStatus::Right
        } else {
            TypingStatus::Wrong
        };
        self.status
    }

    pub fn next(&mut self) {
        self.index = step_forward(self.index, self.items.len());
        self.status = TypingStatus::Idle;
    }
}
