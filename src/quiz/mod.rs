//! Quiz mode engines.
//!
//! Each engine walks a fixed session front to back. Moving past either end
//! is clamped; there is no wraparound.

mod choice;
mod flashcard;
mod typing;

pub use choice::MultipleChoice;
pub use flashcard::Flashcards;
pub use typing::{Typing, TypingStatus};

use serde::{Deserialize, Serialize};

/// Which engine drives the practice tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    Flashcard,
    MultipleChoice,
    Typing,
}

impl QuizMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            QuizMode::Flashcard => "Flashcards (SRS)",
            QuizMode::MultipleChoice => "Multiple choice",
            QuizMode::Typing => "Type the meaning",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            QuizMode::Flashcard => QuizMode::MultipleChoice,
            QuizMode::MultipleChoice => QuizMode::Typing,
            QuizMode::Typing => QuizMode::Flashcard,
        }
    }
}

impl Default for QuizMode {
    fn default() -> Self {
        QuizMode::Flashcard
    }
}

/// Index one step forward, stopping at the last item.
pub(crate) fn step_forward(index: usize, len: usize) -> usize {
    (index + 1).min(len.saturating_sub(1))
}

/// Index one step back, stopping at the first item.
pub(crate) fn step_back(index: usize) -> usize {
    index.saturating_sub(1)
}
