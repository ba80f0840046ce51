//! Self-graded flashcards. The only mode that feeds the scheduler.

use chrono::NaiveDate;

use super::step_forward;
use crate::error::PersistenceError;
use crate::models::{ReviewOutcome, ReviewState, WordEntry};
use crate::scheduler;
use crate::store::ReviewStateStore;

pub struct Flashcards {
    items: Vec<WordEntry>,
    index: usize,
    revealed: bool,
}

impl Flashcards {
    pub fn new(items: Vec<WordEntry>) -> Self {
        Self {
            items,
            index: 0,
            revealed: false,
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

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Show translation and example. Has no effect on grading.
    pub fn reveal(&mut self) {
        if self.current().is_some() {
            self.revealed = true;
        }
    }

    /// Grade the current card, store the new state, and move on.
    ///
    /// The store keeps the new snapshot even if persisting fails; that error
    /// is passed back after the index has advanced. Returns `Ok(None)` for an
    /// empty session.
    pub fn grade(
        &mut self,
        outcome: ReviewOutcome,
        store: &mut ReviewStateStore,
        today: NaiveDate,
    ) -> Result<Option<ReviewState>, PersistenceError> {
        let Some(entry) = self.current() else {
            return Ok(None);
        };
        let identity = entry.identity();

        let previous = store
            .get(&identity)
            .cloned()
            .unwrap_or_else(|| ReviewState::new(today));
        let next = scheduler::advance(&previous, outcome, today);
        let persisted = store.record(identity, next.clone());

        self.go_to(step_forward(self.index, self.items.len()));
        persisted.map(|()| Some(next))
    }

    fn go_to(&mut self, index: usize) {
        if index != self.index {
            self.index = index;
            self.revealed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::store::tests::MemoryBackend;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn words() -> Vec<WordEntry> {
        vec![
            WordEntry::new("あいじょう", "爱情").with_kanji("愛情"),
            WordEntry::new("いしき", "意识").with_kanji("意識"),
        ]
    }

    #[test]
    fn grading_writes_state_and_advances() {
        let backend = MemoryBackend::default();
        let mut store = ReviewStateStore::open(Box::new(backend.clone()));
        let mut cards = Flashcards::new(words());

        cards.reveal();
        let state = cards.grade(ReviewOutcome::Pass, &mut store, day(1)).unwrap().unwrap();

        assert_eq!((state.level, state.due), (1, day(2)));
        assert_eq!(cards.index(), 1);
        assert!(!cards.is_revealed());
        assert_eq!(store.get("愛情|あいじょう"), Some(&state));
        assert_eq!(*backend.saves.borrow(), 1);
    }

    #[test]
    fn grading_builds_on_stored_state() {
        let mut store = ReviewStateStore::open(Box::new(MemoryBackend::default()));

        Flashcards::new(words()).grade(ReviewOutcome::Pass, &mut store, day(1)).unwrap();
        let second = Flashcards::new(words())
            .grade(ReviewOutcome::Pass, &mut store, day(2))
            .unwrap()
            .unwrap();
        assert_eq!((second.level, second.due), (2, day(5)));

        let failed = Flashcards::new(words())
            .grade(ReviewOutcome::Fail, &mut store, day(20))
            .unwrap()
            .unwrap();
        assert_eq!((failed.level, failed.due), (0, day(20)));
        assert_eq!(failed.history.len(), 3);
    }

    #[test]
    fn last_card_stays_put() {
        let mut store = ReviewStateStore::open(Box::new(MemoryBackend::default()));
        let mut cards = Flashcards::new(words());

        cards.grade(ReviewOutcome::Pass, &mut store, day(1)).unwrap();
        cards.reveal();
        cards.grade(ReviewOutcome::Fail, &mut store, day(1)).unwrap();

        assert_eq!(cards.index(), 1);
        // index did not change, so the card stays revealed
        assert!(cards.is_revealed());
    }

    #[test]
    fn empty_session_is_a_no_op() {
        let backend = MemoryBackend::default();
        let mut store = ReviewStateStore::open(Box::new(backend.clone()));
        let mut cards = Flashcards::new(Vec::new());

        cards.reveal();
        assert!(!cards.is_revealed());
        assert_eq!(cards.grade(ReviewOutcome::Pass, &mut store, day(1)).unwrap(), None);
        assert_eq!(*backend.saves.borrow(), 0);
    }
}
