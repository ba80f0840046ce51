//! Multiple choice over translations.
//!
//! The option set for an index is drawn once, when that index becomes current,
//! and is held until the index changes. Redraws never happen on read.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::{step_back, step_forward};
use crate::models::WordEntry;

const DISTRACTORS: usize = 3;

/// Shuffled option slots for one question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChoiceSet {
    /// Session positions, in display order.
    pub options: Vec<usize>,
    /// Slot in `options` holding the right answer.
    pub correct: usize,
}

impl ChoiceSet {
    fn draw<R: Rng + ?Sized>(items: &[WordEntry], index: usize, rng: &mut R) -> Self {
        if index >= items.len() {
            return Self::default();
        }

        let others: Vec<usize> = (0..items.len()).filter(|&i| i != index).collect();
        let mut options: Vec<usize> = others.choose_multiple(rng, DISTRACTORS).copied().collect();
        options.push(index);
        options.shuffle(rng);

        let correct = options.iter().position(|&i| i == index).unwrap_or_default();
        Self { options, correct }
    }
}

pub struct MultipleChoice {
    items: Vec<WordEntry>,
    index: usize,
    choices: ChoiceSet,
    picked: Option<usize>,
}

impl MultipleChoice {
    pub fn new<R: Rng + ?Sized>(items: Vec<WordEntry>, rng: &mut R) -> Self {
        let choices = ChoiceSet::draw(&items, 0, rng);
        Self {
            items,
            index: 0,
            choices,
            picked: None,
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

    pub fn choices(&self) -> &ChoiceSet {
        &self.choices
    }

    /// Option entries in display order.
    pub fn options(&self) -> impl Iterator<Item = &WordEntry> {
        self.choices.options.iter().filter_map(|&i| self.items.get(i))
    }

    pub fn picked(&self) -> Option<usize> {
        self.picked
    }

    pub fn is_answered(&self) -> bool {
        self.picked.is_some()
    }

    /// Lock in an answer for the current question.
    ///
    /// Returns whether it was right, or `None` when the question is already
    /// answered, the slot does not exist, or the session is empty.
    pub fn pick(&mut self, slot: usize) -> Option<bool> {
        if self.is_answered() || slot >= self.choices.options.len() {
            return None;
        }
        self.picked = Some(slot);
        Some(slot == self.choices.correct)
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.go_to(step_forward(self.index, self.items.len()), rng);
    }

    /// Go back one question. Its options are drawn afresh.
    pub fn previous<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.go_to(step_back(self.index), rng);
    }

    fn go_to<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        if index == self.index {
            return;
        }
        self.index = index;
        self.picked = None;
        self.choices = ChoiceSet::draw(&self.items, index, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(n: usize) -> Vec<WordEntry> {
        (0..n).map(|i| WordEntry::new(format!("w{}", i), format!("t{}", i))).collect()
    }

    #[test]
    fn options_hold_answer_and_distinct_distractors() {
        let mut rng = StdRng::seed_from_u64(11);
        let quiz = MultipleChoice::new(session(6), &mut rng);
        let set = quiz.choices();

        assert_eq!(set.options.len(), 4);
        assert_eq!(set.options[set.correct], 0);
        let unique: HashSet<_> = set.options.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn small_sessions_get_fewer_options() {
        let mut rng = StdRng::seed_from_u64(12);
        let quiz = MultipleChoice::new(session(2), &mut rng);
        assert_eq!(quiz.choices().options.len(), 2);

        let single = MultipleChoice::new(session(1), &mut rng);
        assert_eq!(single.choices(), &ChoiceSet { options: vec![0], correct: 0 });
    }

    #[test]
    fn options_are_stable_across_reads() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut quiz = MultipleChoice::new(session(10), &mut rng);
        quiz.next(&mut rng);

        let first = quiz.choices().clone();
        let words: Vec<String> = quiz.options().map(|e| e.word.clone()).collect();
        for _ in 0..5 {
            assert_eq!(quiz.choices(), &first);
            let again: Vec<String> = quiz.options().map(|e| e.word.clone()).collect();
            assert_eq!(again, words);
        }
        quiz.pick(0);
        assert_eq!(quiz.choices(), &first);
    }

    #[test]
    fn pick_locks_until_advance() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut quiz = MultipleChoice::new(session(5), &mut rng);
        let correct = quiz.choices().correct;

        assert_eq!(quiz.pick(correct), Some(true));
        assert_eq!(quiz.pick((correct + 1) % 4), None);
        assert_eq!(quiz.picked(), Some(correct));

        quiz.next(&mut rng);
        assert!(!quiz.is_answered());
        let wrong = (quiz.choices().correct + 1) % 4;
        assert_eq!(quiz.pick(wrong), Some(false));
    }

    #[test]
    fn out_of_range_pick_is_rejected() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut quiz = MultipleChoice::new(session(3), &mut rng);
        assert_eq!(quiz.pick(7), None);
        assert!(!quiz.is_answered());

        let mut empty = MultipleChoice::new(Vec::new(), &mut rng);
        assert_eq!(empty.current(), None);
        assert_eq!(empty.pick(0), None);
    }

    #[test]
    fn clamped_moves_keep_the_question() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut quiz = MultipleChoice::new(session(2), &mut rng);

        quiz.pick(0);
        let before = quiz.choices().clone();
        quiz.previous(&mut rng);
        assert_eq!(quiz.index(), 0);
        assert_eq!(quiz.choices(), &before);
        assert!(quiz.is_answered());

        quiz.next(&mut rng);
        quiz.next(&mut rng);
        assert_eq!(quiz.index(), 1);
    }

    #[test]
    fn redo_previous_redraws_options() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut quiz = MultipleChoice::new(session(12), &mut rng);
        quiz.next(&mut rng);
        quiz.pick(0);

        quiz.previous(&mut rng);
        assert_eq!(quiz.index(), 0);
        assert!(!quiz.is_answered());
        let set = quiz.choices();
        assert_eq!(set.options[set.correct], 0);
    }

    #[test]
    fn returning_to_a_question_draws_a_new_option_set() {
        let mut rng = StdRng::seed_from_u64(19);
        let mut quiz = MultipleChoice::new(session(12), &mut rng);
        let original = quiz.choices().clone();

        let mut redrawn = Vec::new();
        for _ in 0..20 {
            quiz.next(&mut rng);
            quiz.previous(&mut rng);
            assert_eq!(quiz.index(), 0);
            let set = quiz.choices().clone();
            assert_eq!(set.options[set.correct], 0);
            redrawn.push(set);
        }
        assert!(redrawn.iter().any(|set| *set != original));
    }

    #[test]
    fn distractors_cover_the_session() {
        let mut rng = StdRng::seed_from_u64(18);
        let items = session(8);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let set = ChoiceSet::draw(&items, 3, &mut rng);
            seen.extend(set.options.iter().copied().filter(|&i| i != 3));
        }
        assert_eq!(seen.len(), 7);
    }
}
