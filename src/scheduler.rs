//! Fixed interval ladder scheduling.
//!
//! A word climbs one rung per successful review and drops back to the bottom
//! on failure. Each rung maps to a fixed number of days until the next review.
//! Every function here is total: levels are clamped and missing state is due.

use chrono::{Days, Local, NaiveDate};

use crate::models::{ReviewOutcome, ReviewRecord, ReviewState, ReviewStateMap, WordEntry};

/// Days until the next review, indexed by mastery level.
pub const INTERVAL_LADDER: [u64; 5] = [0, 1, 3, 7, 14];

/// Highest mastery level.
pub const MAX_LEVEL: u8 = (INTERVAL_LADDER.len() - 1) as u8;

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Clamp an arbitrary level onto the ladder.
pub fn clamp_level(level: u8) -> u8 {
    level.min(MAX_LEVEL)
}

/// Due date for a word reviewed on `reference` that now sits at `level`.
pub fn compute_due(reference: NaiveDate, level: u8) -> NaiveDate {
    let offset = INTERVAL_LADDER[clamp_level(level) as usize];
    reference
        .checked_add_days(Days::new(offset))
        .unwrap_or(NaiveDate::MAX)
}

/// Next state after reviewing a word on `today`. `previous` is left untouched.
pub fn advance(previous: &ReviewState, outcome: ReviewOutcome, today: NaiveDate) -> ReviewState {
    let level = match outcome {
        ReviewOutcome::Pass => clamp_level(previous.level).saturating_add(1).min(MAX_LEVEL),
        ReviewOutcome::Fail => 0,
    };

    let mut history = Vec::with_capacity(previous.history.len() + 1);
    history.extend_from_slice(&previous.history);
    history.push(ReviewRecord {
        date: today,
        result: outcome,
    });

    ReviewState {
        level,
        due: compute_due(today, level),
        history,
    }
}

/// A word is due if it has never been reviewed or its due day has arrived.
pub fn is_due(state: Option<&ReviewState>, reference: NaiveDate) -> bool {
    match state {
        None => true,
        Some(state) => state.due <= reference,
    }
}

/// Entries due on `reference`, in vocabulary order.
pub fn due_entries(entries: &[WordEntry], states: &ReviewStateMap, reference: NaiveDate) -> Vec<WordEntry> {
    entries
        .iter()
        .filter(|entry| is_due(states.get(&entry.identity()), reference))
        .cloned()
        .collect()
}

/// Interval each outcome would schedule, for the grading buttons.
pub fn preview(state: Option<&ReviewState>, today: NaiveDate) -> [(ReviewOutcome, String); 2] {
    let fresh = ReviewState::new(today);
    let current = state.unwrap_or(&fresh);

    [ReviewOutcome::Fail, ReviewOutcome::Pass].map(|outcome| {
        let next = advance(current, outcome, today);
        let days = (next.due - today).num_days();
        (outcome, format_interval(days))
    })
}

fn format_interval(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        d => format!("{}d", d),
    }
}
