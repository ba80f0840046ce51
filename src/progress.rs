//! Progress summary over the word list and its review state.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::models::{ReviewStateMap, WordEntry};
use crate::scheduler::{self, MAX_LEVEL};

/// Snapshot of how far along the learner is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub total: usize,
    /// Entries per mastery level. Unseen entries count as level 0.
    pub levels: [usize; MAX_LEVEL as usize + 1],
    pub due: usize,
    /// Entries at level 1 or above.
    pub learned: usize,
    /// `learned / total` as a whole percentage, rounded half up.
    pub rate: u32,
    /// Review records across all current entries.
    pub reviews: usize,
    pub daily_streak: u32,
}

pub fn summarize(entries: &[WordEntry], states: &ReviewStateMap, reference: NaiveDate) -> ProgressStats {
    let mut stats = ProgressStats {
        total: entries.len(),
        ..Default::default()
    };
    let mut review_days = HashSet::new();

    for entry in entries {
        let state = states.get(&entry.identity());
        let level = state.map_or(0, |s| scheduler::clamp_level(s.level));
        stats.levels[level as usize] += 1;

        if scheduler::is_due(state, reference) {
            stats.due += 1;
        }
        if let Some(state) = state {
            stats.reviews += state.history.len();
            review_days.extend(state.history.iter().map(|r| r.date));
        }
    }

    stats.learned = stats.levels[1..].iter().sum();
    stats.rate = percent(stats.learned, stats.total);
    stats.daily_streak = daily_streak(&review_days, reference);
    stats
}

/// Whole percentage, half rounded up; 0 for an empty total.
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part * 100 + total / 2) / total) as u32
}

/// Consecutive review days ending today, or yesterday if nothing yet today.
fn daily_streak(days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today.checked_sub_days(Days::new(1));
    let mut check = if days.contains(&today) {
        Some(today)
    } else {
        yesterday
    };

    let mut streak = 0;
    while let Some(day) = check.filter(|d| days.contains(d)) {
        streak += 1;
        check = day.checked_sub_days(Days::new(1));
    }
    streak
}
