//! Data models for vocabulary entries and their review state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-graded or auto-graded result of one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Pass,
    Fail,
}

impl ReviewOutcome {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Fail),
            '2' => Some(Self::Pass),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pass => "Know it",
            Self::Fail => "Don't know",
        }
    }

    pub fn color_for_theme(&self, theme: &crate::ui::theme::Theme) -> ratatui::style::Color {
        match self {
            Self::Pass => theme.colors.rating_pass,
            Self::Fail => theme.colors.rating_fail,
        }
    }
}

/// A single vocabulary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Reading form (kana).
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kanji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

impl WordEntry {
    #[cfg(test)]
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            kanji: None,
            part_of_speech: None,
            translation: translation.into(),
            example: None,
            related: None,
        }
    }

    #[cfg(test)]
    pub fn with_kanji(mut self, kanji: impl Into<String>) -> Self {
        self.kanji = Some(kanji.into());
        self
    }

    #[cfg(test)]
    pub fn with_part_of_speech(mut self, pos: impl Into<String>) -> Self {
        self.part_of_speech = Some(pos.into());
        self
    }

    /// Key under which review state is stored: `kanji_or_word|word`.
    ///
    /// Two entries sharing a reading but not a kanji (or the other way round)
    /// get distinct identities, and reloading the same pair yields the same key.
    pub fn identity(&self) -> String {
        let head = self
            .kanji
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.word);
        format!("{}|{}", head, self.word)
    }

    /// Heading shown on cards: `漢字（かな）` when kanji display is on.
    pub fn title(&self, show_kanji: bool) -> String {
        match self.kanji.as_deref() {
            Some(kanji) if show_kanji && !kanji.is_empty() => format!("{}（{}）", kanji, self.word),
            _ => self.word.clone(),
        }
    }
}

/// One line of a review history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub date: NaiveDate,
    pub result: ReviewOutcome,
}

/// Spaced repetition progress for one word identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Mastery rung, 0..=4.
    pub level: u8,
    /// Earliest day the word should come up again.
    pub due: NaiveDate,
    /// Append-only, oldest first.
    #[serde(default)]
    pub history: Vec<ReviewRecord>,
}

impl ReviewState {
    /// State for a word the store has not seen before.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            level: 0,
            due: today,
            history: Vec::new(),
        }
    }
}

/// Identity -> review state. Ordered so persisted files diff cleanly.
pub type ReviewStateMap = BTreeMap<String, ReviewState>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identity_prefers_kanji() {
        let entry = WordEntry::new("あいじょう", "爱情").with_kanji("愛情");
        assert_eq!(entry.identity(), "愛情|あいじょう");
    }

    #[test]
    fn identity_falls_back_to_word() {
        let entry = WordEntry::new("いざかや", "日式小酒馆");
        assert_eq!(entry.identity(), "いざかや|いざかや");

        let blank_kanji = WordEntry::new("いざかや", "日式小酒馆").with_kanji("");
        assert_eq!(blank_kanji.identity(), "いざかや|いざかや");
    }

    #[test]
    fn identity_separates_homophones() {
        let a = WordEntry::new("こうえん", "公园").with_kanji("公園");
        let b = WordEntry::new("こうえん", "演讲").with_kanji("講演");
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn title_respects_kanji_toggle() {
        let entry = WordEntry::new("あかじ", "赤字").with_kanji("赤字");
        assert_eq!(entry.title(true), "赤字（あかじ）");
        assert_eq!(entry.title(false), "あかじ");
    }

    #[test]
    fn review_state_serializes_iso_dates() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let state = ReviewState {
            level: 1,
            due: day,
            history: vec![ReviewRecord {
                date: day,
                result: ReviewOutcome::Pass,
            }],
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"level":1,"due":"2024-03-09","history":[{"date":"2024-03-09","result":"pass"}]}"#
        );
    }

    #[test]
    fn word_entry_uses_camel_case_fields() {
        let entry = WordEntry::new("あいづち", "随声附和").with_part_of_speech("名");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["partOfSpeech"], "名");
        assert!(json.get("kanji").is_none());
    }
}
