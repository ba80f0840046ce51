//! Vocabulary normalization, the bundled sample list, and search helpers.
//!
//! Imported word lists come from many hand-made JSON files, so each logical
//! field is looked up through an ordered list of accepted keys. The first key
//! holding a non-blank value wins.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::error::{ImportError, Rejection};
use crate::models::WordEntry;

/// Bundled five-word sample used until a word list is imported.
const BUNDLED_SAMPLE: &str = include_str!("../bundled/sample_vocabulary.json");

const WORD_KEYS: &[&str] = &["word", "kana", "reading"];
const KANJI_KEYS: &[&str] = &["kanji", "kanji_word"];
const POS_KEYS: &[&str] = &["partOfSpeech", "pos", "part_of_speech"];
const TRANSLATION_KEYS: &[&str] = &["translation", "cn", "zh", "definition", "meaning", "中文", "释义"];
const EXAMPLE_KEYS: &[&str] = &["example", "例句"];
const RELATED_KEYS: &[&str] = &["related"];

/// Resolve one field through its alias list.
fn lookup(record: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let text = match record.get(*key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}

/// Turn one loosely-typed record into a validated entry.
pub fn normalize_record(record: &Value) -> Result<WordEntry, Rejection> {
    let Value::Object(fields) = record else {
        return Err(Rejection::NotAnObject);
    };

    let word = lookup(fields, WORD_KEYS).ok_or(Rejection::MissingWord)?;
    let translation = lookup(fields, TRANSLATION_KEYS).ok_or(Rejection::MissingTranslation)?;

    Ok(WordEntry {
        word,
        kanji: lookup(fields, KANJI_KEYS),
        part_of_speech: lookup(fields, POS_KEYS),
        translation,
        example: lookup(fields, EXAMPLE_KEYS),
        related: lookup(fields, RELATED_KEYS),
    })
}

/// Normalize a whole parsed document. Bad records are dropped; the document
/// fails only if it is not an array or nothing survives.
pub fn normalize(document: &Value) -> Result<Vec<WordEntry>, ImportError> {
    let Value::Array(records) = document else {
        return Err(ImportError::NotASequence);
    };

    let mut entries = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for (i, record) in records.iter().enumerate() {
        match normalize_record(record) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                debug!(index = i, %reason, "dropping vocabulary record");
                dropped += 1;
            }
        }
    }

    if entries.is_empty() {
        return Err(ImportError::Empty);
    }
    if dropped > 0 {
        debug!(kept = entries.len(), dropped, "normalized vocabulary");
    }
    Ok(entries)
}

/// Parse and normalize vocabulary JSON text.
pub fn parse(json: &str) -> Result<Vec<WordEntry>, ImportError> {
    let document: Value = serde_json::from_str(json)?;
    normalize(&document)
}

/// The bundled sample list.
pub fn sample() -> Vec<WordEntry> {
    parse(BUNDLED_SAMPLE).unwrap_or_default()
}

/// Sorted distinct parts of speech, for the filter selector.
pub fn parts_of_speech(entries: &[WordEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| e.part_of_speech.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Entries matching a part-of-speech filter (`None` = all) and a
/// case-insensitive substring query over every text field.
pub fn filter<'a>(entries: &'a [WordEntry], query: &str, pos: Option<&str>) -> Vec<&'a WordEntry> {
    let query = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| match pos {
            Some(pos) => entry.part_of_speech.as_deref().unwrap_or("") == pos,
            None => true,
        })
        .filter(|entry| query.is_empty() || haystack(entry).contains(&query))
        .collect()
}

fn haystack(entry: &WordEntry) -> String {
    [
        Some(entry.word.as_str()),
        entry.kanji.as_deref(),
        Some(entry.translation.as_str()),
        entry.part_of_speech.as_deref(),
        entry.example.as_deref(),
        entry.related.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn canonical_record_normalizes() {
        let entry = normalize_record(&json!({
            "word": " あかじ ",
            "kanji": "赤字",
            "partOfSpeech": "名",
            "translation": "赤字;亏空",
            "example": "赤字を出す",
        }))
        .unwrap();
        assert_eq!(entry.word, "あかじ");
        assert_eq!(entry.kanji.as_deref(), Some("赤字"));
        assert_eq!(entry.part_of_speech.as_deref(), Some("名"));
        assert_eq!(entry.related, None);
    }

    #[test]
    fn aliases_resolve_first_match() {
        let entry = normalize_record(&json!({
            "kana": "いしき",
            "reading": "ignored",
            "kanji_word": "意識",
            "pos": "名",
            "cn": "",
            "zh": "意识",
            "meaning": "consciousness",
            "例句": "意識を失う",
        }))
        .unwrap();
        assert_eq!(entry.word, "いしき");
        assert_eq!(entry.kanji.as_deref(), Some("意識"));
        assert_eq!(entry.translation, "意识");
        assert_eq!(entry.example.as_deref(), Some("意識を失う"));
    }

    #[test]
    fn chinese_field_names_are_accepted() {
        let entry = normalize_record(&json!({ "reading": "あいづち", "释义": "帮腔" })).unwrap();
        assert_eq!(entry.translation, "帮腔");
    }

    #[test]
    fn numbers_are_stringified() {
        let entry = normalize_record(&json!({ "word": 100, "translation": "hundred" })).unwrap();
        assert_eq!(entry.word, "100");
    }

    #[test]
    fn records_missing_required_fields_are_rejected() {
        assert_eq!(normalize_record(&json!("text")), Err(Rejection::NotAnObject));
        assert_eq!(
            normalize_record(&json!({ "word": "   ", "translation": "x" })),
            Err(Rejection::MissingWord)
        );
        assert_eq!(
            normalize_record(&json!({ "word": "あ", "translation": null })),
            Err(Rejection::MissingTranslation)
        );
    }

    #[test]
    fn normalize_drops_bad_records() {
        let entries = normalize(&json!([
            { "word": "あ", "translation": "a" },
            { "word": "い" },
            42,
            { "kana": "う", "definition": "u" },
        ]))
        .unwrap();
        let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["あ", "う"]);
    }

    #[test]
    fn non_array_document_fails() {
        assert!(matches!(normalize(&json!({ "word": "あ" })), Err(ImportError::NotASequence)));
    }

    #[test]
    fn empty_result_fails() {
        assert!(matches!(normalize(&json!([{ "word": "あ" }])), Err(ImportError::Empty)));
        assert!(matches!(parse("[]"), Err(ImportError::Empty)));
    }

    #[test]
    fn malformed_json_fails() {
        assert!(matches!(parse("[{"), Err(ImportError::Json(_))));
    }

    #[test]
    fn bundled_sample_loads() {
        let entries = sample();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].identity(), "愛情|あいじょう");
    }

    #[test]
    fn filter_by_query_and_pos() {
        let entries = vec![
            WordEntry::new("あかじ", "赤字;亏空").with_part_of_speech("名"),
            WordEntry::new("あける", "Open").with_part_of_speech("動"),
            WordEntry::new("いしき", "意识"),
        ];

        assert_eq!(filter(&entries, "", None).len(), 3);
        assert_eq!(filter(&entries, "  OPEN ", None)[0].word, "あける");
        assert_eq!(filter(&entries, "", Some("名")).len(), 1);
        assert!(filter(&entries, "open", Some("名")).is_empty());
        assert_eq!(filter(&entries, "", Some(""))[0].word, "いしき");
    }

    #[test]
    fn parts_of_speech_are_sorted_and_unique() {
        let entries = vec![
            WordEntry::new("a", "a").with_part_of_speech("動"),
            WordEntry::new("b", "b").with_part_of_speech("名"),
            WordEntry::new("c", "c").with_part_of_speech("動"),
            WordEntry::new("d", "d"),
        ];
        let mut expected = vec!["動".to_string(), "名".to_string()];
        expected.sort();
        assert_eq!(parts_of_speech(&entries), expected);
    }
}
