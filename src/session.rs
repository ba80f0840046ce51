//! Practice session assembly.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::WordEntry;

/// Session sizes offered in the practice tab.
pub const SESSION_SIZES: [usize; 4] = [10, 20, 30, 50];

pub const DEFAULT_SESSION_SIZE: usize = 20;

/// Next size in the cycle; unknown sizes restart at the smallest.
pub fn next_session_size(current: usize) -> usize {
    SESSION_SIZES
        .iter()
        .position(|&n| n == current)
        .map(|i| SESSION_SIZES[(i + 1) % SESSION_SIZES.len()])
        .unwrap_or(SESSION_SIZES[0])
}

/// Draw a practice session.
///
/// Uses the due pool when it has anything in it, otherwise the fallback pool.
/// The result is a uniformly shuffled copy of that pool cut down to at most
/// `requested` entries.
pub fn build_session<R: Rng + ?Sized>(
    due_pool: &[WordEntry],
    fallback_pool: &[WordEntry],
    requested: usize,
    rng: &mut R,
) -> Vec<WordEntry> {
    let source = if due_pool.is_empty() { fallback_pool } else { due_pool };

    let mut session = source.to_vec();
    session.shuffle(rng);
    session.truncate(requested);

    debug!(
        from_due = !due_pool.is_empty(),
        pool = source.len(),
        size = session.len(),
        "built practice session"
    );
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(names: &[&str]) -> Vec<WordEntry> {
        names.iter().map(|n| WordEntry::new(*n, *n)).collect()
    }

    fn names(session: &[WordEntry]) -> Vec<String> {
        let mut v: Vec<String> = session.iter().map(|e| e.word.clone()).collect();
        v.sort();
        v
    }

    #[test]
    fn prefers_due_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = build_session(&words(&["a", "b"]), &words(&["x", "y", "z"]), 10, &mut rng);
        assert_eq!(names(&session), vec!["a", "b"]);
    }

    #[test]
    fn falls_back_when_nothing_due() {
        let mut rng = StdRng::seed_from_u64(2);
        let session = build_session(&[], &words(&["x", "y", "z"]), 10, &mut rng);
        assert_eq!(names(&session), vec!["x", "y", "z"]);
    }

    #[test]
    fn truncates_to_requested_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = words(&["a", "b", "c", "d", "e", "f"]);
        let session = build_session(&pool, &[], 4, &mut rng);
        assert_eq!(session.len(), 4);
        assert!(session.iter().all(|e| pool.contains(e)));
    }

    #[test]
    fn empty_pools_give_empty_session() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(build_session(&[], &[], 20, &mut rng).is_empty());
    }

    #[test]
    fn session_sizes_cycle() {
        assert_eq!(next_session_size(10), 20);
        assert_eq!(next_session_size(50), 10);
        assert_eq!(next_session_size(7), 10);
    }

    #[test]
    fn each_build_is_a_fresh_shuffle() {
        let mut rng = StdRng::seed_from_u64(5);
        let pool = words(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]);
        let order = |s: &[WordEntry]| s.iter().map(|e| e.word.clone()).collect::<Vec<_>>();

        let first = order(&build_session(&pool, &[], 12, &mut rng));
        let mut heads = HashMap::new();
        let mut differs = false;
        for _ in 0..200 {
            let next = build_session(&pool, &[], 12, &mut rng);
            assert_eq!(names(&next), names(&pool));
            differs |= order(&next) != first;
            *heads.entry(next[0].word.clone()).or_insert(0) += 1;
        }
        assert!(differs);
        assert_eq!(heads.len(), 12);
    }

    #[test]
    fn shuffle_is_uniform_over_permutations() {
        const TRIALS: usize = 24_000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let pool = words(&["a", "b", "c", "d"]);

        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..TRIALS {
            let session = build_session(&pool, &[], 4, &mut rng);
            let key: String = session.iter().map(|e| e.word.as_str()).collect();
            *counts.entry(key).or_default() += 1;
        }

        assert_eq!(counts.len(), 24);
        let expected = TRIALS as f64 / 24.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 23 degrees of freedom, p = 0.001
        assert!(chi_square < 49.73, "chi-square {chi_square} too large");
    }
}
