//! Guess selection.
//!
//! The session asks its strategy for the next guess every time the candidate set changes.
//! [`FirstCandidate`] is the default and simply takes the first remaining code in generation
//! order. It always proposes a code that is still possible, but makes no attempt to split the
//! remaining candidates well. [`MinExpectedPool`] trades time for fewer rounds.

use crate::code::{Code, Feedback};
use crate::scoring::score;
use std::collections::HashMap;
use std::fmt::Debug;

pub trait GuessStrategy: Debug {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// Picks the next guess from the remaining candidates, `None` when there are none.
    fn select(&self, candidates: &[Code]) -> Option<Code>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl GuessStrategy for FirstCandidate {
    fn name(&self) -> &'static str {
        "first"
    }

    fn select(&self, candidates: &[Code]) -> Option<Code> {
        candidates.first().cloned()
    }
}

/// Picks the candidate whose feedback partitions leave the smallest expected pool.
///
/// Quadratic in the number of candidates; above `max_candidates` it falls back to the first
/// candidate so the opening guess on a large universe stays instant.
#[derive(Clone, Copy, Debug)]
pub struct MinExpectedPool {
    pub max_candidates: usize,
}

impl Default for MinExpectedPool {
    fn default() -> Self {
        Self {
            max_candidates: 2_000,
        }
    }
}

/// Expected number of candidates left after guessing `guess`, assuming each candidate is
/// equally likely to be the secret.
#[must_use]
pub fn expected_pool_size(guess: &Code, candidates: &[Code]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    let mut pattern_counts: HashMap<Feedback, usize> = HashMap::new();
    for candidate in candidates {
        *pattern_counts.entry(score(guess, candidate)).or_insert(0) += 1;
    }
    let total = candidates.len() as f64;
    pattern_counts
        .values()
        .map(|&count| (count as f64).powi(2))
        .sum::<f64>()
        / total
}

impl GuessStrategy for MinExpectedPool {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn select(&self, candidates: &[Code]) -> Option<Code> {
        if candidates.len() > self.max_candidates {
            return candidates.first().cloned();
        }
        let mut best: Option<(&Code, f64)> = None;
        for guess in candidates {
            let pool = expected_pool_size(guess, candidates);
            // Strict comparison keeps the earliest candidate on ties.
            if best.is_none_or(|(_, best_pool)| pool < best_pool) {
                best = Some((guess, pool));
            }
        }
        best.map(|(guess, _)| guess.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::generator::generate_candidates;

    fn codes(list: &[&str]) -> Vec<Code> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_first_candidate() {
        let candidates = codes(&["1243", "1324"]);
        assert_eq!(
            FirstCandidate.select(&candidates),
            Some("1243".parse().unwrap())
        );
        assert_eq!(FirstCandidate.select(&[]), None);
        assert_eq!(FirstCandidate.name(), "first");
    }

    #[test]
    fn test_expected_pool_size() {
        let candidates = codes(&["12", "21", "13"]);
        // "12" vs: 12 -> 2A0B, 21 -> 0A2B, 13 -> 1A0B; three singleton partitions.
        assert!((expected_pool_size(&candidates[0], &candidates) - 1.0).abs() < f64::EPSILON);
        assert_eq!(expected_pool_size(&candidates[0], &[]), 0.0);
    }

    #[test]
    fn test_min_expected_pool_prefers_splitting_guess() {
        let candidates = codes(&["12", "21", "13", "31"]);
        let chosen = MinExpectedPool::default().select(&candidates).unwrap();
        let chosen_pool = expected_pool_size(&chosen, &candidates);
        for other in &candidates {
            assert!(chosen_pool <= expected_pool_size(other, &candidates));
        }
    }

    #[test]
    fn test_min_expected_pool_returns_a_candidate() {
        let universe = generate_candidates(&Configuration {
            code_length: 3,
            digit_min: 1,
            digit_max: 5,
            allow_duplicates: false,
        });
        let chosen = MinExpectedPool::default().select(&universe).unwrap();
        assert!(universe.contains(&chosen));
    }

    #[test]
    fn test_min_expected_pool_falls_back_on_large_sets() {
        let universe = generate_candidates(&Configuration::default());
        let strategy = MinExpectedPool { max_candidates: 10 };
        assert_eq!(strategy.select(&universe), universe.first().cloned());
        assert_eq!(strategy.select(&[]), None);
    }
}
