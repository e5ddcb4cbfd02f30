//! Snapshots of a solving session and the bounded log they are archived into.
//!
//! The log serializes to a JSON array using the field names of the saved-game format
//! (`settings`, `possibleNumbers`, `currentGuessNumber`, `history`), so archives written by
//! earlier versions of the solver load unchanged.

use crate::code::{Code, Feedback};
use crate::config::Configuration;
use crate::error::{Result, SolverError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of archived sessions kept; the oldest is evicted first.
pub const ROLLBACK_CAPACITY: usize = 10;

/// One round of the current game. Older saves may record a round without a guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub guess: Option<Code>,
    #[serde(flatten)]
    pub feedback: Feedback,
    #[serde(rename = "remaining")]
    pub remaining_count: usize,
}

/// The entire solver state at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(rename = "settings")]
    pub configuration: Configuration,
    #[serde(rename = "possibleNumbers")]
    pub candidates: Vec<Code>,
    #[serde(rename = "currentGuessNumber")]
    pub current_guess: Option<Code>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl SessionSnapshot {
    /// Checks that the stored settings are valid and that every candidate and the current
    /// guess fit them. `index` only labels the error.
    pub fn check(&self, index: usize) -> Result<()> {
        let invalid = |reason: String| SolverError::InvalidSnapshot { index, reason };
        self.configuration
            .validate()
            .map_err(|e| invalid(e.to_string()))?;
        if let Some(code) = self
            .candidates
            .iter()
            .find(|code| !self.configuration.admits(code))
        {
            return Err(invalid(format!("candidate {code} does not fit the settings")));
        }
        if let Some(guess) = &self.current_guess
            && !self.configuration.admits(guess)
        {
            return Err(invalid(format!("guess {guess} does not fit the settings")));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchivedSession {
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    #[serde(
        rename = "archivedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub archived_at: Option<DateTime<Utc>>,
}

/// What a UI lists for an archived session. Never carries the candidate set.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub index: usize,
    pub guess: Option<Code>,
    pub configuration: Configuration,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RollbackLog {
    entries: VecDeque<ArchivedSession>,
}

impl RollbackLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot, evicting the oldest entry when full.
    pub fn push(&mut self, snapshot: SessionSnapshot) {
        self.push_entry(ArchivedSession {
            snapshot,
            archived_at: Some(Utc::now()),
        });
    }

    fn push_entry(&mut self, entry: ArchivedSession) {
        while self.entries.len() >= ROLLBACK_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ArchivedSession> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchivedSession> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| SessionSummary {
                index,
                guess: entry.snapshot.current_guess.clone(),
                configuration: entry.snapshot.configuration,
                archived_at: entry.archived_at,
            })
            .collect()
    }

    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Reads a log written by [`RollbackLog::serialize`]. Only the newest
    /// [`ROLLBACK_CAPACITY`] entries are kept.
    pub fn deserialize(data: &str) -> Result<Self> {
        let entries: Vec<ArchivedSession> = serde_json::from_str(data)?;
        let mut log = Self::new();
        for entry in entries {
            log.push_entry(entry);
        }
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    fn snapshot(guess: &str) -> SessionSnapshot {
        let guess: Code = guess.parse().unwrap();
        SessionSnapshot {
            configuration: Configuration::default(),
            candidates: vec![guess.clone()],
            current_guess: Some(guess),
            history: Vec::new(),
        }
    }

    #[test]
    fn test_push_and_get() {
        let mut log = RollbackLog::new();
        assert!(log.is_empty());
        log.push(snapshot("1234"));
        assert_eq!(log.len(), 1);
        let entry = log.get(0).unwrap();
        assert_eq!(entry.snapshot, snapshot("1234"));
        assert!(entry.archived_at.is_some());
        assert!(log.get(1).is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = RollbackLog::new();
        for i in 0..=ROLLBACK_CAPACITY {
            log.push(snapshot(&format!("{:04}", 1000 + i)));
        }
        assert_eq!(log.len(), ROLLBACK_CAPACITY);
        let guesses: Vec<String> = log
            .summaries()
            .iter()
            .map(|s| s.guess.as_ref().unwrap().to_string())
            .collect();
        assert!(!guesses.contains(&"1000".to_string()));
        assert_eq!(guesses.first().unwrap(), "1001");
        assert_eq!(guesses.last().unwrap(), "1010");
    }

    #[test]
    fn test_summaries() {
        let mut log = RollbackLog::new();
        log.push(snapshot("1234"));
        log.push(snapshot("5678"));
        let summaries = log.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].index, 1);
        assert_eq!(summaries[1].guess, Some("5678".parse().unwrap()));
        assert_eq!(summaries[1].configuration, Configuration::default());
    }

    #[test]
    fn test_serialize_uses_saved_game_field_names() {
        let mut log = RollbackLog::new();
        let mut snap = snapshot("1234");
        snap.history.push(HistoryEntry {
            guess: Some("1234".parse().unwrap()),
            feedback: Feedback::new(2, 2),
            remaining_count: 6,
        });
        log.push(snap);

        let json = log.serialize().unwrap();
        assert!(json.contains("\"settings\""));
        assert!(json.contains("\"possibleNumbers\":[\"1234\"]"));
        assert!(json.contains("\"currentGuessNumber\":\"1234\""));
        assert!(json.contains("{\"guess\":\"1234\",\"a\":2,\"b\":2,\"remaining\":6}"));

        let back = RollbackLog::deserialize(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_deserialize_saved_game_without_timestamp() {
        let json = r#"[{
            "settings": {"digitLength": 4, "digitMin": 1, "digitMax": 9, "allowDuplicates": false},
            "possibleNumbers": ["1243", "1324"],
            "currentGuessNumber": "1243",
            "history": [{"guess": "1234", "a": 2, "b": 2, "remaining": 6}]
        }]"#;
        let log = RollbackLog::deserialize(json).unwrap();
        let entry = log.get(0).unwrap();
        assert_eq!(entry.archived_at, None);
        assert_eq!(entry.snapshot.candidates.len(), 2);
        assert_eq!(entry.snapshot.history[0].feedback, Feedback::new(2, 2));
        assert_eq!(entry.snapshot.history[0].remaining_count, 6);
    }

    #[test]
    fn test_deserialize_null_guess() {
        let json = r#"[{
            "settings": {"codeLength": 5, "digitMin": 1, "digitMax": 3, "allowDuplicates": false},
            "possibleNumbers": [],
            "currentGuessNumber": null,
            "history": []
        }]"#;
        let log = RollbackLog::deserialize(json).unwrap();
        assert_eq!(log.summaries()[0].guess, None);
    }

    #[test]
    fn test_deserialize_history_round_without_guess() {
        let json = r#"[{
            "settings": {"codeLength": 4, "digitMin": 1, "digitMax": 9, "allowDuplicates": false},
            "possibleNumbers": ["1234"],
            "currentGuessNumber": "1234",
            "history": [{"guess": null, "a": 0, "b": 0, "remaining": 1}]
        }]"#;
        let log = RollbackLog::deserialize(json).unwrap();
        assert_eq!(log.get(0).unwrap().snapshot.history[0].guess, None);
    }

    #[test]
    fn test_check_accepts_consistent_snapshot() {
        assert!(snapshot("1234").check(0).is_ok());
    }

    #[test]
    fn test_check_rejects_candidates_of_wrong_length() {
        let json = r#"[{
            "settings": {"codeLength": 4, "digitMin": 1, "digitMax": 9, "allowDuplicates": false},
            "possibleNumbers": ["123", "124"],
            "currentGuessNumber": "1234",
            "history": []
        }]"#;
        let log = RollbackLog::deserialize(json).unwrap();
        assert!(matches!(
            log.get(0).unwrap().snapshot.check(0),
            Err(SolverError::InvalidSnapshot { index: 0, .. })
        ));
    }

    #[test]
    fn test_check_rejects_guess_and_settings_out_of_range() {
        let mut snap = snapshot("1234");
        snap.current_guess = Some("1230".parse().unwrap());
        assert!(snap.check(3).is_err());

        let mut snap = snapshot("1234");
        snap.configuration.digit_min = 5;
        snap.configuration.digit_max = 2;
        assert!(matches!(
            snap.check(1),
            Err(SolverError::InvalidSnapshot { index: 1, .. })
        ));
    }

    #[test]
    fn test_deserialize_trims_to_capacity() {
        let mut oversized = Vec::new();
        for i in 0..15 {
            oversized.push(ArchivedSession {
                snapshot: snapshot(&format!("{:04}", 2000 + i)),
                archived_at: None,
            });
        }
        let json = serde_json::to_string(&oversized).unwrap();
        let log = RollbackLog::deserialize(&json).unwrap();
        assert_eq!(log.len(), ROLLBACK_CAPACITY);
        assert_eq!(
            log.get(0).unwrap().snapshot.current_guess,
            Some("2005".parse().unwrap())
        );
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        assert!(matches!(
            RollbackLog::deserialize("not json"),
            Err(SolverError::Serialization(_))
        ));
    }
}
