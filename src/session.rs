use crate::archive::{HistoryEntry, RollbackLog, SessionSnapshot, SessionSummary};
use crate::code::{Code, Feedback};
use crate::config::{ConfigUpdate, Configuration};
use crate::error::{Result, SolverError};
use crate::generator::generate_candidates;
use crate::scoring::filter_candidates;
use crate::strategy::{FirstCandidate, GuessStrategy};

/// What happened after a round of feedback was submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The candidate set narrowed and the session has a new guess.
    Continue { remaining: usize, next_guess: Code },
    /// The guess was the secret. The session has already been reset for a new game.
    Solved { secret: Code, rounds: usize },
}

/// Live solver state for one game, plus the archive of earlier states.
///
/// Every operation runs synchronously; the only expensive one is regenerating the candidate
/// universe in [`SolvingSession::reset`].
#[derive(Debug)]
pub struct SolvingSession {
    configuration: Configuration,
    candidates: Vec<Code>,
    current_guess: Option<Code>,
    history: Vec<HistoryEntry>,
    archive: RollbackLog,
    strategy: Box<dyn GuessStrategy>,
}

impl SolvingSession {
    /// Creates a session and generates its candidate universe.
    pub fn new(configuration: Configuration) -> Result<Self> {
        Self::with_strategy(configuration, Box::new(FirstCandidate))
    }

    pub fn with_strategy(
        configuration: Configuration,
        strategy: Box<dyn GuessStrategy>,
    ) -> Result<Self> {
        configuration.validate()?;
        let mut session = Self {
            configuration,
            candidates: Vec::new(),
            current_guess: None,
            history: Vec::new(),
            archive: RollbackLog::new(),
            strategy,
        };
        session.reset()?;
        Ok(session)
    }

    /// Regenerates the full universe for the current configuration and clears round history.
    ///
    /// Fails with `NoValidCandidates` when the configuration admits no code; the session is
    /// then left with an empty candidate set and no guess.
    pub fn reset(&mut self) -> Result<&Code> {
        self.candidates = generate_candidates(&self.configuration);
        self.history.clear();
        self.current_guess = self.strategy.select(&self.candidates);
        self.current_guess
            .as_ref()
            .ok_or(SolverError::NoValidCandidates)
    }

    /// The guess to present next, `None` if there is nothing left to guess.
    #[must_use]
    pub fn current_guess(&self) -> Option<&Code> {
        self.current_guess.as_ref()
    }

    /// Narrows the candidates to those that would answer the current guess with `(a, b)` and
    /// advances to the next guess. Returns the number of candidates left.
    ///
    /// On error nothing changes, so the caller can resubmit corrected feedback.
    pub fn apply_feedback(&mut self, a: usize, b: usize) -> Result<usize> {
        let code_length = self.configuration.code_length;
        let feedback = Feedback::new(a, b);
        if !feedback.is_consistent_with(code_length) {
            return Err(SolverError::InvalidFeedback { a, b, code_length });
        }
        let guess = self
            .current_guess
            .as_ref()
            .ok_or(SolverError::NoCandidatesRemain)?;

        let remaining = filter_candidates(&self.candidates, guess, feedback);
        if remaining.is_empty() {
            return Err(SolverError::NoCandidatesRemain);
        }
        self.candidates = remaining;
        self.current_guess = self.strategy.select(&self.candidates);
        Ok(self.candidates.len())
    }

    /// Runs one full round: filters, records the round in history, and on a solved round
    /// resets for the next game.
    pub fn submit_feedback(&mut self, a: usize, b: usize) -> Result<RoundOutcome> {
        let guess = self
            .current_guess
            .clone()
            .ok_or(SolverError::NoCandidatesRemain)?;
        let remaining = self.apply_feedback(a, b)?;
        self.record_history(guess.clone(), a, b, remaining);

        if Feedback::new(a, b).is_solved(self.configuration.code_length) {
            let rounds = self.history.len();
            self.reset()?;
            return Ok(RoundOutcome::Solved {
                secret: guess,
                rounds,
            });
        }

        let next_guess = self
            .current_guess
            .clone()
            .ok_or(SolverError::NoCandidatesRemain)?;
        Ok(RoundOutcome::Continue {
            remaining,
            next_guess,
        })
    }

    pub fn record_history(&mut self, guess: Code, a: usize, b: usize, remaining_count: usize) {
        self.history.push(HistoryEntry {
            guess: Some(guess),
            feedback: Feedback::new(a, b),
            remaining_count,
        });
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Archives the current state, merges `update` over the configuration and resets.
    ///
    /// A structurally invalid result is rejected before anything changes. A configuration that
    /// is valid but admits no code is kept, and `NoValidCandidates` is returned.
    pub fn update_configuration(&mut self, update: ConfigUpdate) -> Result<&Code> {
        let merged = self.configuration.merged(&update);
        merged.validate()?;
        self.archive_session();
        self.configuration = merged;
        self.reset()
    }

    /// Copies the current state into the rollback log.
    pub fn archive_session(&mut self) {
        let snapshot = self.snapshot();
        self.archive.push(snapshot);
    }

    /// Replaces the live state with a copy of archived entry `index`. The entry stays archived.
    /// An entry whose codes do not fit its own settings is refused and nothing changes.
    pub fn restore_session(&mut self, index: usize) -> bool {
        self.try_restore_session(index).is_ok()
    }

    pub fn try_restore_session(&mut self, index: usize) -> Result<()> {
        let entry = self
            .archive
            .get(index)
            .ok_or(SolverError::InvalidRollbackIndex {
                index,
                len: self.archive.len(),
            })?;
        entry.snapshot.check(index)?;
        let SessionSnapshot {
            configuration,
            candidates,
            current_guess,
            history,
        } = entry.snapshot.clone();
        self.configuration = configuration;
        self.candidates = candidates;
        self.current_guess = current_guess;
        self.history = history;
        Ok(())
    }

    #[must_use]
    pub fn list_archived_sessions(&self) -> Vec<SessionSummary> {
        self.archive.summaries()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            configuration: self.configuration,
            candidates: self.candidates.clone(),
            current_guess: self.current_guess.clone(),
            history: self.history.clone(),
        }
    }

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    #[must_use]
    pub fn candidates(&self) -> &[Code] {
        &self.candidates
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    #[must_use]
    pub fn archive(&self) -> &RollbackLog {
        &self.archive
    }

    /// Installs a log loaded from storage, returning the one it replaces.
    pub fn replace_archive(&mut self, archive: RollbackLog) -> RollbackLog {
        std::mem::replace(&mut self.archive, archive)
    }

    pub fn clear_archive(&mut self) {
        self.archive.clear();
    }
}
