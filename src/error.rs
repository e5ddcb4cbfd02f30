use thiserror::Error;

/// Everything that can go wrong while solving.
///
/// `NoCandidatesRemain` and `InvalidFeedback` are recoverable: the session is left untouched
/// and the caller may resubmit different feedback. `NoValidCandidates` means the active
/// configuration admits no code at all.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("the configuration does not admit any valid code")]
    NoValidCandidates,

    #[error("no candidates remain; the feedback so far is contradictory")]
    NoCandidatesRemain,

    #[error("feedback {a}A{b}B is impossible for a code of length {code_length}")]
    InvalidFeedback {
        a: usize,
        b: usize,
        code_length: usize,
    },

    #[error("no archived session at index {index} (archive holds {len})")]
    InvalidRollbackIndex { index: usize, len: usize },

    #[error("archived session {index} does not match its own settings: {reason}")]
    InvalidSnapshot { index: usize, reason: String },

    #[error("failed to (de)serialize archived sessions: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
