// Library interface for the 1A2B solver.
// The binary and the integration tests both build on these modules.

pub mod archive;
pub mod cli;
pub mod code;
pub mod config;
pub mod error;
pub mod game_state;
pub mod generator;
pub mod logging;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod strategy;

// Re-export commonly used items for easier embedding and testing
pub use archive::{ArchivedSession, HistoryEntry, ROLLBACK_CAPACITY, RollbackLog, SessionSnapshot, SessionSummary};
pub use code::{Code, Feedback};
pub use config::{ConfigUpdate, Configuration};
pub use error::{Result, SolverError};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use generator::generate_candidates;
pub use scoring::{filter_candidates, score};
pub use session::{RoundOutcome, SolvingSession};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError, load_archive, save_archive};
pub use strategy::{FirstCandidate, GuessStrategy, MinExpectedPool};
