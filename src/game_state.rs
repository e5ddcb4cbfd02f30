use crate::archive::{HistoryEntry, SessionSummary};
use crate::code::{Code, Feedback};
use crate::config::ConfigUpdate;
use crate::error::SolverError;
use crate::session::{RoundOutcome, SolvingSession};
use crate::storage::{self, KeyValueStore};
use crate::{debug_log, info_log};

/// Everything a front-end can ask the solver to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Feedback(Feedback),
    Reset,
    /// Zero-based index into the archived sessions.
    Rollback(usize),
    ListArchive,
    ShowHistory,
    ClearHistory,
    /// Forget every archived session, in memory and in storage.
    ClearArchive,
    Configure(ConfigUpdate),
    Exit,
}

/// The presentation side of the game. Implementations decide how input is collected and how
/// results are shown; the loop only calls these methods.
pub trait GameInterface {
    /// Reads the next action. `None` means the input was not understood and the loop should
    /// simply ask again.
    fn read_action(&mut self) -> Option<UserAction>;

    fn display_guess(&mut self, guess: Option<&Code>, remaining: usize);

    fn display_outcome(&mut self, outcome: &RoundOutcome);

    fn display_history(&mut self, history: &[HistoryEntry]);

    fn display_archive(&mut self, summaries: &[SessionSummary]);

    fn display_error(&mut self, error: &SolverError);

    fn display_message(&mut self, message: &str);

    fn display_exit_message(&mut self);
}

/// Drives `session` from the actions read off `interface` until the user exits.
///
/// After every round and before every reset or configuration change the session is archived;
/// when a store is given the archive is written to it each time it changes.
pub fn game_loop<I: GameInterface + ?Sized>(
    session: &mut SolvingSession,
    mut store: Option<&mut dyn KeyValueStore>,
    interface: &mut I,
) {
    info_log!(
        "game_loop() - starting with {} ({} candidates, strategy {})",
        session.configuration(),
        session.candidates().len(),
        session.strategy_name()
    );
    interface.display_guess(session.current_guess(), session.candidates().len());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Feedback(feedback) => {
                match session.submit_feedback(feedback.a, feedback.b) {
                    Ok(outcome) => {
                        interface.display_outcome(&outcome);
                        session.archive_session();
                        persist(session, store.as_deref_mut());
                    }
                    Err(e) => {
                        debug_log!("game_loop() - feedback {} rejected: {}", feedback, e);
                        interface.display_error(&e);
                    }
                }
            }
            UserAction::Reset => {
                session.archive_session();
                persist(session, store.as_deref_mut());
                match session.reset().map(|_| ()) {
                    Ok(()) => {
                        interface.display_message("Solver reset.");
                        interface.display_guess(
                            session.current_guess(),
                            session.candidates().len(),
                        );
                    }
                    Err(e) => interface.display_error(&e),
                }
            }
            UserAction::Rollback(index) => match session.try_restore_session(index) {
                Ok(()) => {
                    info_log!("game_loop() - restored archived session {}", index);
                    interface.display_message(&format!("Rolled back to game {}.", index + 1));
                    interface.display_history(session.history());
                    interface.display_guess(session.current_guess(), session.candidates().len());
                }
                Err(e) => interface.display_error(&e),
            },
            UserAction::ListArchive => {
                interface.display_archive(&session.list_archived_sessions());
            }
            UserAction::ShowHistory => {
                interface.display_history(session.history());
            }
            UserAction::ClearHistory => {
                session.clear_history();
                interface.display_message("Round history cleared.");
            }
            UserAction::ClearArchive => {
                session.clear_history();
                session.clear_archive();
                if let Some(store) = store.as_deref_mut()
                    && let Err(e) = storage::clear_archive(store)
                {
                    log::warn!("Failed to clear stored sessions: {e}");
                }
                interface.display_message("All archived games cleared.");
            }
            UserAction::Configure(update) => {
                let result = session.update_configuration(update).map(|_| ());
                // A valid but empty configuration still archived the previous state.
                persist(session, store.as_deref_mut());
                match result {
                    Ok(()) => {
                        interface.display_message(&format!(
                            "Settings saved: {}.",
                            session.configuration()
                        ));
                        interface.display_guess(
                            session.current_guess(),
                            session.candidates().len(),
                        );
                    }
                    Err(e) => interface.display_error(&e),
                }
            }
        }
    }
}

fn persist(session: &SolvingSession, store: Option<&mut (dyn KeyValueStore + '_)>) {
    let Some(store) = store else {
        return;
    };
    match storage::save_archive(store, session.archive()) {
        Ok(()) => {
            debug_log!("persist() - saved {} session(s)", session.archive().len());
        }
        Err(e) => log::warn!("Failed to save archived sessions: {e}"),
    }
}
