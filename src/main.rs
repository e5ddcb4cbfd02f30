use ab_solver::cli::{CliInterface, parse_cli};
use ab_solver::storage::{FileStore, KeyValueStore, default_store_path, load_archive};
use ab_solver::{SolvingSession, game_loop, info_log, logging};
use std::io;

fn main() {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let configuration = cli.configuration();
    let mut session = match SolvingSession::with_strategy(configuration, cli.strategy()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start solver with {configuration}: {e}");
            eprintln!("Cannot start solver with {configuration}: {e}");
            return;
        }
    };

    let mut store = if cli.no_persist {
        None
    } else {
        cli.store_path.clone().or_else(default_store_path).map(FileStore::new)
    };

    if let Some(store) = &store {
        info_log!("Using store file {}", store.path().display());
        // A missing or unreadable archive must never stop a new game.
        match load_archive(store) {
            Ok(archive) => {
                session.replace_archive(archive);
            }
            Err(e) => {
                log::warn!("Ignoring stored games: {e}");
                eprintln!("Could not load archived games ({e}); starting with an empty archive.");
            }
        }
    }

    println!(
        "1A2B solver: {} ({} candidates).",
        session.configuration(),
        session.candidates().len()
    );
    if !session.archive().is_empty() {
        println!("{} archived game(s) loaded; type 'games' to list them.", session.archive().len());
    }

    let stdin = io::stdin();
    let mut interface = CliInterface::new(stdin.lock());
    game_loop(
        &mut session,
        store.as_mut().map(|s| s as &mut dyn KeyValueStore),
        &mut interface,
    );
}
