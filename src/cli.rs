use crate::archive::{HistoryEntry, SessionSummary};
use crate::code::{Code, Feedback};
use crate::config::{ConfigUpdate, Configuration, MAX_CODE_LENGTH};
use crate::error::SolverError;
use crate::game_state::{GameInterface, UserAction};
use crate::session::RoundOutcome;
use crate::strategy::{FirstCandidate, GuessStrategy, MinExpectedPool};
use chrono::Local;
use clap::{Parser, ValueEnum};
use std::io::BufRead;
use std::path::PathBuf;

/// Interactive 1A2B (Bulls and Cows) solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of digits in the secret
    #[arg(short = 'l', long = "length", default_value_t = 4,
          value_parser = clap::value_parser!(u8).range(1..=MAX_CODE_LENGTH as i64))]
    pub code_length: u8,

    /// Smallest digit that may appear
    #[arg(long = "min", default_value_t = 1,
          value_parser = clap::value_parser!(u8).range(0..=9))]
    pub digit_min: u8,

    /// Largest digit that may appear
    #[arg(long = "max", default_value_t = 9,
          value_parser = clap::value_parser!(u8).range(0..=9))]
    pub digit_max: u8,

    /// Allow a digit to appear more than once
    #[arg(short = 'd', long = "allow-duplicates")]
    pub allow_duplicates: bool,

    /// How the next guess is chosen
    #[arg(short = 's', long, value_enum, default_value_t = StrategyKind::First)]
    pub strategy: StrategyKind,

    /// File used to keep archived games between runs
    #[arg(long = "store")]
    pub store_path: Option<PathBuf>,

    /// Do not read or write archived games
    #[arg(long)]
    pub no_persist: bool,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// First remaining candidate
    First,
    /// Candidate leaving the smallest expected pool
    Pool,
}

impl Cli {
    #[must_use]
    pub fn configuration(&self) -> Configuration {
        Configuration {
            code_length: usize::from(self.code_length),
            digit_min: self.digit_min,
            digit_max: self.digit_max,
            allow_duplicates: self.allow_duplicates,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> Box<dyn GuessStrategy> {
        match self.strategy {
            StrategyKind::First => Box::new(FirstCandidate),
            StrategyKind::Pool => Box::new(MinExpectedPool::default()),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const HELP: &str = "\
Commands:
  <A> <B> or <A>A<B>B   feedback for the current guess, e.g. '1 2' or '1A2B'
  history               show this game's rounds
  games                 list archived games
  undo <N>              roll back to archived game N
  reset                 start a new game
  set key=value ...     change settings: length, min, max, dup (true/false)
  clear                 clear this game's round history
  clear-all             forget every archived game
  exit                  quit";

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Parses `key=value` pairs into a partial configuration.
pub fn parse_settings<'a, I>(pairs: I) -> Result<ConfigUpdate, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut update = ConfigUpdate::default();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{pair}'"))?;
        let bad_value = || format!("invalid value '{value}' for '{key}'");
        match key.to_ascii_lowercase().as_str() {
            "length" | "len" => {
                let length: usize = value.parse().map_err(|_| bad_value())?;
                if !(1..=MAX_CODE_LENGTH).contains(&length) {
                    return Err(format!("length must be between 1 and {MAX_CODE_LENGTH}"));
                }
                update.code_length = Some(length);
            }
            "min" => update.digit_min = Some(value.parse().map_err(|_| bad_value())?),
            "max" => update.digit_max = Some(value.parse().map_err(|_| bad_value())?),
            "dup" | "duplicates" => update.allow_duplicates = Some(parse_bool(value).ok_or_else(bad_value)?),
            _ => return Err(format!("unknown setting '{key}'")),
        }
    }
    if update.is_empty() {
        return Err("no settings given".to_string());
    }
    Ok(update)
}

/// Turns one line of input into an action.
pub fn parse_action(input: &str) -> Result<UserAction, String> {
    let input = input.trim();
    let mut words = input.split_whitespace();
    let command = words.next().unwrap_or("").to_ascii_lowercase();

    match command.as_str() {
        "" => Err("empty input".to_string()),
        "exit" | "quit" | "q" => Ok(UserAction::Exit),
        "reset" | "new" => Ok(UserAction::Reset),
        "history" | "h" => Ok(UserAction::ShowHistory),
        "games" | "list" => Ok(UserAction::ListArchive),
        "clear" => Ok(UserAction::ClearHistory),
        "clear-all" => Ok(UserAction::ClearArchive),
        "undo" | "rollback" => {
            let number: usize = words
                .next()
                .and_then(|n| n.parse().ok())
                .filter(|&n| n >= 1)
                .ok_or_else(|| "usage: undo <game number>".to_string())?;
            Ok(UserAction::Rollback(number - 1))
        }
        "set" => parse_settings(words).map(UserAction::Configure),
        _ => input
            .parse::<Feedback>()
            .map(UserAction::Feedback)
            .map_err(|e| e.to_string()),
    }
}

pub fn display_guess(guess: Option<&Code>, remaining: usize) {
    match guess {
        Some(guess) => println!("\nGuess: {guess}   ({remaining} possible)"),
        None => println!("\nNo guess available."),
    }
}

pub fn display_outcome(outcome: &RoundOutcome) {
    match outcome {
        RoundOutcome::Continue {
            remaining,
            next_guess,
        } => {
            println!("{remaining} candidate(s) remain.");
            display_guess(Some(next_guess), *remaining);
        }
        RoundOutcome::Solved { secret, rounds } => {
            println!("Solved! The secret is {secret} ({rounds} round(s)). Starting a new game.");
        }
    }
}

pub fn display_history(history: &[HistoryEntry]) {
    if history.is_empty() {
        println!("No rounds played yet.");
        return;
    }
    for (i, entry) in history.iter().enumerate() {
        let guess = entry
            .guess
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        println!(
            "{}. {} -> {}   ({} left)",
            i + 1,
            guess,
            entry.feedback,
            entry.remaining_count
        );
    }
}

#[must_use]
pub fn format_summary(summary: &SessionSummary) -> String {
    let guess = summary
        .guess
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let when = summary
        .archived_at
        .map(|t| format!(" [{}]", t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")))
        .unwrap_or_default();
    format!(
        "Game {}: {} ({}){}",
        summary.index + 1,
        guess,
        summary.configuration,
        when
    )
}

pub fn display_archive(summaries: &[SessionSummary]) {
    if summaries.is_empty() {
        println!("No archived games.");
        return;
    }
    for summary in summaries {
        println!("{}", format_summary(summary));
    }
}

/// Line-oriented front-end over any reader. End of input counts as `exit`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_action(&mut self) -> Option<UserAction> {
        println!("Enter feedback (e.g. 1A2B), or 'help':");
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                return Some(UserAction::Exit);
            }
        }
        if input.trim().eq_ignore_ascii_case("help") {
            println!("{HELP}");
            return None;
        }
        match parse_action(&input) {
            Ok(action) => Some(action),
            Err(message) => {
                println!("Invalid input: {message}. Type 'help' for commands.");
                None
            }
        }
    }

    fn display_guess(&mut self, guess: Option<&Code>, remaining: usize) {
        display_guess(guess, remaining);
    }

    fn display_outcome(&mut self, outcome: &RoundOutcome) {
        display_outcome(outcome);
    }

    fn display_history(&mut self, history: &[HistoryEntry]) {
        display_history(history);
    }

    fn display_archive(&mut self, summaries: &[SessionSummary]) {
        display_archive(summaries);
    }

    fn display_error(&mut self, error: &SolverError) {
        match error {
            SolverError::NoCandidatesRemain => {
                println!("No candidates match that feedback. Check your input or roll back.");
            }
            other => println!("Error: {other}"),
        }
    }

    fn display_message(&mut self, message: &str) {
        println!("{message}");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
