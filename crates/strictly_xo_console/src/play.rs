//! Interactive match loop.

use crate::config::ConsoleConfig;
use crate::observer::ConsoleObserver;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_xo::{Match, MatchMode, MatchPhase, Position};
use std::io::BufRead;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

const HELP: &str = "Enter 1-9 or a cell name (e.g. center) to play, h for a hint, u to undo, r to restart, q to quit.";

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Place a mark at this index.
    Cell(usize),
    /// Ask for a hint.
    Hint,
    /// Undo the last round.
    Undo,
    /// Start over.
    Restart,
    /// Leave the program.
    Quit,
    /// Show the key help.
    Help,
    /// Anything else.
    Unknown(String),
}

impl ConsoleInput {
    /// Parses a line typed by the player.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "h" | "hint" => return Self::Hint,
            "u" | "undo" => return Self::Undo,
            "r" | "restart" => return Self::Restart,
            "q" | "quit" | "exit" => return Self::Quit,
            "?" | "help" | "" => return Self::Help,
            _ => {}
        }
        match Position::parse_input(trimmed) {
            Some(pos) => Self::Cell(pos.to_index()),
            None => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// What the loop should do after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Progress marker used to decide when to redraw.
fn progress<O: strictly_xo::MatchObserver>(game: &Match<StdRng, O>) -> (MatchPhase, usize) {
    (game.phase(), game.moves().len())
}

fn render<O: strictly_xo::MatchObserver>(game: &Match<StdRng, O>) {
    let snapshot = game.snapshot();
    if snapshot.phase != MatchPhase::NotStarted {
        println!("\n{}", snapshot.board());
    }
    println!("{}", snapshot.status_string());
    if snapshot.is_over() {
        println!("Press r to play again or q to quit.");
    }
}

fn handle_input(game: &mut Match<StdRng, ConsoleObserver>, input: ConsoleInput) -> Flow {
    debug!(?input, "Handling input");
    match input {
        ConsoleInput::Cell(index) => {
            if !game.cell_chosen(index) {
                println!("Can't play cell {} right now.", index + 1);
            }
        }
        ConsoleInput::Hint => match game.request_hint() {
            Some(index) => println!("Hint: try cell {} ({}).", index + 1, cell_label(index)),
            None => println!("Hints are only available on your turn against the computer."),
        },
        ConsoleInput::Undo => {
            if game.request_undo().is_empty() {
                println!("Nothing to undo.");
            } else {
                render(game);
            }
        }
        ConsoleInput::Restart => {
            game.restart();
            render(game);
        }
        ConsoleInput::Quit => return Flow::Stop,
        ConsoleInput::Help => println!("{HELP}"),
        ConsoleInput::Unknown(text) => println!("Unrecognized input {text:?}. {HELP}"),
    }
    Flow::Continue
}

fn cell_label(index: usize) -> &'static str {
    Position::from_index(index).map_or("?", |pos| pos.label())
}

/// Forwards lines from `reader` over a channel from a dedicated OS thread.
///
/// The thread is never joined: a blocking read cannot be cancelled, and the
/// process may exit while it waits. The channel closes at end of input.
pub fn spawn_line_reader<B>(reader: B) -> std::io::Result<mpsc::UnboundedReceiver<String>>
where
    B: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else {
                    debug!("Stopped reading input after an error");
                    break;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Runs an interactive match until the player quits or stdin closes.
#[instrument(skip(config), fields(mode = %config.mode(), difficulty = %config.difficulty()))]
pub async fn run_play(config: &ConsoleConfig) -> Result<()> {
    let mut game = Match::new(
        *config.match_settings(),
        StdRng::from_entropy(),
        ConsoleObserver::new(),
    );
    game.configure(*config.mode(), *config.difficulty())?;
    if *config.mode() == MatchMode::HumanVsComputer {
        println!("You are Player 1. The computer plays at {}.", config.difficulty());
    }
    println!("{HELP}");
    game.start_match(*config.randomize_first_player(), *config.skip_intro());
    render(&game);

    let mut rx = spawn_line_reader(std::io::BufReader::new(std::io::stdin()))?;

    let mut ticker = tokio::time::interval(config.frame_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            now = ticker.tick() => {
                let elapsed = now.saturating_duration_since(last).as_secs_f32();
                last = now;
                let before = progress(&game);
                game.tick(elapsed);
                if progress(&game) != before {
                    render(&game);
                }
            }
            line = rx.recv() => {
                let Some(line) = line else {
                    info!("Input closed");
                    break;
                };
                let before = progress(&game);
                if handle_input(&mut game, ConsoleInput::parse(&line)) == Flow::Stop {
                    break;
                }
                if progress(&game) != before {
                    render(&game);
                }
            }
        }
    }

    game.abandon();
    Ok(())
}
