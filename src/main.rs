mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod screen;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::highscores::HighScores;
use crate::screen::GameScreen;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

static USAGE: &str = "\
Usage: gridsnake [<options>]

Play snake on a grid in the terminal

Options:
  -c, --config <PATH>       Read configuration from the given file
      --width <N>           Width of the board in cells
      --height <N>          Height of the board in cells
      --interval <SECONDS>  Time between movements of the snake
      --seed <N>            Seed for the random number generator
      --log-file <PATH>     Write logs to the given file
  -h, --help                Display this help message and exit
  -V, --version             Show the program version and exit
";

#[derive(Clone, Debug, Default, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    width: Option<i32>,
    height: Option<i32>,
    interval: Option<f64>,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    /// Override configuration values with those given on the command line
    fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.board.width = width;
        }
        if let Some(height) = self.height {
            config.board.height = height;
        }
        if let Some(interval) = self.interval {
            config.board.movement_interval = interval;
        }
        if let Some(ref log_file) = self.log_file {
            config.files.log_file = Some(log_file.clone());
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("width") => args.width = Some(parser.value()?.parse()?),
                Arg::Long("height") => args.height = Some(parser.value()?.parse()?),
                Arg::Long("interval") => args.interval = Some(parser.value()?.parse()?),
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(Command::Run(args)) => exit(run(&args)),
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage information.");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Arguments) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;
    args.apply(&mut config);
    if let Some(ref path) = config.files.log_file {
        init_logging(path)?;
    }
    let settings = config.board.settings()?;
    let game = match args.seed {
        Some(seed) => Game::new_with_rng(settings, StdRng::seed_from_u64(seed)),
        None => Game::new(settings),
    }
    .context("failed to set up board")?;
    let high_scores_file = config.high_scores_file();
    let high_scores = match high_scores_file {
        Some(ref path) => HighScores::load(path).unwrap_or_else(|e| {
            warn!(error = ?anyhow::Error::from(e), "Could not load high scores");
            HighScores::default()
        }),
        None => HighScores::default(),
    };
    let screen = GameScreen::new(game, config.colors, high_scores, high_scores_file);
    info!(?settings, "Starting up");
    let terminal = ratatui::init();
    let r = App::new(screen).run(terminal);
    ratatui::restore();
    r.map_err(Into::into)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}
