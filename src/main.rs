mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod logging;
mod menu;
mod options;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::highscores::HighScores;
use crate::util::Globals;
use crate::warning::Warning;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: fruitsnake [<options>]

Play Snake in your terminal, with fruit that fights back

Options:
  -c, --config <FILE>   Read configuration from the given file
      --log-file <FILE> Append log messages to the given file
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit
";

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run {
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Arguments, lexopt::Error> {
        use lexopt::prelude::*;
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => config = Some(PathBuf::from(parser.value()?)),
                Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Short('h') | Long("help") => return Ok(Arguments::Help),
                Short('V') | Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config, log_file })
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(lexopt::Parser::from_env()) {
        Ok(Arguments::Run { config, log_file }) => match setup(config, log_file) {
            Ok((globals, warnings)) => {
                let terminal = ratatui::init();
                let mut stdout = io::stdout();
                let r = focus_reporting(&mut stdout, true)
                    .and_then(|()| App::new(globals, warnings).run(terminal));
                let reset = focus_reporting(&mut stdout, false);
                ratatui::restore();
                tracing::info!("exiting");
                io_exit(r.and(reset))
            }
            Err(e) => {
                eprintln!("fruitsnake: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("fruitsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("fruitsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

/// Load the configuration, start logging, and read saved options & high
/// scores.  Problems with the saved data don't stop the game; they're
/// returned as warnings to show once the UI is up.
fn setup(
    config_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
) -> anyhow::Result<(Globals, Vec<Warning>)> {
    let (path, allow_missing) = match config_path {
        Some(p) => (p, false),
        None => (Config::default_path()?, true),
    };
    let mut config = Config::load(&path, allow_missing)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    if let Some(p) = log_file {
        config.files.set_log_file(p);
    }
    if let Some(p) = config.log_file() {
        logging::init(p).with_context(|| format!("failed to open log file {}", p.display()))?;
    }
    tracing::info!(config = %path.display(), "starting fruitsnake");
    let mut warnings = Vec::new();
    let options = config.load_options().unwrap_or_else(|e| {
        warnings.push(Warning::from_error(&e));
        config.options
    });
    let high_scores = config.load_high_scores().unwrap_or_else(|e| {
        warnings.push(Warning::from_error(&e));
        HighScores::default()
    });
    let globals = Globals {
        options,
        config,
        high_scores,
    };
    Ok((globals, warnings))
}

/// Turn the terminal's focus-change reporting on or off.  Without it,
/// crossterm never delivers `FocusLost`, and the game can't pause itself when
/// the window loses focus.
fn focus_reporting<W: Write>(out: &mut W, enabled: bool) -> io::Result<()> {
    if enabled {
        execute!(out, EnableFocusChange)
    } else {
        execute!(out, DisableFocusChange)
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "terminal I/O failed");
            eprintln!("fruitsnake: {e}");
            ExitCode::from(2)
        }
    }
}
