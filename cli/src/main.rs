//! # Tuinty CLI
//!
//! Play the sliding-tile merge puzzle in the terminal.

mod help;
mod input;
mod palette;
mod render;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use env_logger::{Env, Target};
use log::{info, warn};
use tuinty_core::{FileStore, FinalScore, Game, HighScoreStore, MemoryStore, UpdateKind};

use crate::input::Command;
use crate::palette::{parse_opacity, Palette, Rgb};
use crate::render::Renderer;

#[derive(Parser, Debug)]
#[command(name = "tuinty")]
#[command(author, version, about = "A tui implementation of the \"2048\" game")]
struct Args {
    /// Grid background colour (0-255 per channel)
    #[arg(short, long, num_args = 3, value_names = ["R", "G", "B"])]
    #[arg(default_values_t = [143u8, 0, 255])]
    background: Vec<u8>,

    /// Tile colour (0-255 per channel)
    #[arg(short, long, num_args = 3, value_names = ["R", "G", "B"])]
    #[arg(default_values_t = [237u8, 115, 115])]
    tile: Vec<u8>,

    /// Opacity of the grid background, 0.00 to 1.00 in steps of 0.01
    #[arg(short, long, default_value_t = 0.13, value_parser = parse_opacity)]
    opacity: f32,

    /// Random seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// File holding the best score between sessions
    #[arg(long, default_value = "tuinty-score.json")]
    score_file: PathBuf,

    /// Do not read or write the score file
    #[arg(long)]
    no_save: bool,

    /// Markdown file shown on the help screen instead of the built-in help
    #[arg(long)]
    help_file: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG sets the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            background: Rgb::from_channels(&self.background).context("invalid --background")?,
            tile: Rgb::from_channels(&self.tile).context("invalid --tile")?,
            opacity: self.opacity,
        })
    }
}

enum Screen {
    Game,
    Help,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let palette = args.palette()?;

    if args.no_save {
        run(&args, palette, MemoryStore::default())
    } else {
        run(&args, palette, FileStore::new(&args.score_file))
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    // Logging to stderr would draw over the game, so it stays off unless
    // there is a file to write to or RUST_LOG asks for it.
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            let env = Env::default().default_filter_or("info");
            let mut builder = env_logger::Builder::from_env(env);
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

fn run<S: HighScoreStore>(args: &Args, palette: Palette, store: S) -> Result<()> {
    let game = match args.seed {
        Some(seed) => Game::new(store, seed),
        None => Game::from_entropy(store),
    };
    let help_text = match help::text(args.help_file.as_deref()) {
        Ok(text) => text,
        Err(e) => format!("{:#}", e),
    };

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let _restore = OnDrop::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    event_loop(game, Renderer::new(&mut stdout, palette), &help_text)
}

/// Runs its action when dropped, so cleanup also happens on early returns and panics.
struct OnDrop<F: FnMut()> {
    action: F,
}

impl<F: FnMut()> OnDrop<F> {
    fn new(action: F) -> Self {
        OnDrop { action }
    }
}

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.action)();
    }
}

fn restore_terminal() {
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, Show, LeaveAlternateScreen) {
        warn!("leaving the alternate screen failed: {}", e);
    }
    if let Err(e) = terminal::disable_raw_mode() {
        warn!("disabling raw mode failed: {}", e);
    }
}

fn event_loop<S: HighScoreStore, W: Write>(
    mut game: Game<S>,
    mut renderer: Renderer<W>,
    help_text: &str,
) -> Result<()> {
    let mut screen = Screen::Game;
    let mut game_over: Option<FinalScore> = None;
    renderer.draw_game(&game.snapshot(), None)?;

    loop {
        let key = match event::read()? {
            Event::Key(key) => key,
            Event::Resize(_, _) => {
                match screen {
                    Screen::Game => renderer.draw_game(&game.snapshot(), game_over.as_ref())?,
                    Screen::Help => renderer.draw_help(help_text)?,
                }
                continue;
            }
            _ => continue,
        };

        match screen {
            Screen::Help => {
                if input::closes_help(&key) {
                    screen = Screen::Game;
                    renderer.draw_game(&game.snapshot(), game_over.as_ref())?;
                }
            }
            Screen::Game => match input::command_for(&key) {
                Some(Command::Move(direction)) => {
                    let update = game.step(direction);
                    if let UpdateKind::Ignored(_) = update.kind {
                        continue;
                    }
                    if update.game_over.is_some() {
                        game_over = update.game_over;
                    }
                    renderer.draw_game(&game.snapshot(), game_over.as_ref())?;
                }
                Some(Command::Reset) => {
                    game.reset();
                    game_over = None;
                    renderer.draw_game(&game.snapshot(), None)?;
                }
                Some(Command::ShowHelp) => {
                    screen = Screen::Help;
                    renderer.draw_help(help_text)?;
                }
                Some(Command::Quit) => {
                    info!("quit with score {}", game.score());
                    break;
                }
                None => {}
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["tuinty"]).unwrap();
        assert_eq!(args.palette().unwrap(), Palette::default());
        assert_eq!(args.seed, None);
        assert!(!args.no_save);
    }

    #[test]
    fn test_colour_args() {
        let argv = "tuinty -b 1 2 3 --tile 4 5 6 -o 0.5".split_whitespace();
        let args = Args::try_parse_from(argv).unwrap();
        let palette = args.palette().unwrap();
        assert_eq!(palette.background, Rgb::new(1, 2, 3));
        assert_eq!(palette.tile, Rgb::new(4, 5, 6));
        assert_eq!(palette.opacity, 0.5);
    }

    #[test]
    fn test_out_of_range_args_rejected() {
        assert!(Args::try_parse_from(["tuinty", "-b", "1", "2", "256"]).is_err());
        assert!(Args::try_parse_from(["tuinty", "-t", "1", "2"]).is_err());
        assert!(Args::try_parse_from(["tuinty", "-o", "1.5"]).is_err());
    }

    #[test]
    fn test_restore_runs_on_panic() {
        let restored = Cell::new(0);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _restore = OnDrop::new(|| restored.set(restored.get() + 1));
            panic!("event loop failed");
        }));
        assert!(result.is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_runs_on_early_return() {
        let restored = Cell::new(0);
        let run = || -> Result<()> {
            let _restore = OnDrop::new(|| restored.set(restored.get() + 1));
            anyhow::bail!("drawing failed")
        };
        assert!(run().is_err());
        assert_eq!(restored.get(), 1);
    }
}
