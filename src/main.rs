use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use pop_connect::ai::Difficulty;
use pop_connect::config::{AppConfig, Controller};
use pop_connect::session::play_game;
use pop_connect::ui::App;

/// Connect Four on any board size, with pop moves.
#[derive(Parser)]
#[command(name = "pop-connect", about = "Play Connect Four with pop moves")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "pop-connect.toml")]
    config: PathBuf,

    /// Override number of rows (4-10)
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns (4-10)
    #[arg(long)]
    cols: Option<usize>,

    /// Override the run length needed to win
    #[arg(long)]
    win_length: Option<usize>,

    /// Who plays first
    #[arg(long, value_enum)]
    first: Option<Controller>,

    /// Who plays second
    #[arg(long, value_enum)]
    second: Option<Controller>,

    /// Difficulty of a computer first player (1 or 2)
    #[arg(long)]
    first_difficulty: Option<Difficulty>,

    /// Difficulty of a computer second player (1 or 2)
    #[arg(long)]
    second_difficulty: Option<Difficulty>,

    /// Seed for computer players, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Play computer against computer on stdout, without the TUI
    #[arg(long)]
    headless: bool,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.headless)?;

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.game.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.game.cols = cols;
    }
    if let Some(win_length) = cli.win_length {
        config.game.win_length = win_length;
    }
    if let Some(kind) = cli.first {
        config.players.first.kind = kind;
    }
    if let Some(kind) = cli.second {
        config.players.second.kind = kind;
    }
    if let Some(difficulty) = cli.first_difficulty {
        config.players.first.difficulty = difficulty;
    }
    if let Some(difficulty) = cli.second_difficulty {
        config.players.second.difficulty = difficulty;
    }
    config.validate().context("validating settings")?;

    if cli.headless {
        run_headless(&config, cli.seed)
    } else {
        run_tui(config, cli.seed)
    }
}

fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // Anything written to the terminal would tear the TUI
        None => {}
    }
    Ok(())
}

fn run_headless(config: &AppConfig, seed: Option<u64>) -> Result<()> {
    let players = &config.players;
    if players.first.is_human() || players.second.is_human() {
        bail!("headless mode needs two computer players (use --first computer --second computer)");
    }

    let state = config.game.new_state().context("setting up the board")?;
    let mut first = players.first.difficulty.agent(seed.map(|s| s.wrapping_add(1)));
    let mut second = players.second.difficulty.agent(seed.map(|s| s.wrapping_add(2)));

    println!("{}", state.board());
    let record = play_game(state, first.as_mut(), second.as_mut(), |m| {
        let action = if m.mv.pop { "popped" } else { "added new" };
        println!(
            "{} (computer) {} disc at column {}",
            m.player.name(),
            action,
            m.mv.column
        );
        println!("{}", m.state.board());
    })
    .context("playing the game")?;

    println!("{}", record.outcome.message());
    Ok(())
}

fn run_tui(config: AppConfig, seed: Option<u64>) -> Result<()> {
    let mut app = App::new(config, seed).context("setting up the game")?;

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running the game")
}
