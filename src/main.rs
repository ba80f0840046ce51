//! Vocabulary SRS - spaced repetition trainer for Japanese word lists
//!
//! A terminal app with a searchable dictionary, three practice modes and a
//! fixed-ladder review scheduler.

mod config;
mod error;
mod models;
mod progress;
mod quiz;
mod scheduler;
mod session;
mod storage;
mod store;
mod ui;
mod vocabulary;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use storage::DataDir;
use store::ReviewStateStore;
use ui::App;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "vocab")]
#[command(author, version, about = "Spaced repetition vocabulary trainer TUI", long_about = None)]
struct Args {
    /// Directory holding the word list, progress and log
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Import a JSON word list and make it the current vocabulary
    #[arg(short, long)]
    import: Option<PathBuf>,

    /// Export review progress to a dated JSON file
    #[arg(long)]
    export_progress: bool,

    /// Where to write the progress export
    #[arg(short, long, requires = "export_progress")]
    output: Option<PathBuf>,

    /// Replace review progress with a previously exported file
    #[arg(long)]
    import_progress: Option<PathBuf>,

    /// Forget all review progress
    #[arg(long)]
    reset_progress: bool,

    /// Print progress statistics and exit
    #[arg(long)]
    stats: bool,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().unwrap_or_default();

    // Determine data directory
    let data_dir = args.data_dir.clone().unwrap_or_else(DataDir::default_path);
    let data_dir = DataDir::new(data_dir)?;

    init_logging(&data_dir, &config)?;
    info!(data_dir = %data_dir.root().display(), "starting");

    let mut store = ReviewStateStore::open(Box::new(data_dir.progress_backend()));

    if run_cli(&args, &data_dir, &mut store)? {
        return Ok(());
    }

    // Run TUI
    run_tui(data_dir, store, config)
}

/// Logs go to a file; the terminal belongs to the TUI.
fn init_logging(data_dir: &DataDir, config: &Config) -> Result<()> {
    let path = data_dir.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

/// Handle the one-shot command line actions. Returns whether any ran.
fn run_cli(args: &Args, data_dir: &DataDir, store: &mut ReviewStateStore) -> Result<bool> {
    let today = scheduler::today();
    let mut ran = false;

    if let Some(source) = &args.import {
        let entries = data_dir.import_vocabulary(source)?;
        let seeded = store.seed(&entries, today)?;
        println!(
            "✓ Imported {} words into {} ({} new)",
            entries.len(),
            data_dir.vocabulary_path().display(),
            seeded
        );
        ran = true;
    }

    if let Some(source) = &args.import_progress {
        let states = storage::import_progress(source)
            .with_context(|| format!("Failed to import progress from {:?}", source))?;
        let count = states.len();
        store.replace(states)?;
        println!("✓ Imported progress for {} words", count);
        ran = true;
    }

    if args.reset_progress {
        store.reset()?;
        println!("✓ Progress cleared");
        ran = true;
    }

    if args.export_progress {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| DataDir::default_export_path(today));
        let count = storage::export_progress(store.states(), &path)?;
        println!("✓ Exported {} words to {}", count, path.display());
        ran = true;
    }

    if args.stats {
        let vocabulary = data_dir.load_vocabulary();
        let stats = progress::summarize(&vocabulary, store.states(), today);
        println!("Words:     {}", stats.total);
        println!("Tracked:   {}", store.len());
        println!("Learned:   {} ({}%)", stats.learned, stats.rate);
        println!("Due today: {}", stats.due);
        println!("Reviews:   {}", stats.reviews);
        println!("Streak:    {} days", stats.daily_streak);
        for (level, count) in stats.levels.iter().enumerate() {
            println!("  L{}: {}", level, count);
        }
        ran = true;
    }

    Ok(ran)
}

fn run_tui(data_dir: DataDir, store: ReviewStateStore, config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(data_dir, store, config);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        error!(error = %err, "tui exited with error");
        eprintln!("Error: {}", err);
        return Err(err);
    }

    info!("exiting");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}
