//! worktree-tui Entry Point
//!
//! Launches the full-screen worktree manager for the repository in the
//! current directory.
//!
//! Usage:
//!   worktree-tui
//!
//! Environment:
//!   WORKTREE_TUI_LOG=<file>   Write logs to <file> (filtered by RUST_LOG)
//!
//! Invoked through the `wt` shell function, choosing `c` on a worktree
//! leaves the shell in that worktree's directory.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use worktree_core::{Config, GitRepository};
use worktree_tui::TerminalApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check if we have a TTY before touching the terminal
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: worktree-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("Run it from an interactive shell, or over SSH with -t.");
        std::process::exit(1);
    }

    let config = Config::load().context("loading configuration")?;
    init_logging(&config)?;

    let dir = std::env::current_dir().context("reading current directory")?;
    info!(dir = %dir.display(), "Starting");
    let repo = Arc::new(GitRepository::new(dir, &config));
    let mut app = TerminalApp::new(config, repo);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Exiting");
    result
}

/// The alternate screen owns stdout, so logs only go to a file when asked
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(EnvFilter::from_default_env())
        .init();
    Ok(())
}
