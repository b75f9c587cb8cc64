use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use dashctl_tui::{ui, App};
use dashctl_core::StateFile;

/// Terminal dashboard editor
#[derive(Parser, Debug)]
#[command(name = "dashctl", version, about)]
struct Args {
    /// Path to the state file (default: ~/.dashctl/state.json)
    #[arg(long)]
    state_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let state_path = match args.state_file {
        Some(path) => path,
        None => StateFile::default_path()?,
    };

    // Logs go to a file next to the state: stdout belongs to the TUI
    init_tracing(&state_path);

    // Create app state (loads the state file, seeds defaults if missing)
    let mut app = App::new(StateFile::new(&state_path));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let res = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|f| ui::render(f, app))?;

        // Poll for events with timeout
        if let Some(event) = App::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key_event(key)?;
                }
                Event::Resize(_, _) => {
                    // Terminal resized, will re-render on next loop
                }
                _ => {}
            }
        }

        // Exit if requested
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Best-effort tracing setup; the app runs fine without a log file
fn init_tracing(state_path: &std::path::Path) {
    let log_path = state_path
        .parent()
        .map(|dir| dir.join("dashctl.log"))
        .unwrap_or_else(|| PathBuf::from("dashctl.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(file)
            .with_ansi(false)
            .try_init();
    }
}
