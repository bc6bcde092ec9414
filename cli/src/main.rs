//! Churn CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI loads the classifier once, then bridges [`churn_engine`]
//! (form state) and [`churn_tui`] (rendering) inside a RAII terminal session.
//!
//! ```text
//! main() -> load_classifier() -> TerminalSession::new() -> run_app() -> App + TUI
//! ```
//!
//! A model that fails to load or doesn't match the feature schema is fatal:
//! the error is printed and the process exits before the terminal is touched.
//!
//! # Event Loop
//!
//! A fixed 8ms render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`churn_tui::InputPump`])
//! 3. Render frame
//! 4. Check for quit

use std::fs::{self, File, OpenOptions};
use std::io::{self, Stdout, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use churn_config::{ChurnConfig, Settings};
use churn_engine::{App, AppOptions};
use churn_tui::{InputPump, draw, handle_events};

const FRAME_DURATION: Duration = Duration::from_millis(8);

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than write over the form.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.churn/logs/churn.log
    if let Some(config_path) = ChurnConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("churn.log"));
    }

    // Fallback: ./.churn/logs/churn.log
    candidates.push(PathBuf::from(".churn").join("logs").join("churn.log"));

    candidates
}

fn load_settings() -> Settings {
    let config = match ChurnConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "Using default settings: {err}");
            None
        }
    };
    Settings::from_env(config.as_ref())
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode, bracketed paste and the alternate screen. On drop all of
/// it is restored, so the shell stays usable after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            let _ = execute!(out, DisableBracketedPaste, LeaveAlternateScreen);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let settings = load_settings();
    let classifier = match churn_model::load_classifier(&settings.model_path) {
        Ok(classifier) => classifier,
        Err(err) => {
            tracing::error!("Model load failed: {err}");
            eprintln!("Error: failed to load churn model: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(classifier, AppOptions::from_settings(&settings));

    let result = {
        match TerminalSession::new().context("failed to set up terminal") {
            Ok(mut session) => run_app(&mut session.terminal, &mut app).await,
            Err(err) => Err(err),
        }
    };

    match result {
        Ok(()) => {
            tracing::info!("Session ended");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Session failed: {err:?}");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend + io::Write,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(app, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        if let Err(e) = terminal.draw(|frame| draw(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
