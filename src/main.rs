mod app;
mod assessment;
mod catalog;
mod config;
mod logging;
mod messaging;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::assessment::{spawn_assessment, AssessmentEngine, AssessmentHandle, FixedAssessmentEngine};
use crate::catalog::{Catalog, Role};
use crate::ui::theme::ThemeService;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Terminal telehealth client: symptom checker and provider messaging
#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "telecare")]
#[command(version)]
struct CliArgs {
    /// Which side of the consultation to show (patient or doctor)
    #[arg(long, value_name = "ROLE")]
    role: Option<Role>,
    /// Catalog TOML to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load config, command line wins
    let mut cfg = config::load_config()?;
    if let Some(role) = args.role {
        cfg.role = role;
    }
    if let Some(path) = args.catalog {
        cfg.catalog_path = Some(path);
    }

    if let Some(path) = logging::init(&cfg.logging)? {
        eprintln!("Logging to {}", path.display());
    }
    tracing::info!(role = cfg.role.label(), "telecare starting v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match cfg.catalog_path {
        Some(ref path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let theme = ThemeService::init(cfg.ui.theme);

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let state = AppState::new(cfg, catalog, theme);
    let result = run_app(&mut terminal, state).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "telecare exited with error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("telecare stopped");
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: AppState,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let engine: Arc<dyn AssessmentEngine> = Arc::new(FixedAssessmentEngine);
    let delay = Duration::from_millis(state.config.assessment.delay_ms);
    let mut pending: Option<AssessmentHandle> = None;

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "terminal input failed");
                    break;
                }
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        // Process actions
        for action in actions {
            match action {
                Action::StartAssessment {
                    request_id,
                    symptoms,
                } => {
                    if let Some(previous) = pending.take() {
                        previous.cancel();
                    }
                    pending = Some(spawn_assessment(
                        request_id,
                        symptoms,
                        Arc::clone(&engine),
                        delay,
                        event_tx.clone(),
                    ));
                }
                Action::SaveConfig => {
                    if let Err(e) = config::save_config(&state.config) {
                        tracing::error!(error = %e, "failed to save config");
                        state.set_error(format!("Could not save settings: {}", e));
                    }
                }
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if pending.as_ref().is_some_and(|h| h.is_finished()) {
            pending = None;
        }

        if state.should_quit {
            if let Some(handle) = pending.take() {
                tracing::info!(request_id = handle.request_id(), "quitting with assessment in flight");
                handle.cancel();
                handle.join().await;
            }
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
