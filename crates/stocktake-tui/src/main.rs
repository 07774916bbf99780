//! Stocktake - a terminal client for the inventory management API.
//!
//! Register or log in, add products, browse the product list and adjust
//! stock quantities without leaving the keyboard.

mod app;
mod ui;

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stocktake_core::api::ApiClient;
use stocktake_core::config::Config;
use stocktake_core::models::Credentials;
use stocktake_core::status::StatusRegion;
use stocktake_core::InventoryClient;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written while the terminal UI owns the screen
const LOG_FILE: &str = "stocktake.log";

const USAGE: &str = "\
Usage: stocktake [--list | --help]

  (no arguments)  Start the terminal UI
  --list          Log in, print all products as JSON and exit
  --help          Show this message

Environment:
  STOCKTAKE_API_URL    Inventory API base URL (default http://localhost:8080)
  STOCKTAKE_USERNAME   Username to pre-fill or use with --list
  RUST_LOG             Log filter (default warn)";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to a file, since the terminal belongs to the UI
fn init_file_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--list") => return list_products().await,
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown argument: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
        None => {}
    }

    // Initialize logging
    let (config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let _guard = match config.log_dir() {
        Ok(dir) => init_file_tracing(&dir).ok(),
        Err(_) => None,
    };
    info!("Stocktake TUI starting");
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    // Create app before touching the terminal so errors print normally
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Stocktake TUI shutting down");
    Ok(())
}

/// Log in from the command line and dump the product list as JSON
async fn list_products() -> Result<()> {
    init_stderr_tracing();

    let config = Config::load()?;
    let api = ApiClient::new(config.api_base_url())?;
    let mut client = InventoryClient::new(api);

    let username = match std::env::var("STOCKTAKE_USERNAME") {
        Ok(name) if !name.trim().is_empty() => name,
        _ => prompt_username()?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    client
        .login(&Credentials::new(username, password))
        .await
        .context("Login failed")?;

    if let Some(message) = client.status(StatusRegion::Product).filter(|m| m.is_error()) {
        anyhow::bail!("{}", message.text);
    }

    let json = serde_json::to_string_pretty(client.products())?;
    println!("{}", json);

    let stats = client.stats();
    eprintln!(
        "{} products, total value {}, {} low on stock",
        stats.total_count,
        stats.total_value_display(),
        stats.low_stock_count
    );
    Ok(())
}

fn prompt_username() -> Result<String> {
    eprint!("Username: ");
    io::stderr().flush()?;

    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    Ok(username.trim().to_string())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Expire status messages before drawing
        app.tick();

        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so status messages expire on time
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
