use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use memoir_reader::config::AppConfig;
use memoir_reader::core::dataset::Dataset;
use memoir_reader::core::logging;
use memoir_reader::core::session::ReaderSession;
use memoir_reader::tui::app::AppState;
use memoir_reader::tui::events::NotificationLevel;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = AppConfig::load();

    // Initialize logging
    let _log_guard = logging::init_tui(&logging::log_dir(&config.data_dir()));
    log::info!("{} v{} starting", memoir_reader::NAME, memoir_reader::VERSION);
    if let Some(e) = &config_error {
        log::warn!("{e}; using defaults");
        eprintln!("Warning: {e}; using defaults");
    }

    // Load before touching the terminal so errors print normally
    let dataset = match load_dataset(&config) {
        Ok(dataset) => dataset,
        Err(report) => {
            log::error!("Failed to load dataset: {report}");
            eprintln!("{report:?}");
            std::process::exit(1);
        }
    };
    let chapter_count = dataset.len();
    tracing::info!(chapters = chapter_count, "Dataset ready");

    let mut app = AppState::new(ReaderSession::new(dataset), &config);
    app.push_notification(
        format!("Loaded {chapter_count} chapters"),
        NotificationLevel::Info,
    );
    if config_error.is_some() {
        app.push_notification(
            "Config file ignored; see log for details".to_string(),
            NotificationLevel::Warning,
        );
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms.max(1));
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Event loop failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Shutting down");
    Ok(())
}

/// Dataset from the first CLI argument, the config file, or the bundled
/// sample, in that order.
fn load_dataset(config: &AppConfig) -> miette::Result<Dataset> {
    let cli_path = std::env::args_os().nth(1).map(PathBuf::from);
    let dataset = match config.dataset_path(cli_path) {
        Some(path) => Dataset::load(&path)?,
        None => {
            log::info!("No dataset path configured; using bundled sample");
            Dataset::bundled()?
        }
    };
    Ok(dataset)
}
