//! Logging and error-report setup
//!
//! The TUI owns the terminal, so logs go to a daily-rolling JSON file only.
//! `log` macros are bridged into `tracing`, and miette is configured from
//! the detected terminal capabilities for startup error reports.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use supports_color::Stream;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix of the rolling log.
const LOG_FILE_NAME: &str = "memoir-reader.log";

// ============================================================================
// Startup Error Reports
// ============================================================================

/// How the miette report for a failed dataset load is drawn on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// stderr is a terminal that understands at least basic ANSI color.
    pub color: bool,
    /// Box-drawing and arrow glyphs are safe to print.
    pub unicode: bool,
    /// OSC 8 hyperlinks; only offered on truecolor terminals.
    pub links: bool,
}

impl ReportStyle {
    /// Probe stderr and the locale.
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let support = supports_color::on(Stream::Stderr);
        let interactive = io::stderr().is_terminal();
        Self {
            color: interactive && support.as_ref().is_some_and(|s| s.has_basic),
            unicode: unicode_locale(
                std::env::var("TERM").ok().as_deref(),
                std::env::var("LANG").ok().as_deref(),
            ),
            links: support.as_ref().is_some_and(|s| s.has_16m),
        }
    }

    fn handler(self) -> miette::MietteHandler {
        miette::MietteHandlerOpts::new()
            .terminal_links(self.links)
            .unicode(self.unicode)
            .color(self.color)
            .context_lines(2)
            .break_words(true)
            .build()
    }
}

/// Unset variables count as capable; a dumb terminal or a non-UTF-8
/// locale does not.
fn unicode_locale(term: Option<&str>, lang: Option<&str>) -> bool {
    let term_ok = term.map_or(true, |t| !t.contains("dumb"));
    let lang_ok = lang.map_or(true, |l| {
        let l = l.to_ascii_lowercase();
        l.contains("utf-8") || l.contains("utf8")
    });
    term_ok && lang_ok
}

// ============================================================================
// Logging Initialization
// ============================================================================

/// Log directory under the application data directory.
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Initialize file logging for TUI mode.
///
/// No stdout layer is installed: ratatui is drawing in raw/alternate-screen
/// mode. The returned guard must live until shutdown so buffered lines are
/// flushed.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // try_init: a second call (e.g. from tests) must not panic
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    init_miette();

    let dir = log_dir.to_path_buf();
    std::thread::spawn(move || compress_old_logs(&dir));

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );

    guard
}

/// Whether a file in the log directory is a finished log awaiting gzip.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.strip_prefix(LOG_FILE_NAME)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| !date.is_empty() && date != today_suffix && !date.ends_with(".gz"))
}

/// Gzip rolled-over logs from previous days
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?;
    let mut gz_name = file_name.to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}

/// Install the miette report hook used by `main` for startup failures.
fn init_miette() {
    let style = ReportStyle::detect();
    if miette::set_hook(Box::new(move |_| Box::new(style.handler()))).is_err() {
        log::debug!("miette hook already installed");
    }
}
