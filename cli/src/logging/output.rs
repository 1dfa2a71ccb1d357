//! Where log events go: the coloured console and the persistent import log.
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing::field::{Field, Visit};

/// `kind` field value for section headers.
pub(super) const STAGE: &str = "stage";
/// `kind` field value for dry-run actions.
pub(super) const DRY_RUN: &str = "dry_run";
/// `kind` field value for a summary line of a task that finished.
pub(super) const SUMMARY_OK: &str = "summary_ok";
/// `kind` field value for a summary line of a skipped task.
pub(super) const SUMMARY_SKIPPED: &str = "summary_skipped";
/// `kind` field value for a summary line of a failed task.
pub(super) const SUMMARY_FAILED: &str = "summary_failed";

const LOG_DIR: &str = "cursor-rules";
const LOG_FILE: &str = "import.log";

/// `$XDG_CACHE_HOME/cursor-rules/import.log`, falling back to `~/.cache`.
///
/// `None` when neither the cache nor the home directory is known.
#[must_use]
pub fn log_path() -> Option<PathBuf> {
    let non_empty = |name: &str| std::env::var_os(name).filter(|v| !v.is_empty());
    let cache = non_empty("XDG_CACHE_HOME").map(PathBuf::from).or_else(|| {
        non_empty("HOME")
            .or_else(|| non_empty("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(".cache"))
    })?;
    Some(cache.join(LOG_DIR).join(LOG_FILE))
}

/// The parts of an event the importer renders.
#[derive(Default)]
struct Fields {
    message: String,
    kind: Option<String>,
}

impl Fields {
    fn of(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }
}

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "kind" => self.kind = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

/// Layer appending every event to the import log, one plain line each.
#[derive(Debug)]
pub(super) struct LogFile {
    file: Mutex<File>,
}

impl LogFile {
    /// Truncate `path` (creating its directory) and write the run header.
    pub(super) fn create(path: &Path) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = File::create(path)?;
        writeln!(
            file,
            "# cursor-rules {} import, {} UTC",
            crate::cli::VERSION,
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
        )?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogFile {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let fields = Fields::of(event);
        let marker = match fields.kind.as_deref() {
            Some(STAGE) => "==> ",
            Some(DRY_RUN) => "[dry run] ",
            _ => "",
        };
        let time = chrono::Utc::now().format("%H:%M:%S");
        let level = event.metadata().level();
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{time} {level} {marker}{}", fields.message).ok();
        }
    }
}

/// Console rendering: bare progress lines with coloured headers and notices.
struct Console;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for Console
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut w: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let Fields { message, kind } = Fields::of(event);
        let (open, prefix) = match (*event.metadata().level(), kind.as_deref()) {
            (Level::ERROR, _) => ("\x1b[31m", "Error: "),
            (Level::WARN, _) => ("\x1b[33m", ""),
            (Level::DEBUG | Level::TRACE, _) => ("\x1b[2m", ""),
            (_, Some(STAGE)) => ("\x1b[1;34m", "==> "),
            (_, Some(DRY_RUN)) => ("\x1b[36m", "[DRY RUN] "),
            (_, Some(SUMMARY_OK)) => ("\x1b[32m", "  "),
            (_, Some(SUMMARY_SKIPPED)) => ("\x1b[33m", "  "),
            (_, Some(SUMMARY_FAILED)) => ("\x1b[31m", "  "),
            _ => return writeln!(w, "{message}"),
        };
        writeln!(w, "{open}{prefix}{message}\x1b[0m")
    }
}

/// Install the global subscriber.
///
/// Errors go to stderr and everything else to stdout; debug lines reach the
/// console only when `verbose` is set. The import log receives every event.
/// Call once, before anything is logged.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let console_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let writer = io::stderr
        .with_max_level(Level::ERROR)
        .and(io::stdout.with_min_level(Level::WARN));
    let console = tracing_subscriber::fmt::layer()
        .event_format(Console)
        .with_writer(writer)
        .with_filter(console_filter);

    let file = log_path()
        .and_then(|path| LogFile::create(&path).ok())
        .map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry().with(console).with(file).init();
}
