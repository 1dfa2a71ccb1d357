//! Console and file logging built on [`tracing`].

mod logger;
mod output;

pub use logger::{Log, Logger, TaskOutcome, TaskRecord};
pub use output::{init_subscriber, log_path};

/// A [`Logger`] bound to a thread-local subscriber that writes only to a
/// temp log file, so a test can read back what was logged.
///
/// Keep the returned guard alive for the whole test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("temp dir");
    let path = tmp.path().join("import.log");
    let file = output::LogFile::create(&path).expect("test log file");
    let subscriber = tracing_subscriber::registry().with(file.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (Logger::with_log_file(Some(path)), tmp, guard)
}

/// Everything the isolated logger has written so far.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn read_isolated_log(log: &Logger) -> String {
    let path = log.log_path().expect("isolated logger has a file");
    std::fs::read_to_string(path).expect("read test log")
}
