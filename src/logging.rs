use anyhow::Context;
use std::path::Path;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
pub(crate) const LOG_ENV_VAR: &str = "DAYCAL_LOG";

const LOG_FILE: &str = "daycal.log";

/// Send tracing output to `daycal.log` in the working directory, filtered by
/// `$DAYCAL_LOG`.  The terminal belongs to the calendar, so nothing is logged
/// unless the variable is set.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub(crate) fn init() -> anyhow::Result<Option<WorkerGuard>> {
    if std::env::var_os(LOG_ENV_VAR).is_none() {
        return Ok(None);
    }
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .with_context(|| format!("invalid ${LOG_ENV_VAR} filter"))?;
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        std::fs::remove_file(&log_path)
            .with_context(|| format!("failed to remove old {}", log_path.display()))?;
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // A subscriber is already installed; dropping the guard shuts our
        // writer down.
        Err(_) => Ok(None),
    }
}

/// Record panics in the log before handing them to the previously installed
/// hook (which restores the terminal).
pub(crate) fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", %info, "panic");
            previous(info);
        }));
    });
}
