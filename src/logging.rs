use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the background writer alive for the life of the process.
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// from the settings or the command line, and only then may `RUST_LOG`
/// override it.
///
/// When `log_file` is given, output goes to that file through a non-blocking
/// writer instead of stderr. Calling this more than once is harmless.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file.as_deref().and_then(file_appender) {
        Some((writer, guard)) => {
            if builder.with_ansi(false).with_writer(writer).try_init().is_ok() {
                let _ = FILE_GUARD.set(guard);
            }
        }
        None => {
            let _ = builder.try_init();
        }
    }
}

fn file_appender(
    path: &Path,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let file_name = path.file_name()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if std::fs::create_dir_all(dir).is_err() {
        eprintln!("cannot create log folder {}", dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, file_name);
    Some(tracing_appender::non_blocking(appender))
}
