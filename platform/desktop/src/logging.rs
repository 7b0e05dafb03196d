use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs to stdout and to `line-drawer.log`, filtered by `LINE_DRAWER_LOG`.
pub fn init_logging() -> Result<WorkerGuard> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let file_appender = tracing_appender::rolling::Builder::new()
        .filename_prefix("line-drawer")
        .filename_suffix("log")
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .build(get_log_directory()?)
        .context("Failed to build the log file appender")?;
    let (non_blocking, appender_guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::EnvFilter::from_env("LINE_DRAWER_LOG"))
        .with(fmt_layer)
        .with(file_layer)
        .init();
    Ok(appender_guard)
}

pub fn get_log_directory() -> Result<std::path::PathBuf> {
    if cfg!(target_os = "linux") {
        dirs::state_dir().context("Failed to get the state dir, please set $XDG_STATE_HOME or $HOME")
    } else if cfg!(target_os = "macos") {
        Ok(dirs::home_dir()
            .context("Failed to get the home dir")?
            .join("Library/Logs/"))
    } else if cfg!(target_os = "windows") {
        dirs::data_dir().context("Failed to get the data dir")
    } else {
        Err(anyhow!("Logging to a file is not supported on this platform"))
    }
}
