//! Tracing configuration for Kiosk Player
//!
//! ## Architecture / 架构
//!
//! - **stdout**: always on, chrono timestamps with file/line/target
//! - **file**: non-blocking appender under `<app data>/logs/kiosk-player.log`
//! - **Sentry**: only when `SENTRY_DSN` is set

use std::{fs, io, sync::OnceLock};

use kp_core::ports::AppDirsPort;
use kp_infra::DirsAppDirsAdapter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "kiosk-player.log";
const ENV_VAR: &str = "KIOSK_PLAYER_ENV";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions) || std::env::var(ENV_VAR).is_ok_and(|env| env == "development")
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the app crates
/// - **Production**: info level
/// - **Tauri internals**: setup spans at warn, webview and IPC spans off
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let app_level = if is_dev { "debug" } else { "info" };
    vec![
        app_level.to_string(),
        "tauri=warn".to_string(),       // Filter noisy setup spans (app::setup)
        "wry=off".to_string(),          // Filter webview internal spans (custom_protocol)
        "ipc::request=off".to_string(), // Filter IPC handler spans
        "reqwest=info".to_string(),
        "hyper_util=info".to_string(),
        format!("kp_app={app_level}"),
        format!("kp_infra={app_level}"),
    ]
}

/// Initialize the tracing subscriber.
///
/// ## Behavior / 行为
///
/// - **Environment filter**: respects `RUST_LOG`, otherwise the defaults above
/// - **Sentry**: layer added only when `SENTRY_DSN` is set; the guard is kept
///   for the life of the process
/// - **File**: falls back to stdout only when the log directory is unusable
///
/// ## Call this / 调用位置
///
/// Call once, **before** the Tauri builder is set up.
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let sentry_layer = if let Ok(dsn) = std::env::var("SENTRY_DSN") {
        let guard = sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(if is_dev { "development" } else { "production" }.into()),
                traces_sample_rate: if is_dev { 1.0 } else { 0.1 },
                ..Default::default()
            },
        ));

        if SENTRY_GUARD.set(guard).is_err() {
            eprintln!("Sentry guard already initialized");
        }

        Some(sentry_tracing::layer())
    } else {
        None
    };

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer() {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    // "2026-01-15 10:30:45.123 INFO src/file.rs:42 target: message"
    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    // Must be registered once, before any logging occurs.
    let subscriber = registry()
        .with(env_filter)
        .with(sentry_layer)
        .with(stdout_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let app_dirs = DirsAppDirsAdapter::new().get_app_dirs()?;
    let logs_dir = app_dirs.logs_dir();
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_directives_enable_debug_for_app_crates() {
        let directives = build_filter_directives(true);
        assert_eq!(directives[0], "debug");
        assert!(directives.contains(&"kp_app=debug".to_string()));
        assert!(directives.contains(&"kp_infra=debug".to_string()));
        assert!(directives.contains(&"wry=off".to_string()));
    }

    #[test]
    fn prod_directives_stay_at_info() {
        let directives = build_filter_directives(false);
        assert_eq!(directives[0], "info");
        assert!(directives.contains(&"kp_infra=info".to_string()));
        assert!(directives.contains(&"tauri=warn".to_string()));
    }

    #[test]
    fn directives_parse_as_env_filter() {
        let joined = build_filter_directives(true).join(",");
        assert!(tracing_subscriber::EnvFilter::try_new(joined).is_ok());
    }
}
