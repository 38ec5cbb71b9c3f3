// src/logging.rs

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Keeps the background log writer alive. Drop it only at shutdown.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so they never interleave with quiz output on stdout.
/// With file logging enabled, a daily rolling `quiz.log` is written under `log_dir` as well.
pub fn init_tracing(config: &Config) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if config.enable_file_logs {
        if let Err(err) = std::fs::create_dir_all(&config.log_dir) {
            eprintln!("failed to create log directory {}: {}", config.log_dir, err);
        } else {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "quiz.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();

            return Some(FileLogGuard { _guard: guard });
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();

    None
}
