mod bootstrap;
mod model;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;

use bootstrap::Bootstrapper;
use model::config::AppConfig;

fn main() -> ExitCode {
    let _guard = init_logging();

    tracing::info!("install-deps starting");

    match run() {
        Ok(()) => {
            tracing::info!("install-deps finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("install-deps failed: {err:#}");
            eprintln!("❌ {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let root = std::env::current_dir().context("cannot determine working directory")?;
    let config = AppConfig::load(&root)?;

    let mut bootstrapper = Bootstrapper::new(config);
    let mut stdout = io::stdout().lock();
    let result = bootstrapper.run(&root, &mut stdout);
    tracing::info!("bootstrap ended at stage {}", bootstrapper.stage().label());
    result?;
    Ok(())
}

/// Log to a daily file in the data dir (never stdout). Skipped if the dir can't be created.
fn init_logging() -> Option<WorkerGuard> {
    let log_dir = directories::ProjectDirs::from("", "", "ecoedu-bootstrap")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("ecoedu-bootstrap"));
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "bootstrap.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter("install_deps=info")
        .init();

    Some(guard)
}
