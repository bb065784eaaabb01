use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("{name} directory not found: {}", .path.display())]
    MissingDirectory { name: String, path: PathBuf },

    #[error("failed to install {target} dependencies: `{command}` {failure}")]
    InstallCommand {
        target: String,
        command: String,
        failure: InstallFailure,
    },

    #[error("failed to write progress output")]
    Output(#[from] io::Error),
}

/// Why the external install command did not succeed.
#[derive(Debug, Error)]
pub enum InstallFailure {
    #[error("could not be started: {0}")]
    Spawn(io::Error),

    #[error("failed with {0}")]
    Exit(ExitStatus),
}
