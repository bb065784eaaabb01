use std::path::Path;
use std::process::{Command, Stdio};

use crate::bootstrap::error::InstallFailure;
use crate::model::config::InstallConfig;

/// The external dependency-installation command, e.g. `npm install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    program: String,
    args: Vec<String>,
}

impl InstallCommand {
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &InstallConfig) -> Self {
        Self::new(config.program.clone(), config.args.iter().cloned())
    }

    /// Command line as the user would type it.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run once inside `dir`, blocking, with the terminal's stdio attached.
    pub fn run_in(&self, dir: &Path) -> Result<(), InstallFailure> {
        tracing::info!("running `{}` in {}", self.display(), dir.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(InstallFailure::Spawn)?;

        if !status.success() {
            tracing::warn!("`{}` failed with {status}", self.display());
            return Err(InstallFailure::Exit(status));
        }

        Ok(())
    }
}
