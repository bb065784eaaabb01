use std::io::{self, Write};
use std::path::Path;

use crate::bootstrap::error::BootstrapError;
use crate::bootstrap::installer::InstallCommand;
use crate::model::config::AppConfig;
use crate::model::context::InstallationContext;
use crate::model::stage::Stage;

/// Drives a single run: directory check, install, guidance.
#[derive(Debug)]
pub struct Bootstrapper {
    config: AppConfig,
    command: InstallCommand,
    stage: Stage,
}

impl Bootstrapper {
    pub fn new(config: AppConfig) -> Self {
        let command = InstallCommand::from_config(&config.install);
        Self {
            config,
            command,
            stage: Stage::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every stage against `root`, writing progress and guidance to `out`.
    ///
    /// Diagnostics are left to the caller; the returned error carries them.
    pub fn run(&mut self, root: &Path, out: &mut impl Write) -> Result<(), BootstrapError> {
        let result = self.run_stages(root, out);
        self.advance(if result.is_ok() {
            Stage::Done
        } else {
            Stage::Failed
        });
        result
    }

    fn run_stages(&mut self, root: &Path, out: &mut impl Write) -> Result<(), BootstrapError> {
        writeln!(out, "🌱 Installing {} Dependencies...\n", self.config.project.name)?;

        self.advance(Stage::DirectoryCheck);
        let context = self.locate_target(root)?;

        self.advance(Stage::Install);
        let target = context.target_name();
        writeln!(out, "📦 Installing {target} dependencies...")?;
        // the child writes straight to the terminal; keep our lines ahead of it
        out.flush()?;
        self.run_install(&context)?;
        writeln!(
            out,
            "✅ {} dependencies installed successfully!\n",
            capitalize(&target)
        )?;

        self.advance(Stage::ReportSuccess);
        self.report_success(out)?;
        Ok(())
    }

    pub fn locate_target(&self, root: &Path) -> Result<InstallationContext, BootstrapError> {
        let target = self.config.target_path(root);
        if !target.is_dir() {
            tracing::warn!("target directory missing: {}", target.display());
            return Err(BootstrapError::MissingDirectory {
                name: capitalize(&self.config.project.target_dir),
                path: target,
            });
        }

        Ok(InstallationContext::new(root, target))
    }

    pub fn run_install(&self, context: &InstallationContext) -> Result<(), BootstrapError> {
        tracing::info!(
            "installing {} under {}",
            context.target_name(),
            context.root().display()
        );

        self.command
            .run_in(&context.target)
            .map_err(|failure| BootstrapError::InstallCommand {
                target: context.target_name(),
                command: self.command.display(),
                failure,
            })
    }

    pub fn report_success(&self, out: &mut impl Write) -> io::Result<()> {
        let guidance = &self.config.guidance;

        writeln!(out, "🎉 All dependencies installed successfully!")?;
        writeln!(out, "\n📋 Next steps:")?;
        for (index, step) in guidance.next_steps.iter().enumerate() {
            writeln!(out, "{}. {step}", index + 1)?;
        }
        writeln!(out, "\n🚀 {}", guidance.farewell)?;
        out.flush()
    }

    fn advance(&mut self, next: Stage) {
        tracing::info!("stage {} -> {}", self.stage.label(), next.label());
        self.stage = next;
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
