use std::path::{Path, PathBuf};

/// Paths for one bootstrap run.
///
/// The install command runs with `target` as its working directory; the
/// process's own working directory is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationContext {
    pub root: PathBuf,
    pub target: PathBuf,
}

impl InstallationContext {
    pub fn new(root: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            target: target.into(),
        }
    }

    /// Short name of the target, used in progress messages.
    pub fn target_name(&self) -> String {
        self.target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.target.display().to_string())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
