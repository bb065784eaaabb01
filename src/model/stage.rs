/// Linear progress of a single bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Start,
    /// Checking that the target directory exists.
    DirectoryCheck,
    /// External install command is running.
    Install,
    /// Printing the next-step guidance.
    ReportSuccess,
    Done,
    Failed,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::DirectoryCheck => "directory-check",
            Stage::Install => "install",
            Stage::ReportSuccess => "report-success",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }
}
