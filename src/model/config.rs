use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional per-project override file, read from the invocation root.
pub const PROJECT_CONFIG_FILE: &str = "bootstrap.toml";

/// One config file's contents, remembered with where it came from.
#[derive(Debug, Clone)]
pub struct Layer {
    pub source: PathBuf,
    pub raw: String,
}

impl Layer {
    pub fn new(source: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            raw: raw.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub project: ProjectConfig,
    pub install: InstallConfig,
    pub guidance: GuidanceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Subdirectory of the root that holds the dependency manifest.
    pub target_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuidanceConfig {
    #[serde(default)]
    pub next_steps: Vec<String>,
    pub farewell: String,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config → project config.
    pub fn load(root: &Path) -> Result<Self> {
        let user_path = directories::ProjectDirs::from("", "", "ecoedu-bootstrap")
            .map(|dirs| dirs.config_dir().join("config.toml"));
        let project_path = root.join(PROJECT_CONFIG_FILE);

        let mut layers = Vec::new();
        for path in user_path.into_iter().chain(Some(project_path)) {
            if let Some(raw) = read_layer(&path)? {
                tracing::info!("config layer: {}", path.display());
                layers.push(Layer::new(path, raw));
            }
        }

        Self::from_layers(&layers)
    }

    /// Parse the embedded defaults and deep-merge each layer over them, in order.
    pub fn from_layers(layers: &[Layer]) -> Result<Self> {
        let defaults = include_str!("../../config/default.toml");
        let mut merged: toml::Value =
            toml::from_str(defaults).context("invalid built-in default config")?;

        for layer in layers {
            let overlay: toml::Value = toml::from_str(&layer.raw)
                .with_context(|| format!("parsing {}", layer.source.display()))?;
            merge(&mut merged, overlay);
        }

        let config: AppConfig = merged.try_into().context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn target_path(&self, root: &Path) -> PathBuf {
        root.join(&self.project.target_dir)
    }

    fn validate(&self) -> Result<()> {
        if self.install.program.trim().is_empty() {
            bail!("install.program must not be empty");
        }
        if self.project.target_dir.trim().is_empty() {
            bail!("project.target_dir must not be empty");
        }
        Ok(())
    }
}

fn read_layer(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Some(raw))
}

/// Tables merge key by key; any other value is replaced by the overlay.
fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_install_backend_with_npm() {
        let config = AppConfig::from_layers(&[]).unwrap();
        assert_eq!(config.project.name, "EcoEdu Platform");
        assert_eq!(config.project.target_dir, "backend");
        assert_eq!(config.install.program, "npm");
        assert_eq!(config.install.args, vec!["install".to_string()]);
        assert_eq!(config.guidance.next_steps.len(), 3);
    }

    #[test]
    fn layers_merge_key_by_key() {
        let user = Layer::new(
            "config.toml",
            r#"
            [install]
            program = "pnpm"
        "#,
        );
        let project = Layer::new(
            PROJECT_CONFIG_FILE,
            r#"
            [project]
            target_dir = "server"
        "#,
        );

        let config = AppConfig::from_layers(&[user, project]).unwrap();
        assert_eq!(config.install.program, "pnpm");
        // untouched keys in a merged table survive
        assert_eq!(config.install.args, vec!["install".to_string()]);
        assert_eq!(config.project.target_dir, "server");
        assert_eq!(config.project.name, "EcoEdu Platform");
    }

    #[test]
    fn later_layer_wins() {
        let first = Layer::new("config.toml", "[project]\nname = \"First\"");
        let second = Layer::new(PROJECT_CONFIG_FILE, "[project]\nname = \"Second\"");
        let config = AppConfig::from_layers(&[first, second]).unwrap();
        assert_eq!(config.project.name, "Second");
    }

    #[test]
    fn arrays_are_replaced_not_appended() {
        let layer = Layer::new(PROJECT_CONFIG_FILE, "[guidance]\nnext_steps = [\"only one\"]");
        let config = AppConfig::from_layers(&[layer]).unwrap();
        assert_eq!(config.guidance.next_steps, vec!["only one".to_string()]);
    }

    #[test]
    fn empty_program_is_rejected() {
        let layer = Layer::new(PROJECT_CONFIG_FILE, "[install]\nprogram = \"  \"");
        let err = AppConfig::from_layers(&[layer]).unwrap_err();
        assert!(err.to_string().contains("install.program"));
    }

    #[test]
    fn empty_target_dir_is_rejected() {
        let layer = Layer::new(PROJECT_CONFIG_FILE, "[project]\ntarget_dir = \"\"");
        assert!(AppConfig::from_layers(&[layer]).is_err());
    }

    #[test]
    fn malformed_layer_names_its_file() {
        let layer = Layer::new("/home/me/.config/ecoedu-bootstrap/config.toml", "[install\n");
        let err = AppConfig::from_layers(&[layer]).unwrap_err();
        assert!(
            format!("{err:#}").contains("parsing /home/me/.config/ecoedu-bootstrap/config.toml")
        );
    }

    #[test]
    fn wrong_value_type_is_an_invalid_configuration() {
        let layer = Layer::new(PROJECT_CONFIG_FILE, "[install]\nargs = \"install\"");
        let err = AppConfig::from_layers(&[layer]).unwrap_err();
        assert!(format!("{err:#}").starts_with("invalid configuration"));
    }

    #[test]
    fn broken_project_file_is_named_by_load() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join(PROJECT_CONFIG_FILE), "[install\n").unwrap();

        let err = AppConfig::load(root.path()).unwrap_err();
        assert!(format!("{err:#}").contains(PROJECT_CONFIG_FILE));
    }

    #[test]
    fn project_file_in_root_is_applied() {
        let root = tempfile::tempdir().unwrap();
        fs::write(
            root.path().join(PROJECT_CONFIG_FILE),
            "[project]\ntarget_dir = \"api\"",
        )
        .unwrap();

        let config = AppConfig::load(root.path()).unwrap();
        assert_eq!(config.project.target_dir, "api");
        assert_eq!(config.target_path(root.path()), root.path().join("api"));
    }
}
