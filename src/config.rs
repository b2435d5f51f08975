//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/worklog/worklog.toml`
//! 3. Local config: `<project_dir>/.worklog.toml`
//! 4. Environment variables: `WORKLOG_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, DataValue};

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_command: Option<String>,
    pub script_name: Option<String>,
    pub interactive: Option<bool>,
    pub repo_dir: Option<PathBuf>,
    pub data: BTreeMap<String, DataValue>,
}

/// Unified configuration for worklog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Command run when no command token is given (default: "help")
    pub default_command: String,
    /// Program name shown in usage lines (default: "wlog")
    pub script_name: String,
    /// Force prompts on or off; unset means "ask when stdin is a terminal"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    /// Repository the version command operates on (default: current directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_dir: Option<PathBuf>,
    /// Process-wide command data defaults
    pub data: BTreeMap<String, DataValue>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_command: "help".into(),
            script_name: "wlog".into(),
            interactive: None,
            repo_dir: None,
            data: BTreeMap::new(),
        }
    }
}

/// Get the XDG config directory for worklog.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "worklog").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("worklog.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".worklog.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(dir) = &self.repo_dir {
            self.repo_dir = Some(PathBuf::from(expand_env_vars(&dir.to_string_lossy())));
        }
    }

    /// Merge overlay config onto self: scalars win when specified, the data
    /// table merges key by key.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut data = self.data.clone();
        for (key, value) in &overlay.data {
            data.insert(key.clone(), value.clone());
        }
        Self {
            default_command: overlay
                .default_command
                .clone()
                .unwrap_or_else(|| self.default_command.clone()),
            script_name: overlay
                .script_name
                .clone()
                .unwrap_or_else(|| self.script_name.clone()),
            interactive: overlay.interactive.or(self.interactive),
            repo_dir: overlay.repo_dir.clone().or_else(|| self.repo_dir.clone()),
            data,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply WORKLOG_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("WORKLOG").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_command") {
            settings.default_command = val;
        }
        if let Ok(val) = config.get_string("script_name") {
            settings.script_name = val;
        }
        if let Ok(val) = config.get_bool("interactive") {
            settings.interactive = Some(val);
        }
        if let Ok(val) = config.get_string("repo_dir") {
            settings.repo_dir = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# worklog configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/worklog/worklog.toml
#   Local:  <project_dir>/.worklog.toml
#   Env:    WORKLOG_* environment variables (explicit overrides)

# Command run when no command is given
# default_command = "help"

# Program name used in usage lines
# script_name = "wlog"

# Prompt for AM/PM when a time is ambiguous (default: when stdin is a terminal)
# interactive = true

# Repository the version command inspects
# repo_dir = "~/src/worklog"

# Defaults every command sees unless it sets its own value
[data]
# issue = "ABC-1"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
