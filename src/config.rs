use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    build::{BuildSettings, DEFAULT_SCOPE},
    model::DEFAULT_CONTAINER,
    render::RenderMode,
    resolve::ArgumentPolicy,
};

pub const CONFIG_FILE_NAME: &str = ".dipgenrc.json";

/// Contents of `.dipgenrc.json`.
///
/// Relative paths resolve against the directory holding the file.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories (or glob patterns) under the source root to scan.
    /// Empty scans the whole source root.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Output file in combined mode, output directory (or a file inside it)
    /// in per-container mode.
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub mode: RenderMode,
    #[serde(default = "default_container")]
    pub default_container: String,
    #[serde(default = "default_scope")]
    pub default_scope: String,
    /// Fail the run when a runtime argument matches no constructor parameter.
    #[serde(default)]
    pub strict_arguments: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,
    #[serde(default = "default_ignore_generated_files")]
    pub ignore_generated_files: bool,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_output() -> String {
    "Dip.generated.swift".to_string()
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

fn default_scope() -> String {
    DEFAULT_SCOPE.to_string()
}

fn default_ignore_generated_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: Vec::new(),
            source_root: default_source_root(),
            output: default_output(),
            mode: RenderMode::default(),
            default_container: default_container(),
            default_scope: default_scope(),
            strict_arguments: false,
            templates_dir: None,
            ignore_generated_files: default_ignore_generated_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are
    /// invalid, or if the default scope is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.default_scope.trim().is_empty() {
            bail!("'defaultScope' must not be empty");
        }

        Ok(())
    }

    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            default_container: self.default_container.clone(),
            default_scope: self.default_scope.trim().to_string(),
            argument_policy: ArgumentPolicy::from_strict(self.strict_arguments),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Directory relative config paths are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
