// Workspace configuration
// Loaded from a TOML file; every field has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{WorkspaceError, WorkspaceResult};

/// Default backend API base
fn default_api_base() -> String {
    String::from("http://localhost:3001/api")
}

/// Default base of the local save endpoint
fn default_save_base() -> String {
    String::from("http://localhost:3001")
}

/// Default directory for saved generated files
fn default_component_dir() -> String {
    String::from("components")
}

fn default_welcome_message() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// `{base}` of the assistant and file-storage endpoints
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// `{localBase}` of the save endpoint
    #[serde(default = "default_save_base")]
    pub save_base: String,
    /// Directory prefix of files written by the file generator
    #[serde(default = "default_component_dir")]
    pub component_dir: String,
    /// Seed the chat log with the assistant greeting
    #[serde(default = "default_welcome_message")]
    pub welcome_message: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            save_base: default_save_base(),
            component_dir: default_component_dir(),
            welcome_message: default_welcome_message(),
        }
    }
}

impl WorkspaceConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> WorkspaceResult<Self> {
        let config: WorkspaceConfig =
            toml::from_str(source).map_err(|e| WorkspaceError::Config(e.to_string()))?;
        config.normalized()
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> WorkspaceResult<Self> {
        if !path.exists() {
            log::info!(
                "[config] {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path)
            .map_err(|e| WorkspaceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Validate base URLs and drop trailing slashes
    fn normalized(mut self) -> WorkspaceResult<Self> {
        self.api_base = normalize_base("apiBase", &self.api_base)?;
        self.save_base = normalize_base("saveBase", &self.save_base)?;
        self.component_dir = self.component_dir.trim_matches('/').to_string();
        Ok(self)
    }

    /// Registry/save path of a generated file
    pub fn component_path(&self, file_name: &str) -> String {
        if self.component_dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.component_dir, file_name)
        }
    }
}

fn normalize_base(field: &str, value: &str) -> WorkspaceResult<String> {
    let url = Url::parse(value)
        .map_err(|e| WorkspaceError::Config(format!("{} `{}`: {}", field, value, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(WorkspaceError::Config(format!(
            "{} must be an http(s) URL, got `{}`",
            field, value
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}
