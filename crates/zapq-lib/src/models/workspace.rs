// Workspace data models
// Open files, view-state snapshot, and file-tree payloads

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;
use super::upload::UploadSession;

/// A file currently open in the workspace (one editor tab)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFile {
    /// Unique key within the registry
    pub path: String,
    /// Last loaded or generated content
    pub content: String,
}

impl OpenFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Last path segment, used as the tab label
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Read-only view of the workspace handed to the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    /// Open files in tab order
    pub open_files: Vec<OpenFile>,
    /// Currently active path, if any
    pub active_path: Option<String>,
    /// Editor buffer content
    pub buffer: String,
    /// Chat transcript in insertion order
    pub chat: Vec<ChatMessage>,
    /// Current upload/analyze session
    pub upload: UploadSession,
    /// Paths reported by the file-storage backend
    pub file_tree: Vec<String>,
    /// Last file-tree refresh failure
    pub file_tree_error: Option<String>,
    /// Status line of the file generator
    pub generation_status: Option<String>,
    /// Running total of tokens reported by project generation
    pub tokens_used: u64,
}

/// Paths of the file tree sharing one top-level folder.
/// `folder` is `None` for files at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileGroup {
    pub folder: Option<String>,
    pub files: Vec<String>,
}

/// Result of a whole-project generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGeneration {
    /// Paths of the generated files
    pub files: Vec<String>,
    /// Tokens consumed, when the backend reports it
    pub tokens_used: Option<u64>,
}

impl ProjectGeneration {
    /// The file to open after generation: the first App.tsx or Home.tsx
    pub fn entry_point(&self) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.contains("App.tsx") || f.contains("Home.tsx"))
            .map(String::as_str)
    }
}
