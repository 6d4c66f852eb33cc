// Upload/analyze data models

use serde::{Deserialize, Serialize};

/// Status of the upload/analyze session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

impl UploadStatus {
    /// Success and Error require a reset before the next run
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Success | UploadStatus::Error)
    }

    /// Allowed edges of the session state machine.
    /// Idle -> Error covers archives rejected before any remote call.
    pub fn can_transition_to(&self, next: UploadStatus) -> bool {
        use UploadStatus::*;
        matches!(
            (self, next),
            (Idle, Uploading)
                | (Idle, Error)
                | (Uploading, Success)
                | (Uploading, Error)
                | (Success, Idle)
                | (Error, Idle)
        )
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Idle => write!(f, "idle"),
            UploadStatus::Uploading => write!(f, "uploading"),
            UploadStatus::Success => write!(f, "success"),
            UploadStatus::Error => write!(f, "error"),
        }
    }
}

/// The single upload/analyze session shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSession {
    pub status: UploadStatus,
    /// Progress or failure message
    pub message: String,
    /// Analysis text, only set on success
    pub result_text: Option<String>,
}

/// An archive selected by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectArchive {
    /// Original file name, e.g. `shop.zip`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ProjectArchive {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn is_zip(&self) -> bool {
        self.file_name.ends_with(".zip")
    }

    /// Project name sent alongside the archive (file name without `.zip`)
    pub fn project_name(&self) -> &str {
        self.file_name
            .strip_suffix(".zip")
            .unwrap_or(&self.file_name)
    }
}

/// Outcome of storing an archive on the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProject {
    /// Backend path of the extracted project
    pub stored_path: String,
}

/// Outcome of the AI project analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(UploadStatus::Idle.can_transition_to(UploadStatus::Uploading));
        assert!(UploadStatus::Uploading.can_transition_to(UploadStatus::Success));
        assert!(UploadStatus::Uploading.can_transition_to(UploadStatus::Error));
        assert!(UploadStatus::Success.can_transition_to(UploadStatus::Idle));
        assert!(UploadStatus::Error.can_transition_to(UploadStatus::Idle));

        assert!(!UploadStatus::Uploading.can_transition_to(UploadStatus::Uploading));
        assert!(!UploadStatus::Success.can_transition_to(UploadStatus::Uploading));
        assert!(!UploadStatus::Idle.can_transition_to(UploadStatus::Success));
    }

    #[test]
    fn test_terminal_states() {
        assert!(UploadStatus::Success.is_terminal());
        assert!(UploadStatus::Error.is_terminal());
        assert!(!UploadStatus::Idle.is_terminal());
        assert!(!UploadStatus::Uploading.is_terminal());
    }

    #[test]
    fn test_project_name_strips_zip() {
        let archive = ProjectArchive::new("shop.zip", vec![1, 2, 3]);
        assert!(archive.is_zip());
        assert_eq!(archive.project_name(), "shop");

        let tarball = ProjectArchive::new("shop.tar.gz", Vec::new());
        assert!(!tarball.is_zip());
        assert_eq!(tarball.project_name(), "shop.tar.gz");
    }
}
