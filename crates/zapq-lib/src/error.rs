// Workspace Error Types

use thiserror::Error;

use crate::services::gateway::GatewayError;

/// Upload/analyze pipeline error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A run is already uploading
    #[error("An upload is already in progress")]
    Busy,

    /// The selected file is not a .zip archive
    #[error("Not a .zip archive: {0}")]
    NotAnArchive(String),

    /// A stage failed remotely
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Workspace controller error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Nothing to send
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// File generator called without a name
    #[error("Filename is empty")]
    EmptyFilename,

    /// An operation needed editor content and there was none
    #[error("No active file content")]
    NoActiveFile,

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Workspace error codes for the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceErrorCode {
    Transport,
    Protocol,
    Remote,
    UploadBusy,
    NotAnArchive,
    EmptyPrompt,
    EmptyFilename,
    NoActiveFile,
    InvalidConfig,
}

impl WorkspaceErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceErrorCode::Transport => "GATEWAY_TRANSPORT",
            WorkspaceErrorCode::Protocol => "GATEWAY_PROTOCOL",
            WorkspaceErrorCode::Remote => "GATEWAY_REMOTE",
            WorkspaceErrorCode::UploadBusy => "UPLOAD_BUSY",
            WorkspaceErrorCode::NotAnArchive => "UPLOAD_NOT_ZIP",
            WorkspaceErrorCode::EmptyPrompt => "EMPTY_PROMPT",
            WorkspaceErrorCode::EmptyFilename => "EMPTY_FILENAME",
            WorkspaceErrorCode::NoActiveFile => "NO_ACTIVE_FILE",
            WorkspaceErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }
}

fn gateway_code(err: &GatewayError) -> WorkspaceErrorCode {
    match err {
        GatewayError::Transport(_) => WorkspaceErrorCode::Transport,
        GatewayError::Protocol(_) => WorkspaceErrorCode::Protocol,
        GatewayError::Remote(_) => WorkspaceErrorCode::Remote,
    }
}

impl WorkspaceError {
    pub fn code(&self) -> WorkspaceErrorCode {
        match self {
            WorkspaceError::Gateway(err) => gateway_code(err),
            WorkspaceError::Pipeline(PipelineError::Busy) => WorkspaceErrorCode::UploadBusy,
            WorkspaceError::Pipeline(PipelineError::NotAnArchive(_)) => {
                WorkspaceErrorCode::NotAnArchive
            }
            WorkspaceError::Pipeline(PipelineError::Gateway(err)) => gateway_code(err),
            WorkspaceError::EmptyPrompt => WorkspaceErrorCode::EmptyPrompt,
            WorkspaceError::EmptyFilename => WorkspaceErrorCode::EmptyFilename,
            WorkspaceError::NoActiveFile => WorkspaceErrorCode::NoActiveFile,
            WorkspaceError::Config(_) => WorkspaceErrorCode::InvalidConfig,
        }
    }
}

impl From<WorkspaceError> for String {
    fn from(err: WorkspaceError) -> Self {
        err.to_string()
    }
}
