// Remote Service Gateway Module
//
// Issues requests to the assistant and to the file-storage backend.
// Owns no state and performs no retries; callers decide what to surface.

pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod http;

use async_trait::async_trait;

pub use error::{GatewayError, GatewayErrorCode, GatewayResult};
pub use http::HttpGateway;

use crate::models::{ProjectAnalysis, ProjectGeneration, StoredProject};

/// Trait for the remote boundary.
/// `HttpGateway` talks to the real backend; tests script their own.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Ask the assistant for a completion.
    /// Empty text means the assistant said nothing; unparseable bodies are `Protocol` errors.
    async fn generate(&self, prompt: &str) -> GatewayResult<String>;

    /// List the paths known to the file-storage backend
    async fn list_files(&self) -> GatewayResult<Vec<String>>;

    /// Fetch the raw text of one file
    async fn read_file(&self, path: &str) -> GatewayResult<String>;

    /// Store a project archive
    async fn upload_archive(&self, bytes: Vec<u8>, name: &str) -> GatewayResult<StoredProject>;

    /// Run the AI analysis over a stored project
    async fn analyze_project(&self, stored_path: &str) -> GatewayResult<ProjectAnalysis>;

    /// Persist generated content (file-generation workflow only)
    async fn save_file(&self, path: &str, content: &str) -> GatewayResult<()>;

    /// Generate a whole project from one prompt
    async fn generate_project(&self, prompt: &str) -> GatewayResult<ProjectGeneration>;
}
