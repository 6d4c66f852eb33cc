// Upload/Analyze Pipeline
//
// One session, two sequential remote stages: store the archive, then analyze
// the stored project. The analysis call is never issued unless the upload
// reported success. A run that is still uploading rejects new runs.

use tokio::sync::RwLock;

use super::gateway::RemoteGateway;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{ProjectArchive, UploadSession, UploadStatus};

pub const UPLOADING_MESSAGE: &str = "Uploading project...";
pub const ANALYZING_MESSAGE: &str = "Analyzing project with AI...";
pub const SUCCESS_MESSAGE: &str = "Project analyzed successfully!";
pub const NOT_ZIP_MESSAGE: &str = "Please upload a .zip file";

pub struct UploadPipeline {
    session: RwLock<UploadSession>,
}

impl Default for UploadPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadPipeline {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(UploadSession::default()),
        }
    }

    /// Copy of the current session
    pub async fn session(&self) -> UploadSession {
        self.session.read().await.clone()
    }

    pub async fn is_busy(&self) -> bool {
        self.session.read().await.status == UploadStatus::Uploading
    }

    /// Return a terminal session to idle ("try again" / "upload another").
    /// A running upload cannot be reset; returns false in that case.
    pub async fn reset(&self) -> bool {
        let mut session = self.session.write().await;
        match session.status {
            UploadStatus::Idle => true,
            UploadStatus::Uploading => false,
            UploadStatus::Success | UploadStatus::Error => {
                move_to(&mut session, UploadStatus::Idle, String::new(), None)
            }
        }
    }

    /// Run both stages for `archive` and return the final session.
    /// On failure the session is left in `Error` and the cause is returned.
    pub async fn submit(
        &self,
        gateway: &dyn RemoteGateway,
        archive: ProjectArchive,
    ) -> PipelineResult<UploadSession> {
        self.begin(&archive).await?;

        let name = archive.project_name().to_string();
        log::info!("[upload] Uploading {} ({} bytes)", archive.file_name, archive.bytes.len());

        let stored = match gateway.upload_archive(archive.bytes, &name).await {
            Ok(stored) => stored,
            Err(e) => return Err(self.fail(e.into()).await),
        };

        self.set_message(ANALYZING_MESSAGE).await;
        log::info!("[upload] Analyzing {}", stored.stored_path);

        let analysis = match gateway.analyze_project(&stored.stored_path).await {
            Ok(analysis) => analysis,
            Err(e) => return Err(self.fail(e.into()).await),
        };

        let mut session = self.session.write().await;
        move_to(
            &mut session,
            UploadStatus::Success,
            SUCCESS_MESSAGE.to_string(),
            Some(analysis.text),
        );
        log::info!("[upload] {} analyzed", name);
        Ok(session.clone())
    }

    /// Claim the session for a new run
    async fn begin(&self, archive: &ProjectArchive) -> PipelineResult<()> {
        let mut session = self.session.write().await;

        if session.status == UploadStatus::Uploading {
            log::warn!("[upload] Rejected {}: upload already running", archive.file_name);
            return Err(PipelineError::Busy);
        }

        // A displayed result is discarded by the next upload
        if session.status.is_terminal() {
            move_to(&mut session, UploadStatus::Idle, String::new(), None);
        }

        if !archive.is_zip() {
            move_to(&mut session, UploadStatus::Error, NOT_ZIP_MESSAGE.to_string(), None);
            return Err(PipelineError::NotAnArchive(archive.file_name.clone()));
        }

        move_to(
            &mut session,
            UploadStatus::Uploading,
            UPLOADING_MESSAGE.to_string(),
            None,
        );
        Ok(())
    }

    async fn set_message(&self, message: &str) {
        let mut session = self.session.write().await;
        session.message = message.to_string();
    }

    async fn fail(&self, err: PipelineError) -> PipelineError {
        log::warn!("[upload] Failed: {}", err);
        let mut session = self.session.write().await;
        move_to(&mut session, UploadStatus::Error, err.to_string(), None);
        err
    }
}

/// Apply one edge of the state machine; invalid edges are refused
fn move_to(
    session: &mut UploadSession,
    next: UploadStatus,
    message: String,
    result_text: Option<String>,
) -> bool {
    if !session.status.can_transition_to(next) {
        log::error!("[upload] Invalid transition {} -> {}", session.status, next);
        return false;
    }
    session.status = next;
    session.message = message;
    session.result_text = result_text;
    true
}
