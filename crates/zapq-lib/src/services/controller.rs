// Workspace Controller
//
// Receives UI intents, drives the gateway, and is the only writer of the
// open-file registry, editor buffer, chat log, and upload session.
// The state lock is never held across a remote call, so independent intents
// interleave freely; replies that target the editor buffer are sequenced.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::chat_log::{ChatLog, EMPTY_REPLY_MESSAGE, RECOVERY_MESSAGE};
use super::file_tree;
use super::gateway::{HttpGateway, RemoteGateway};
use super::pipeline::UploadPipeline;
use super::prompts;
use super::registry::OpenFileRegistry;
use super::router;
use super::sequencer::{RequestSequencer, SequenceTarget, Ticket};
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::models::{
    ChatMessage, ComponentRequest, Destination, FileGroup, GeneratedArtifact, OpenFile,
    ProjectArchive,
    ProjectGeneration, RouteContext, UploadSession, WorkspaceSnapshot,
};
use crate::utils::config::WorkspaceConfig;

pub const FILE_SAVED_STATUS: &str = "File generated and saved";
pub const FILE_FAILED_STATUS: &str = "Failed to generate file";

/// Mutable workspace state, guarded by the controller's lock
#[derive(Debug)]
struct WorkspaceState {
    registry: OpenFileRegistry,
    /// Editor buffer; may diverge from the active entry until committed
    buffer: String,
    chat: ChatLog,
    sequencer: RequestSequencer,
    file_tree: Vec<String>,
    file_tree_error: Option<String>,
    generation_status: Option<String>,
    tokens_used: u64,
}

impl WorkspaceState {
    fn new(config: &WorkspaceConfig) -> Self {
        Self {
            registry: OpenFileRegistry::new(),
            buffer: String::new(),
            chat: if config.welcome_message {
                ChatLog::with_welcome()
            } else {
                ChatLog::new()
            },
            sequencer: RequestSequencer::new(),
            file_tree: Vec::new(),
            file_tree_error: None,
            generation_status: None,
            tokens_used: 0,
        }
    }

    /// Deliver an artifact to every destination in one step
    fn dispatch(
        &mut self,
        artifact: &GeneratedArtifact,
        destinations: &[Destination],
        ticket: Ticket,
    ) -> Dispatched {
        let mut dispatched = Dispatched::default();
        // One claim per reply; every buffer-affecting destination shares it
        let mut owns_buffer: Option<bool> = None;

        for destination in destinations {
            match destination {
                Destination::ChatLog => {
                    let message = self.chat.append(ChatMessage::assistant(artifact.text.clone()));
                    dispatched.chat = Some(message.clone());
                }
                Destination::ActiveBuffer => {
                    let fresh = *owns_buffer.get_or_insert_with(|| self.sequencer.try_apply(ticket));
                    if fresh {
                        self.buffer = artifact.text.clone();
                        dispatched.buffer_updated = true;
                    }
                }
                Destination::File(path) => {
                    let fresh = *owns_buffer.get_or_insert_with(|| self.sequencer.try_apply(ticket));
                    if fresh {
                        let entry = self.registry.upsert_generated(path, artifact.text.clone());
                        self.buffer = entry.content.clone();
                        dispatched.buffer_updated = true;
                    } else {
                        // Newer work owns the selection; still record the file
                        self.registry.refresh(path, artifact.text.clone());
                    }
                    dispatched.file = Some(OpenFile::new(path.clone(), artifact.text.clone()));
                }
            }
        }

        dispatched
    }
}

/// What `open_file` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOutcome {
    pub file: OpenFile,
    /// False when a newer buffer write won and the selection was left alone
    pub activated: bool,
}

#[derive(Debug, Default)]
struct Dispatched {
    chat: Option<ChatMessage>,
    file: Option<OpenFile>,
    buffer_updated: bool,
}

/// Workspace Controller
pub struct WorkspaceController {
    gateway: Arc<dyn RemoteGateway>,
    config: WorkspaceConfig,
    state: RwLock<WorkspaceState>,
    pipeline: UploadPipeline,
}

impl WorkspaceController {
    /// Create a controller over any gateway
    pub fn new(gateway: Arc<dyn RemoteGateway>, config: WorkspaceConfig) -> Self {
        let state = WorkspaceState::new(&config);
        Self {
            gateway,
            config,
            state: RwLock::new(state),
            pipeline: UploadPipeline::new(),
        }
    }

    /// Create a controller talking HTTP to the configured backend
    pub fn with_http(config: WorkspaceConfig) -> Self {
        let gateway = Arc::new(HttpGateway::from_config(&config));
        Self::new(gateway, config)
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Cloned view for the rendering layer
    pub async fn snapshot(&self) -> WorkspaceSnapshot {
        let upload = self.pipeline.session().await;
        let state = self.state.read().await;
        WorkspaceSnapshot {
            open_files: state.registry.entries().to_vec(),
            active_path: state.registry.active_path().map(str::to_string),
            buffer: state.buffer.clone(),
            chat: state.chat.messages().to_vec(),
            upload,
            file_tree: state.file_tree.clone(),
            file_tree_error: state.file_tree_error.clone(),
            generation_status: state.generation_status.clone(),
            tokens_used: state.tokens_used,
        }
    }

    // =========================================================================
    // Files
    // =========================================================================

    /// Reload the backend file listing
    pub async fn refresh_file_tree(&self) -> WorkspaceResult<Vec<String>> {
        let result = self.gateway.list_files().await;
        let mut state = self.state.write().await;
        match result {
            Ok(files) => {
                state.file_tree = files.clone();
                state.file_tree_error = None;
                Ok(files)
            }
            Err(e) => {
                log::warn!("[workspace] File listing failed: {}", e);
                state.file_tree_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Filtered listing grouped by top-level folder, from the last refresh
    pub async fn search_file_tree(&self, term: &str) -> Vec<FileGroup> {
        let state = self.state.read().await;
        file_tree::group_by_folder(&file_tree::filter_files(&state.file_tree, term))
    }

    /// Fetch `path` and make it the active file. When newer editor activity
    /// already claimed the buffer the file is only recorded, not activated.
    pub async fn open_file(&self, path: &str) -> WorkspaceResult<OpenOutcome> {
        let ticket = self
            .state
            .write()
            .await
            .sequencer
            .issue(SequenceTarget::ActiveBuffer);

        let content = self.gateway.read_file(path).await.map_err(|e| {
            log::warn!("[workspace] Failed to open {}: {}", path, e);
            e
        })?;

        let mut state = self.state.write().await;
        if state.sequencer.try_apply(ticket) {
            let file = state.registry.open(path, content).clone();
            state.buffer = file.content.clone();
            Ok(OpenOutcome {
                file,
                activated: true,
            })
        } else {
            log::debug!("[workspace] {} loaded after newer editor activity", path);
            state.registry.refresh(path, content.clone());
            Ok(OpenOutcome {
                file: OpenFile::new(path, content),
                activated: false,
            })
        }
    }

    /// Switch to an already-open tab. Returns false for unknown paths.
    pub async fn select_file(&self, path: &str) -> bool {
        let mut state = self.state.write().await;
        let content = match state.registry.activate(path) {
            Some(entry) => entry.content.clone(),
            None => return false,
        };
        state.buffer = content;
        true
    }

    /// Close a tab. Closing the active tab shows the first remaining one,
    /// or empties the buffer when it was the last.
    pub async fn close_file(&self, path: &str) -> bool {
        let mut state = self.state.write().await;
        let outcome = match state.registry.close(path) {
            Some(outcome) => outcome,
            None => return false,
        };
        if outcome.was_active {
            state.buffer = outcome.new_active.map(|f| f.content).unwrap_or_default();
        }
        true
    }

    /// User edit: updates the buffer and the active entry
    pub async fn edit_buffer(&self, content: String) {
        let mut state = self.state.write().await;
        if let Some(path) = state.registry.active_path().map(str::to_string) {
            state.registry.set_active_content(&path, content.clone());
        }
        state.buffer = content;
    }

    /// Write the buffer (e.g. applied generated code) into the active entry
    pub async fn apply_buffer_to_active(&self) -> WorkspaceResult<OpenFile> {
        let mut state = self.state.write().await;
        let path = state
            .registry
            .active_path()
            .map(str::to_string)
            .ok_or(WorkspaceError::NoActiveFile)?;
        let content = state.buffer.clone();
        state.registry.set_active_content(&path, content.clone());
        Ok(OpenFile::new(path, content))
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Send a chat prompt. The reply always lands in the chat log and, when it
    /// looks like code, also replaces the editor buffer. On failure a recovery
    /// message is appended and the error returned.
    pub async fn send_chat(&self, prompt: &str) -> WorkspaceResult<ChatMessage> {
        if prompt.trim().is_empty() {
            return Err(WorkspaceError::EmptyPrompt);
        }

        let ticket = {
            let mut state = self.state.write().await;
            state.chat.append(ChatMessage::user(prompt));
            state.sequencer.issue(SequenceTarget::ActiveBuffer)
        };

        match self.gateway.generate(prompt).await {
            Ok(text) => {
                let text = if text.is_empty() {
                    EMPTY_REPLY_MESSAGE.to_string()
                } else {
                    text
                };
                let artifact = router::classify(&text);
                let destinations = router::route(&artifact, &RouteContext::Chat);
                log::debug!(
                    "[router] Chat reply ({} chars, code_like={}) -> {:?}",
                    text.len(),
                    artifact.code_like,
                    destinations
                );

                let mut state = self.state.write().await;
                let dispatched = state.dispatch(&artifact, &destinations, ticket);
                if artifact.code_like && !dispatched.buffer_updated {
                    log::info!("[workspace] Chat reply kept out of the editor: newer content applied");
                }
                Ok(dispatched
                    .chat
                    .unwrap_or_else(|| ChatMessage::assistant(artifact.text.clone())))
            }
            Err(e) => {
                log::warn!("[workspace] Chat generation failed: {}", e);
                let mut state = self.state.write().await;
                state.chat.append(ChatMessage::assistant(RECOVERY_MESSAGE));
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Generation workflows
    // =========================================================================

    /// Generate a named component file, open it, and save it to the backend.
    /// A failed save leaves the opened entry in place.
    pub async fn generate_file(&self, filename: &str) -> WorkspaceResult<OpenFile> {
        if filename.trim().is_empty() {
            return Err(WorkspaceError::EmptyFilename);
        }

        let file_name = prompts::component_file_name(filename);
        let path = self.config.component_path(&file_name);
        let prompt = prompts::file_generation_prompt(&file_name);

        let (buffer_ticket, status_ticket) = {
            let mut state = self.state.write().await;
            (
                state.sequencer.issue(SequenceTarget::ActiveBuffer),
                state.sequencer.issue(SequenceTarget::GenerationStatus),
            )
        };

        let code = match self.gateway.generate(&prompt).await {
            Ok(code) => code,
            Err(e) => {
                log::error!("[workspace] File generation failed for {}: {}", path, e);
                self.set_generation_status(status_ticket, FILE_FAILED_STATUS).await;
                return Err(e.into());
            }
        };

        let entry = self.route_generated(&code, &path, buffer_ticket).await;

        match self.gateway.save_file(&path, &code).await {
            Ok(()) => {
                log::info!("[workspace] Generated and saved {}", path);
                self.set_generation_status(status_ticket, FILE_SAVED_STATUS).await;
                Ok(entry)
            }
            Err(e) => {
                log::error!("[workspace] Saving {} failed: {}", path, e);
                self.set_generation_status(status_ticket, FILE_FAILED_STATUS).await;
                Err(e.into())
            }
        }
    }

    /// Generate a component from the detailed generator form
    pub async fn generate_component(&self, request: &ComponentRequest) -> WorkspaceResult<OpenFile> {
        if request.name.trim().is_empty() {
            return Err(WorkspaceError::EmptyFilename);
        }
        if request.description.trim().is_empty() {
            return Err(WorkspaceError::EmptyPrompt);
        }

        let prompt = prompts::component_prompt(request);
        let ticket = self
            .state
            .write()
            .await
            .sequencer
            .issue(SequenceTarget::ActiveBuffer);

        let code = self.gateway.generate(&prompt).await.map_err(|e| {
            log::error!("[workspace] Component generation failed: {}", e);
            e
        })?;

        Ok(self.route_generated(&code, &request.filename(), ticket).await)
    }

    /// Ask the assistant to rework the buffer and show the result
    pub async fn improve_buffer(&self) -> WorkspaceResult<String> {
        let (code, ticket) = {
            let mut state = self.state.write().await;
            if state.buffer.trim().is_empty() {
                return Err(WorkspaceError::NoActiveFile);
            }
            let code = state.buffer.clone();
            (code, state.sequencer.issue(SequenceTarget::ActiveBuffer))
        };

        let improved = self
            .gateway
            .generate(&prompts::improve_prompt(&code))
            .await
            .map_err(|e| {
                log::error!("[workspace] Improvement failed: {}", e);
                e
            })?;

        let mut state = self.state.write().await;
        if state.sequencer.try_apply(ticket) {
            state.buffer = improved.clone();
        }
        Ok(improved)
    }

    /// Generate a whole project, refresh the tree, and open its entry point
    pub async fn generate_project(&self, prompt: &str) -> WorkspaceResult<ProjectGeneration> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(WorkspaceError::EmptyPrompt);
        }

        let generation = self.gateway.generate_project(prompt).await.map_err(|e| {
            log::error!("[workspace] generate-project failed: {}", e);
            e
        })?;

        {
            let mut state = self.state.write().await;
            state.file_tree = generation.files.clone();
            state.file_tree_error = None;
            state.tokens_used += generation.tokens_used.unwrap_or(0);
        }
        log::info!(
            "[workspace] Project generated ({} files)",
            generation.files.len()
        );

        if let Some(entry) = generation.entry_point() {
            if let Err(e) = self.open_file(entry).await {
                log::warn!("[workspace] Could not open generated {}: {}", entry, e);
            }
        }

        Ok(generation)
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Upload and analyze a project archive
    pub async fn upload_project(&self, archive: ProjectArchive) -> WorkspaceResult<UploadSession> {
        Ok(self.pipeline.submit(self.gateway.as_ref(), archive).await?)
    }

    /// "Try again" / "Upload another"
    pub async fn reset_upload(&self) -> bool {
        self.pipeline.reset().await
    }

    pub async fn upload_session(&self) -> UploadSession {
        self.pipeline.session().await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Forced route of generated code into the registry under `path`
    async fn route_generated(&self, code: &str, path: &str, ticket: Ticket) -> OpenFile {
        let artifact = router::classify(code);
        let context = RouteContext::FileGeneration {
            filename: path.to_string(),
        };
        let destinations = router::route(&artifact, &context);

        let mut state = self.state.write().await;
        state
            .dispatch(&artifact, &destinations, ticket)
            .file
            .unwrap_or_else(|| OpenFile::new(path, code))
    }

    async fn set_generation_status(&self, ticket: Ticket, status: &str) {
        let mut state = self.state.write().await;
        if state.sequencer.try_apply(ticket) {
            state.generation_status = Some(status.to_string());
        }
    }
}
