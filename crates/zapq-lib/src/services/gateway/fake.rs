// Scripted gateway for service tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{GatewayError, GatewayResult, RemoteGateway};
use crate::models::{ProjectAnalysis, ProjectGeneration, StoredProject};

pub(crate) struct FakeGateway {
    replies: Mutex<HashMap<String, GatewayResult<String>>>,
    default_reply: Mutex<GatewayResult<String>>,
    files: Mutex<HashMap<String, String>>,
    listing: Mutex<GatewayResult<Vec<String>>>,
    upload: Mutex<GatewayResult<StoredProject>>,
    analysis: Mutex<GatewayResult<ProjectAnalysis>>,
    save: Mutex<GatewayResult<()>>,
    project: Mutex<GatewayResult<ProjectGeneration>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    prompts: Mutex<Vec<String>>,
    saved: Mutex<Vec<(String, String)>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            default_reply: Mutex::new(Ok(String::new())),
            files: Mutex::new(HashMap::new()),
            listing: Mutex::new(Ok(Vec::new())),
            upload: Mutex::new(Ok(StoredProject {
                stored_path: "uploads/project".to_string(),
            })),
            analysis: Mutex::new(Ok(ProjectAnalysis {
                text: "analysis".to_string(),
            })),
            save: Mutex::new(Ok(())),
            project: Mutex::new(Ok(ProjectGeneration {
                files: Vec::new(),
                tokens_used: None,
            })),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            prompts: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(self, prompt: &str, result: GatewayResult<String>) -> Self {
        self.replies.lock().unwrap().insert(prompt.to_string(), result);
        self
    }

    pub fn default_reply(self, result: GatewayResult<String>) -> Self {
        *self.default_reply.lock().unwrap() = result;
        self
    }

    pub fn file(self, path: &str, content: &str) -> Self {
        self.set_file(path, content);
        self
    }

    pub fn set_file(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn listing(self, result: GatewayResult<Vec<String>>) -> Self {
        *self.listing.lock().unwrap() = result;
        self
    }

    pub fn upload(self, result: GatewayResult<StoredProject>) -> Self {
        *self.upload.lock().unwrap() = result;
        self
    }

    pub fn analysis(self, result: GatewayResult<ProjectAnalysis>) -> Self {
        *self.analysis.lock().unwrap() = result;
        self
    }

    pub fn save(self, result: GatewayResult<()>) -> Self {
        *self.save.lock().unwrap() = result;
        self
    }

    pub fn project(self, result: GatewayResult<ProjectGeneration>) -> Self {
        *self.project.lock().unwrap() = result;
        self
    }

    /// Block the call identified by `key` until the returned sender fires.
    /// Keys: `generate:<prompt>`, `read:<path>`, `upload`.
    pub fn hold(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        tx
    }

    pub fn calls(&self, method: &'static str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<(String, String)> {
        self.saved.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().unwrap().entry(method).or_insert(0) += 1;
    }

    async fn wait_gate(&self, key: &str) {
        let gate = self.gates.lock().unwrap().remove(key);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
    }
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        self.record("generate");
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.wait_gate(&format!("generate:{}", prompt)).await;
        let scripted = self.replies.lock().unwrap().get(prompt).cloned();
        scripted.unwrap_or_else(|| self.default_reply.lock().unwrap().clone())
    }

    async fn list_files(&self) -> GatewayResult<Vec<String>> {
        self.record("list_files");
        self.listing.lock().unwrap().clone()
    }

    async fn read_file(&self, path: &str) -> GatewayResult<String> {
        self.record("read_file");
        self.wait_gate(&format!("read:{}", path)).await;
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| GatewayError::Remote(format!("Server error (404 Not Found): {}", path)))
    }

    async fn upload_archive(&self, _bytes: Vec<u8>, _name: &str) -> GatewayResult<StoredProject> {
        self.record("upload_archive");
        self.wait_gate("upload").await;
        self.upload.lock().unwrap().clone()
    }

    async fn analyze_project(&self, _stored_path: &str) -> GatewayResult<ProjectAnalysis> {
        self.record("analyze_project");
        self.analysis.lock().unwrap().clone()
    }

    async fn save_file(&self, path: &str, content: &str) -> GatewayResult<()> {
        self.record("save_file");
        self.saved
            .lock()
            .unwrap()
            .push((path.to_string(), content.to_string()));
        self.save.lock().unwrap().clone()
    }

    async fn generate_project(&self, _prompt: &str) -> GatewayResult<ProjectGeneration> {
        self.record("generate_project");
        self.project.lock().unwrap().clone()
    }
}
