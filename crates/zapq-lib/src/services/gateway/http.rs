// HTTP Gateway Implementation
//
// Talks to the zapq backend:
//   POST {base}/claude            {prompt}        -> {output}
//   GET  {base}/files                             -> {files}
//   GET  {base}/file?path=<enc>                   -> raw text
//   POST {base}/upload-project    multipart       -> {success, path}
//   POST {base}/claude-project    {projectPath}   -> {success, output}
//   POST {base}/generate-project  {userPrompt}    -> {success, files, tokensUsed}
//   POST {saveBase}/save          {path, content} -> 2xx
// No timeouts and no retries are applied here.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{GatewayError, GatewayResult, RemoteGateway};
use crate::models::{ProjectAnalysis, ProjectGeneration, StoredProject};
use crate::utils::config::WorkspaceConfig;

/// HTTP Gateway
pub struct HttpGateway {
    client: Client,
    api_base: String,
    save_base: String,
}

impl HttpGateway {
    pub fn new(api_base: impl Into<String>, save_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            save_base: save_base.into(),
        }
    }

    pub fn from_config(config: &WorkspaceConfig) -> Self {
        Self::new(config.api_base.clone(), config.save_base.clone())
    }

    fn api_url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}{}", base, path)
    }

    fn save_url(&self, path: &str) -> String {
        let base = self.save_base.trim_end_matches('/');
        format!("{}{}", base, path)
    }
}

// Backend API types
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilesResponse {
    #[serde(default)]
    files: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    path: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    project_path: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    path: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateProjectRequest<'a> {
    user_prompt: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateProjectResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    files: Vec<String>,
    #[serde(default)]
    tokens_used: Option<u64>,
}

/// Read the whole body; a failure here means the response never fully arrived
async fn read_body(response: Response) -> GatewayResult<(StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GatewayError::Transport(e.to_string()))?;
    Ok((status, body))
}

/// Parse a JSON body. A body that is not the expected shape is a protocol
/// error whatever the status; the status and body are kept for diagnostics.
fn parse_json<T: DeserializeOwned>(status: StatusCode, body: &str) -> GatewayResult<T> {
    serde_json::from_str::<T>(body).map_err(|e| {
        log::error!("[gateway] Unexpected response ({}, not JSON): {}", status, body);
        if status.is_success() {
            GatewayError::Protocol(e.to_string())
        } else {
            GatewayError::Protocol(format!("{} ({}): {}", e, status, body.trim()))
        }
    })
}

fn server_error(status: StatusCode, body: &str) -> GatewayError {
    if body.trim().is_empty() {
        GatewayError::Remote(format!("Server error ({})", status))
    } else {
        GatewayError::Remote(format!("Server error ({}): {}", status, body.trim()))
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn generate(&self, prompt: &str) -> GatewayResult<String> {
        let url = self.api_url("/claude");
        log::debug!("[gateway] POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        let parsed: GenerateResponse = parse_json(status, &body)?;

        if !status.is_success() {
            return Err(match parsed.error {
                Some(message) => GatewayError::Remote(message),
                None => server_error(status, ""),
            });
        }

        Ok(parsed.output.unwrap_or_default())
    }

    async fn list_files(&self) -> GatewayResult<Vec<String>> {
        let url = self.api_url("/files");
        log::debug!("[gateway] GET {}", url);

        let response = self.client.get(&url).send().await?;
        let (status, body) = read_body(response).await?;
        let parsed: FilesResponse = parse_json(status, &body)?;

        if !status.is_success() {
            return Err(GatewayError::Remote(
                parsed
                    .error
                    .unwrap_or_else(|| "Failed to fetch files".to_string()),
            ));
        }

        Ok(parsed.files)
    }

    async fn read_file(&self, path: &str) -> GatewayResult<String> {
        let url = self.api_url(&format!("/file?path={}", urlencoding::encode(path)));
        log::debug!("[gateway] GET {}", url);

        let response = self.client.get(&url).send().await?;
        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        Ok(body)
    }

    async fn upload_archive(&self, bytes: Vec<u8>, name: &str) -> GatewayResult<StoredProject> {
        let url = self.api_url("/upload-project");
        log::debug!("[gateway] POST {} ({} bytes)", url, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(format!("{}.zip", name))
            .mime_str("application/zip")?;
        let form = Form::new().part("file", part).text("name", name.to_string());

        let response = self.client.post(&url).multipart(form).send().await?;
        let (status, body) = read_body(response).await?;
        let parsed: UploadResponse = parse_json(status, &body)?;

        if !parsed.success {
            return Err(GatewayError::Remote("Upload failed".to_string()));
        }

        let stored_path = parsed.path.ok_or_else(|| {
            GatewayError::Protocol("upload response is missing `path`".to_string())
        })?;

        Ok(StoredProject { stored_path })
    }

    async fn analyze_project(&self, stored_path: &str) -> GatewayResult<ProjectAnalysis> {
        let url = self.api_url("/claude-project");
        log::debug!("[gateway] POST {} ({})", url, stored_path);

        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest {
                project_path: stored_path,
            })
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        let parsed: AnalyzeResponse = parse_json(status, &body)?;

        if !parsed.success {
            return Err(GatewayError::Remote("AI analysis failed".to_string()));
        }

        Ok(ProjectAnalysis {
            text: parsed.output.unwrap_or_default(),
        })
    }

    async fn save_file(&self, path: &str, content: &str) -> GatewayResult<()> {
        let url = self.save_url("/save");
        log::debug!("[gateway] POST {} ({})", url, path);

        let response = self
            .client
            .post(&url)
            .json(&SaveRequest { path, content })
            .send()
            .await?;
        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            log::error!("[gateway] Save failed ({}): {}", status, body);
            return Err(GatewayError::Remote("Save failed".to_string()));
        }

        Ok(())
    }

    async fn generate_project(&self, prompt: &str) -> GatewayResult<ProjectGeneration> {
        let url = self.api_url("/generate-project");
        log::debug!("[gateway] POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateProjectRequest {
                user_prompt: prompt,
            })
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        let parsed: GenerateProjectResponse = parse_json(status, &body)?;

        if !parsed.success {
            return Err(GatewayError::Remote("Project generation failed".to_string()));
        }

        Ok(ProjectGeneration {
            files: parsed.files,
            tokens_used: parsed.tokens_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gateway::GatewayErrorCode;
    use axum::{
        extract::{Multipart, Query},
        http::StatusCode as AxumStatus,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn claude(Json(body): Json<Value>) -> axum::response::Response {
        match body["prompt"].as_str().unwrap_or_default() {
            "garbage" => "<html>proxy error</html>".into_response(),
            "silent" => Json(json!({})).into_response(),
            "wrong-shape" => Json(json!({ "output": 42 })).into_response(),
            "bad-gateway" => {
                (AxumStatus::BAD_GATEWAY, "<html>502 Bad Gateway</html>").into_response()
            }
            "overloaded" => (
                AxumStatus::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "assistant overloaded" })),
            )
                .into_response(),
            prompt => Json(json!({ "output": format!("echo: {}", prompt) })).into_response(),
        }
    }

    async fn files() -> Json<Value> {
        Json(json!({ "files": ["src/App.tsx", "src/main.tsx"] }))
    }

    async fn file(Query(params): Query<HashMap<String, String>>) -> axum::response::Response {
        match params.get("path").map(String::as_str) {
            Some("missing.tsx") => (AxumStatus::NOT_FOUND, "not found").into_response(),
            Some(path) => format!("content of {}", path).into_response(),
            None => AxumStatus::BAD_REQUEST.into_response(),
        }
    }

    async fn upload(mut multipart: Multipart) -> Json<Value> {
        let mut name = String::new();
        let mut size = 0usize;
        while let Ok(Some(field)) = multipart.next_field().await {
            let field_name = field.name().map(str::to_string);
            match field_name.as_deref() {
                Some("name") => name = field.text().await.unwrap_or_default(),
                Some("file") => size = field.bytes().await.map(|b| b.len()).unwrap_or(0),
                _ => {}
            }
        }
        if name == "broken" || size == 0 {
            Json(json!({ "success": false }))
        } else {
            Json(json!({ "success": true, "path": format!("uploads/{}", name) }))
        }
    }

    async fn analyze(Json(body): Json<Value>) -> Json<Value> {
        let path = body["projectPath"].as_str().unwrap_or_default();
        if path.starts_with("uploads/") {
            Json(json!({ "success": true, "output": format!("analysis of {}", path) }))
        } else {
            Json(json!({ "success": false }))
        }
    }

    async fn save(Json(body): Json<Value>) -> AxumStatus {
        if body["path"].as_str().unwrap_or_default().contains("readonly") {
            AxumStatus::INTERNAL_SERVER_ERROR
        } else {
            AxumStatus::OK
        }
    }

    async fn generate_project(Json(body): Json<Value>) -> Json<Value> {
        if body["userPrompt"] == "fail" {
            Json(json!({ "success": false }))
        } else {
            Json(json!({
                "success": true,
                "files": ["src/App.tsx", "src/index.css"],
                "tokensUsed": 42
            }))
        }
    }

    async fn spawn_backend() -> HttpGateway {
        let app = Router::new()
            .route("/api/claude", post(claude))
            .route("/api/files", get(files))
            .route("/api/file", get(file))
            .route("/api/upload-project", post(upload))
            .route("/api/claude-project", post(analyze))
            .route("/api/generate-project", post(generate_project))
            .route("/save", post(save));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        HttpGateway::new(format!("http://{}/api/", addr), format!("http://{}", addr))
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let gateway = HttpGateway::new("http://localhost:3001/api/", "http://localhost:3001/");
        assert_eq!(gateway.api_url("/claude"), "http://localhost:3001/api/claude");
        assert_eq!(gateway.save_url("/save"), "http://localhost:3001/save");
    }

    #[tokio::test]
    async fn test_generate_returns_output() {
        let gateway = spawn_backend().await;
        let text = gateway.generate("hello").await.unwrap();
        assert_eq!(text, "echo: hello");
    }

    #[tokio::test]
    async fn test_generate_non_json_is_protocol_error() {
        let gateway = spawn_backend().await;
        let err = gateway.generate("garbage").await.unwrap_err();
        assert_eq!(err.code(), GatewayErrorCode::Protocol);
    }

    #[tokio::test]
    async fn test_generate_error_status_with_html_is_protocol_error() {
        let gateway = spawn_backend().await;
        let err = gateway.generate("bad-gateway").await.unwrap_err();
        assert_eq!(err.code(), GatewayErrorCode::Protocol);
        assert!(err.to_string().contains("502 Bad Gateway"));
    }

    #[tokio::test]
    async fn test_generate_wrong_shape_is_protocol_error() {
        let gateway = spawn_backend().await;
        let err = gateway.generate("wrong-shape").await.unwrap_err();
        assert_eq!(err.code(), GatewayErrorCode::Protocol);
    }

    #[tokio::test]
    async fn test_generate_missing_output_is_empty_text() {
        let gateway = spawn_backend().await;
        assert_eq!(gateway.generate("silent").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_generate_error_status_is_remote_error() {
        let gateway = spawn_backend().await;
        let err = gateway.generate("overloaded").await.unwrap_err();
        assert_eq!(err, GatewayError::Remote("assistant overloaded".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = HttpGateway::new(format!("http://{}", addr), format!("http://{}", addr));
        let err = gateway.generate("hello").await.unwrap_err();
        assert_eq!(err.code(), GatewayErrorCode::Transport);
    }

    #[tokio::test]
    async fn test_list_files() {
        let gateway = spawn_backend().await;
        let files = gateway.list_files().await.unwrap();
        assert_eq!(files, vec!["src/App.tsx", "src/main.tsx"]);
    }

    #[tokio::test]
    async fn test_read_file_encodes_path() {
        let gateway = spawn_backend().await;
        let text = gateway.read_file("src/my file&x.tsx").await.unwrap();
        assert_eq!(text, "content of src/my file&x.tsx");
    }

    #[tokio::test]
    async fn test_read_file_not_found_is_remote_error() {
        let gateway = spawn_backend().await;
        let err = gateway.read_file("missing.tsx").await.unwrap_err();
        assert_eq!(err.code(), GatewayErrorCode::Remote);
    }

    #[tokio::test]
    async fn test_upload_and_analyze() {
        let gateway = spawn_backend().await;
        let stored = gateway.upload_archive(vec![0x50, 0x4b, 3, 4], "shop").await.unwrap();
        assert_eq!(stored.stored_path, "uploads/shop");

        let analysis = gateway.analyze_project(&stored.stored_path).await.unwrap();
        assert_eq!(analysis.text, "analysis of uploads/shop");
    }

    #[tokio::test]
    async fn test_upload_success_false_is_remote_error() {
        let gateway = spawn_backend().await;
        let err = gateway.upload_archive(vec![1], "broken").await.unwrap_err();
        assert_eq!(err, GatewayError::Remote("Upload failed".to_string()));
    }

    #[tokio::test]
    async fn test_analyze_success_false_is_remote_error() {
        let gateway = spawn_backend().await;
        let err = gateway.analyze_project("elsewhere/shop").await.unwrap_err();
        assert_eq!(err, GatewayError::Remote("AI analysis failed".to_string()));
    }

    #[tokio::test]
    async fn test_save_file() {
        let gateway = spawn_backend().await;
        assert!(gateway.save_file("components/Card.tsx", "x").await.is_ok());

        let err = gateway.save_file("readonly/Card.tsx", "x").await.unwrap_err();
        assert_eq!(err, GatewayError::Remote("Save failed".to_string()));
    }

    #[tokio::test]
    async fn test_generate_project() {
        let gateway = spawn_backend().await;
        let generation = gateway.generate_project("a shop").await.unwrap();
        assert_eq!(generation.files.len(), 2);
        assert_eq!(generation.tokens_used, Some(42));

        let err = gateway.generate_project("fail").await.unwrap_err();
        assert_eq!(err.code(), GatewayErrorCode::Remote);
    }
}
