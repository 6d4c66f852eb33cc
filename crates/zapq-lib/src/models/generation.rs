// Generation data models
// Artifacts produced by the assistant and the requests that produce them

use serde::{Deserialize, Serialize};

/// Raw assistant output plus its classification. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub text: String,
    /// Heuristic verdict, see `services::router::classify`
    pub code_like: bool,
}

/// Where a generation request originated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteContext {
    /// Free-form chat exchange
    Chat,
    /// A file-generation component asking for a specific file
    FileGeneration { filename: String },
}

/// A consumer of generated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Append to the chat transcript
    ChatLog,
    /// Replace the editor buffer
    ActiveBuffer,
    /// Upsert into the registry under this path and make it active
    File(String),
}

/// A presentational slice of a message split on code fences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Prose { text: String },
    Code { language: Option<String>, code: String },
}

/// Target framework of the component generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    #[default]
    React,
    Vue,
    Svelte,
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Framework::React => write!(f, "react"),
            Framework::Vue => write!(f, "vue"),
            Framework::Svelte => write!(f, "svelte"),
        }
    }
}

/// Styling approach of the component generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Styling {
    #[default]
    Tailwind,
    StyledComponents,
    CssModules,
    Emotion,
}

impl std::fmt::Display for Styling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Styling::Tailwind => write!(f, "tailwind"),
            Styling::StyledComponents => write!(f, "styled-components"),
            Styling::CssModules => write!(f, "css-modules"),
            Styling::Emotion => write!(f, "emotion"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Simple => write!(f, "simple"),
            Complexity::Medium => write!(f, "medium"),
            Complexity::Complex => write!(f, "complex"),
        }
    }
}

/// Input of the component generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub framework: Framework,
    #[serde(default)]
    pub styling: Styling,
    #[serde(default)]
    pub complexity: Complexity,
}

impl ComponentRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            framework: Framework::default(),
            styling: Styling::default(),
            complexity: Complexity::default(),
        }
    }

    /// Registry path the generated component is routed to
    pub fn filename(&self) -> String {
        format!("{}.tsx", self.name.trim())
    }
}

/// A ready-made component name/description pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPreset {
    pub name: &'static str,
    pub description: &'static str,
}

impl ComponentPreset {
    pub fn to_request(&self) -> ComponentRequest {
        ComponentRequest::new(self.name, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_request_defaults() {
        let request: ComponentRequest =
            serde_json::from_str(r#"{"name":"Card","description":"A card"}"#).unwrap();
        assert_eq!(request.framework, Framework::React);
        assert_eq!(request.styling, Styling::Tailwind);
        assert_eq!(request.complexity, Complexity::Medium);
        assert_eq!(request.filename(), "Card.tsx");
    }

    #[test]
    fn test_styling_wire_names() {
        let json = serde_json::to_string(&Styling::StyledComponents).unwrap();
        assert_eq!(json, "\"styled-components\"");
        assert_eq!(Styling::CssModules.to_string(), "css-modules");
    }

    #[test]
    fn test_segment_tagging() {
        let seg = Segment::Code {
            language: Some("tsx".to_string()),
            code: "const x = 1;".to_string(),
        };
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["kind"], "code");
        assert_eq!(json["language"], "tsx");
    }
}
