// Generation Router
//
// Classifies assistant output (prose vs. code) and decides which consumers
// receive it. Owns no state.

use crate::models::{Destination, GeneratedArtifact, RouteContext, Segment};

/// Fence delimiter used by markdown code blocks
pub const FENCE: &str = "```";

/// One independent substring test of the code-like heuristic.
/// Any single match is enough; prose that mentions these tokens over-classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRule {
    /// A fenced code delimiter
    Fence,
    /// A module-import keyword
    ImportKeyword,
    /// A function-declaration keyword
    FunctionKeyword,
    /// A variable-declaration keyword
    DeclarationKeyword,
}

impl CodeRule {
    pub const ALL: [CodeRule; 4] = [
        CodeRule::Fence,
        CodeRule::ImportKeyword,
        CodeRule::FunctionKeyword,
        CodeRule::DeclarationKeyword,
    ];

    /// Substring searched for by this rule
    pub fn marker(&self) -> &'static str {
        match self {
            CodeRule::Fence => FENCE,
            CodeRule::ImportKeyword => "import ",
            CodeRule::FunctionKeyword => "function ",
            CodeRule::DeclarationKeyword => "const ",
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(self.marker())
    }
}

/// Rules that fire for `text`, in rule order
pub fn matching_rules(text: &str) -> Vec<CodeRule> {
    CodeRule::ALL
        .iter()
        .copied()
        .filter(|rule| rule.matches(text))
        .collect()
}

pub fn is_code_like(text: &str) -> bool {
    CodeRule::ALL.iter().any(|rule| rule.matches(text))
}

/// Wrap raw assistant text with its verdict. Pure.
pub fn classify(text: &str) -> GeneratedArtifact {
    GeneratedArtifact {
        text: text.to_string(),
        code_like: is_code_like(text),
    }
}

/// Decide where an artifact lands.
///
/// File generation always lands in the registry under the requested name.
/// Chat always lands in the chat log, and also in the editor buffer when code-like.
pub fn route(artifact: &GeneratedArtifact, context: &RouteContext) -> Vec<Destination> {
    match context {
        RouteContext::FileGeneration { filename } => vec![Destination::File(filename.clone())],
        RouteContext::Chat if artifact.code_like => {
            vec![Destination::ChatLog, Destination::ActiveBuffer]
        }
        RouteContext::Chat => vec![Destination::ChatLog],
    }
}

/// Split a message on code fences for display. Even slices are prose, odd
/// slices are code. Routing never looks at this.
pub fn segment(text: &str) -> Vec<Segment> {
    if !text.contains(FENCE) {
        return vec![Segment::Prose {
            text: text.to_string(),
        }];
    }

    text.split(FENCE)
        .enumerate()
        .filter_map(|(index, part)| {
            if index % 2 == 0 {
                if part.trim().is_empty() {
                    None
                } else {
                    Some(Segment::Prose {
                        text: part.to_string(),
                    })
                }
            } else {
                Some(code_segment(part))
            }
        })
        .collect()
}

/// A bare word on the opening fence line is the language hint
fn code_segment(part: &str) -> Segment {
    if let Some((first_line, rest)) = part.split_once('\n') {
        let hint = first_line.trim();
        if !hint.is_empty() && !hint.contains(char::is_whitespace) {
            return Segment::Code {
                language: Some(hint.to_string()),
                code: rest.to_string(),
            };
        }
        if hint.is_empty() {
            return Segment::Code {
                language: None,
                code: rest.to_string(),
            };
        }
    }
    Segment::Code {
        language: None,
        code: part.to_string(),
    }
}
