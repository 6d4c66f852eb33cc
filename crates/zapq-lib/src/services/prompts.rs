// Prompt templates for the generation workflows

use crate::models::{ComponentPreset, ComponentRequest};

/// Suggestions offered before the first chat exchange
pub const QUICK_PROMPTS: &[&str] = &[
    "Create a modern card component",
    "Build a responsive navbar",
    "Generate a form with validation",
    "Create a data table component",
];

/// Ready-made inputs for the component generator
pub const COMPONENT_PRESETS: &[ComponentPreset] = &[
    ComponentPreset {
        name: "Button",
        description: "A customizable button with variants and sizes",
    },
    ComponentPreset {
        name: "Card",
        description: "A flexible card component with header, body, and footer",
    },
    ComponentPreset {
        name: "Modal",
        description: "A modal dialog with backdrop and animations",
    },
    ComponentPreset {
        name: "Form",
        description: "A form component with validation and error handling",
    },
    ComponentPreset {
        name: "Table",
        description: "A data table with sorting and pagination",
    },
    ComponentPreset {
        name: "Navbar",
        description: "A responsive navigation bar with mobile menu",
    },
];

/// `Card` and `Card.tsx` both become `Card.tsx`
pub fn component_file_name(filename: &str) -> String {
    let trimmed = filename.trim();
    if trimmed.ends_with(".tsx") {
        trimmed.to_string()
    } else {
        format!("{}.tsx", trimmed)
    }
}

/// Prompt of the single-file generator
pub fn file_generation_prompt(filename: &str) -> String {
    let file_name = component_file_name(filename);
    let stem = file_name.strip_suffix(".tsx").unwrap_or(&file_name);
    format!(
        "Create a React TypeScript + Tailwind component called \"{}\" and output only the .tsx code.",
        stem
    )
}

/// Prompt of the component generator
pub fn component_prompt(request: &ComponentRequest) -> String {
    format!(
        "Create a {complexity} complexity {framework} component called \"{name}\" using {styling} for styling. \n\
         \n\
         Description: {description}\n\
         \n\
         Requirements:\n\
         - Use TypeScript\n\
         - Include proper prop types and interfaces\n\
         - Add hover states and transitions\n\
         - Make it responsive\n\
         - Include accessibility features\n\
         - Use modern React patterns (hooks, functional components)\n\
         - Add proper error handling where applicable\n\
         - Include JSDoc comments for props\n\
         \n\
         Output only the complete component code without explanations.",
        complexity = request.complexity,
        framework = request.framework,
        name = request.name.trim(),
        styling = request.styling,
        description = request.description.trim(),
    )
}

/// Prompt asking the assistant to rework the current buffer
pub fn improve_prompt(code: &str) -> String {
    format!(
        "Improve and modernize the following React + TypeScript component. Use best practices, clean structure, and Tailwind CSS where appropriate:\n\n{}",
        code
    )
}
