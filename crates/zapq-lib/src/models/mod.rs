// Data models module
// Rust structs that map to the workspace frontend's TypeScript interfaces

pub mod chat;
pub mod generation;
pub mod upload;
pub mod workspace;

pub use chat::*;
pub use generation::*;
pub use upload::*;
pub use workspace::*;
