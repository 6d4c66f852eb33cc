// Zapq - workspace state core
// Open files, generation routing, and the upload/analyze pipeline behind an
// AI-assisted code workspace. The HTTP backend sits behind `RemoteGateway`.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{PipelineError, WorkspaceError, WorkspaceErrorCode, WorkspaceResult};
pub use models::*;
pub use services::{HttpGateway, RemoteGateway, WorkspaceController};
pub use utils::WorkspaceConfig;
