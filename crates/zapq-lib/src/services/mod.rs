// Services module
// Workspace state core: routing, registry, pipeline, and the controller

pub mod chat_log;
pub mod controller;
pub mod file_tree;
pub mod gateway;
pub mod pipeline;
pub mod prompts;
pub mod registry;
pub mod router;
pub mod sequencer;

pub use chat_log::ChatLog;
pub use controller::{OpenOutcome, WorkspaceController};
pub use gateway::{GatewayError, GatewayResult, HttpGateway, RemoteGateway};
pub use pipeline::UploadPipeline;
pub use registry::{CloseOutcome, OpenFileRegistry};
pub use sequencer::{RequestSequencer, SequenceTarget, Ticket};
