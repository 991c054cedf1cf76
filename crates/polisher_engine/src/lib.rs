//! Polisher engine: API client, render/export pipelines, clipboard access.
mod client;
mod clipboard;
mod engine;
mod export;
mod render;
mod types;

pub use client::{default_models, ApiBackend, ClientSettings, ReqwestBackend};
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use engine::EngineHandle;
pub use export::{
    compact_timestamp, markdown_filename, snapshot_filename, write_markdown, write_snapshot,
    ExportConfig, ExportError, ExportSnapshot,
};
pub use render::{char_count, extract_plain_text, render_markdown, word_count};
pub use types::{
    ApiFailure, EngineEvent, ModelInfo, OptimizeRequest, RequestId, ResultEnvelope,
    ResultMetadata, TestCase,
};
