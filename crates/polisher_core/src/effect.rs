use crate::{CopyTarget, RequestId, RequestPayload, ResultEnvelope};

/// Configuration block of the JSON snapshot export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub complexity_level: String,
    pub task_type: String,
    pub language: String,
    pub target_models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadModels,
    SendOptimize {
        request_id: RequestId,
        payload: RequestPayload,
    },
    SendGenerateMulti {
        request_id: RequestId,
        payload: RequestPayload,
    },
    /// Copy `markdown` to the clipboard; the runner derives plain text when
    /// the target asks for it.
    CopyMarkdown {
        target: CopyTarget,
        markdown: String,
    },
    SaveJson {
        input: String,
        config: ExportConfig,
        result: ResultEnvelope,
    },
    SaveMarkdown {
        markdown: String,
    },
}
