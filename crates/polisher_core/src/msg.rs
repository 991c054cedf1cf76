use crate::{ModelInfo, RequestId, ResultEnvelope};

/// Which text a copy action targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    /// Optimized prompt with markdown markup stripped.
    PlainText,
    /// Optimized prompt as raw markdown.
    RawMarkdown,
    /// A model-specific version, keyed by model id.
    ModelVersion(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the prompt input.
    InputChanged(String),
    /// User toggled one target model checkbox.
    ModelToggled(String),
    /// User clicked "select all models".
    AllModelsSelected,
    /// User clicked "clear all models".
    AllModelsCleared,
    ComplexityChanged(crate::Complexity),
    TaskTypeChanged(String),
    LanguageChanged(String),
    GenerateMultiToggled(bool),
    /// User submitted the optimize action.
    OptimizeClicked,
    /// User submitted the batch multi-model action.
    BatchGenerateClicked,
    /// Model list arrived (from the backend or the built-in fallback).
    ModelsLoaded(Vec<ModelInfo>),
    /// The in-flight request settled successfully.
    RequestSucceeded {
        request_id: RequestId,
        result: ResultEnvelope,
    },
    /// The in-flight request settled with an error.
    RequestFailed {
        request_id: RequestId,
        message: String,
    },
    /// Connectivity was lost while a request was outstanding.
    ConnectivityLost,
    /// User selected a model-version tab.
    TabSelected(String),
    CopyClicked(CopyTarget),
    CopyFinished { result: Result<(), String> },
    /// User requested the JSON snapshot export.
    ExportJsonClicked,
    /// User requested the raw markdown download.
    SaveMarkdownClicked,
    /// An export effect settled with the written path or an error.
    ExportFinished { result: Result<String, String> },
    /// Fallback for placeholder wiring.
    NoOp,
}
