use std::collections::BTreeMap;

use crate::view_model::{AppViewModel, ModelRowView, ResultView, TabView};

pub type RequestId = u64;

/// Which of the three mutually exclusive output panels is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Placeholder,
    Result,
    Error,
}

/// Complexity level of an optimized prompt. Unknown values are carried
/// through verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
    Other(String),
}

impl Complexity {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "simple" => Self::Simple,
            "medium" => Self::Medium,
            "complex" => Self::Complex,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire identifier as sent to the backend.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
            Self::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub input: String,
    pub expected_behavior: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultMetadata {
    pub complexity_level: Option<String>,
    pub task_type: Option<String>,
    pub estimated_tokens: Option<u32>,
    pub target_models: Vec<String>,
    pub techniques_used: Vec<String>,
}

/// One optimization result as held by the UI. At most one instance is live;
/// a new successful response replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultEnvelope {
    pub optimized_prompt: String,
    pub usage_guide: Option<String>,
    pub test_cases: Vec<TestCase>,
    pub optimization_notes: Option<String>,
    pub metadata: Option<ResultMetadata>,
    pub model_versions: BTreeMap<String, String>,
}

impl ResultEnvelope {
    /// Model-version tabs with non-blank content, in stable key order.
    pub fn version_ids(&self) -> Vec<&str> {
        self.model_versions
            .iter()
            .filter(|(_, content)| !content.trim().is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// Request payload assembled from the form state immediately before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    pub input: String,
    pub target_models: Vec<String>,
    pub complexity_level: String,
    pub task_type: String,
    pub language: String,
    pub generate_multi: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    selected_models: Vec<String>,
    complexity: Complexity,
    task_type: String,
    language: String,
    generate_multi: bool,
    models: Vec<ModelInfo>,
    busy: bool,
    panel: Panel,
    error_message: Option<String>,
    notice: Option<String>,
    current: Option<ResultEnvelope>,
    active_tab: Option<String>,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            selected_models: Vec::new(),
            complexity: Complexity::Medium,
            task_type: "general".to_string(),
            language: "english".to_string(),
            generate_multi: false,
            models: Vec::new(),
            busy: false,
            panel: Panel::Placeholder,
            error_message: None,
            notice: None,
            current: None,
            active_tab: None,
            in_flight: None,
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let trimmed_empty = self.input.trim().is_empty();
        AppViewModel {
            busy: self.busy,
            panel: self.panel,
            input_char_count: self.input.chars().count(),
            can_submit: !trimmed_empty && !self.busy,
            error_message: self.error_message.clone(),
            notice: self.notice.clone(),
            models: self
                .models
                .iter()
                .map(|model| ModelRowView {
                    id: model.id.clone(),
                    name: model.name.clone(),
                    description: model.description.clone(),
                    selected: self.selected_models.contains(&model.id),
                })
                .collect(),
            complexity: self.complexity.clone(),
            task_type: self.task_type.clone(),
            language: self.language.clone(),
            generate_multi: self.generate_multi,
            result: self.current.as_ref().map(|envelope| self.result_view(envelope)),
        }
    }

    fn result_view(&self, envelope: &ResultEnvelope) -> ResultView {
        let metadata = envelope.metadata.as_ref();
        ResultView {
            optimized_prompt: envelope.optimized_prompt.clone(),
            usage_guide: envelope.usage_guide.clone(),
            test_cases: envelope.test_cases.clone(),
            optimization_notes: envelope.optimization_notes.clone(),
            badge: metadata
                .and_then(|meta| meta.complexity_level.as_deref())
                .map(|level| Complexity::parse(level).badge()),
            estimated_tokens: metadata.and_then(|meta| meta.estimated_tokens),
            tabs: envelope
                .version_ids()
                .into_iter()
                .map(|id| TabView {
                    model_id: id.to_string(),
                    title: self.model_display_name(id),
                    markdown: envelope.model_versions[id].clone(),
                })
                .collect(),
            active_tab: self.active_tab.clone(),
        }
    }

    fn model_display_name(&self, id: &str) -> String {
        self.models
            .iter()
            .find(|model| model.id == id)
            .map(|model| model.name.clone())
            .unwrap_or_else(|| id.to_uppercase())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn current_result(&self) -> Option<&ResultEnvelope> {
        self.current.as_ref()
    }

    pub fn selected_models(&self) -> &[String] {
        &self.selected_models
    }

    pub fn generate_multi(&self) -> bool {
        self.generate_multi
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Payload from the current form state; the input is trimmed here so the
    /// wire never carries surrounding whitespace.
    pub(crate) fn request_payload(&self, generate_multi: bool) -> RequestPayload {
        RequestPayload {
            input: self.input.trim().to_string(),
            target_models: self.selected_models.clone(),
            complexity_level: self.complexity.as_str().to_string(),
            task_type: self.task_type.clone(),
            language: self.language.clone(),
            generate_multi,
        }
    }

    pub(crate) fn export_config(&self) -> crate::effect::ExportConfig {
        crate::effect::ExportConfig {
            complexity_level: self.complexity.as_str().to_string(),
            task_type: self.task_type.clone(),
            language: self.language.clone(),
            target_models: self.selected_models.clone(),
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
        if self.panel == Panel::Error {
            self.panel = Panel::Placeholder;
            self.error_message = None;
        }
        self.mark_dirty();
    }

    pub(crate) fn toggle_model(&mut self, id: &str) {
        if let Some(pos) = self.selected_models.iter().position(|m| m == id) {
            self.selected_models.remove(pos);
        } else {
            self.selected_models.push(id.to_string());
        }
        self.mark_dirty();
    }

    pub(crate) fn select_all_models(&mut self) {
        self.selected_models = self.models.iter().map(|m| m.id.clone()).collect();
        self.mark_dirty();
    }

    pub(crate) fn clear_all_models(&mut self) {
        self.selected_models.clear();
        self.generate_multi = false;
        self.mark_dirty();
    }

    pub(crate) fn set_complexity(&mut self, complexity: Complexity) {
        self.complexity = complexity;
        self.mark_dirty();
    }

    pub(crate) fn set_task_type(&mut self, task_type: String) {
        self.task_type = task_type;
        self.mark_dirty();
    }

    pub(crate) fn set_language(&mut self, language: String) {
        self.language = language;
        self.mark_dirty();
    }

    pub(crate) fn set_generate_multi(&mut self, enabled: bool) {
        self.generate_multi = enabled;
        if enabled {
            self.select_all_models();
        }
        self.mark_dirty();
    }

    pub(crate) fn set_models(&mut self, models: Vec<ModelInfo>) {
        self.models = models;
        self.mark_dirty();
    }

    /// Marks the state busy and allocates the id for the new request.
    /// Callers must have validated the form first.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.busy = true;
        self.in_flight = Some(id);
        self.panel = Panel::Placeholder;
        self.error_message = None;
        self.notice = None;
        self.mark_dirty();
        id
    }

    /// True when `id` matches the outstanding request. Settlement messages
    /// for any other id are stale and must be ignored.
    pub(crate) fn settles_current(&self, id: RequestId) -> bool {
        self.busy && self.in_flight == Some(id)
    }

    pub(crate) fn complete_request(&mut self, envelope: ResultEnvelope) {
        self.busy = false;
        self.in_flight = None;
        self.active_tab = envelope.version_ids().first().map(|id| id.to_string());
        self.current = Some(envelope);
        self.panel = Panel::Result;
        self.mark_dirty();
    }

    pub(crate) fn fail_request(&mut self, message: String) {
        self.busy = false;
        self.in_flight = None;
        self.show_error(message);
    }

    pub(crate) fn show_error(&mut self, message: String) {
        self.panel = Panel::Error;
        self.error_message = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn select_tab(&mut self, id: String) {
        let known = self
            .current
            .as_ref()
            .is_some_and(|envelope| envelope.version_ids().contains(&id.as_str()));
        if known {
            self.active_tab = Some(id);
            self.mark_dirty();
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
