use crate::{Complexity, Panel, TestCase};

/// Severity tier backing the complexity badge styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTier {
    Low,
    Mid,
    High,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityBadge {
    pub label: String,
    pub tier: SeverityTier,
}

impl Complexity {
    /// Fixed label/severity pairs; unrecognized levels pass through raw with
    /// a neutral tier.
    pub fn badge(&self) -> ComplexityBadge {
        let (label, tier) = match self {
            Complexity::Simple => ("Simple", SeverityTier::Low),
            Complexity::Medium => ("Medium", SeverityTier::Mid),
            Complexity::Complex => ("Complex", SeverityTier::High),
            Complexity::Other(raw) => (raw.as_str(), SeverityTier::Neutral),
        };
        ComplexityBadge {
            label: label.to_string(),
            tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRowView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub model_id: String,
    pub title: String,
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub optimized_prompt: String,
    pub usage_guide: Option<String>,
    pub test_cases: Vec<TestCase>,
    pub optimization_notes: Option<String>,
    pub badge: Option<ComplexityBadge>,
    pub estimated_tokens: Option<u32>,
    pub tabs: Vec<TabView>,
    pub active_tab: Option<String>,
}

/// Pure description of everything the adapter needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub busy: bool,
    pub panel: Panel,
    pub input_char_count: usize,
    pub can_submit: bool,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    pub models: Vec<ModelRowView>,
    pub complexity: Complexity,
    pub task_type: String,
    pub language: String,
    pub generate_multi: bool,
    pub result: Option<ResultView>,
}
