//! Polisher core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ExportConfig};
pub use msg::{CopyTarget, Msg};
pub use state::{
    AppState, Complexity, ModelInfo, Panel, RequestId, RequestPayload, ResultEnvelope,
    ResultMetadata, TestCase,
};
pub use update::update;
pub use view_model::{
    AppViewModel, ComplexityBadge, ModelRowView, ResultView, SeverityTier, TabView,
};
