use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use app_logging::{app_info, app_warn};
use chrono::Utc;
use polisher_core::{CopyTarget, Effect, ExportConfig, Msg};
use polisher_engine::{
    extract_plain_text, write_markdown, write_snapshot, ApiFailure, Clipboard, EngineEvent,
    EngineHandle, SystemClipboard,
};

/// Executes core effects against the engine, the clipboard and the export
/// directory, and pumps engine events back into the message channel.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: SystemClipboard,
    export_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let export_dir = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("exports");

        let runner = Self {
            engine,
            clipboard: SystemClipboard,
            export_dir,
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadModels => self.engine.load_models(),
                Effect::SendOptimize {
                    request_id,
                    payload,
                } => {
                    app_logging::set_request_id(request_id);
                    app_info!(
                        "optimize input_len={} models={}",
                        payload.input.len(),
                        payload.target_models.len()
                    );
                    self.engine.optimize(request_id, map_payload(payload));
                }
                Effect::SendGenerateMulti {
                    request_id,
                    payload,
                } => {
                    app_logging::set_request_id(request_id);
                    app_info!(
                        "generate-multi input_len={} models={}",
                        payload.input.len(),
                        payload.target_models.len()
                    );
                    self.engine.generate_multi(request_id, map_payload(payload));
                }
                Effect::CopyMarkdown { target, markdown } => self.copy(target, &markdown),
                Effect::SaveJson {
                    input,
                    config,
                    result,
                } => self.save_json(input, config, result),
                Effect::SaveMarkdown { markdown } => self.save_markdown(&markdown),
            }
        }
    }

    fn copy(&self, target: CopyTarget, markdown: &str) {
        let text = match target {
            CopyTarget::PlainText => extract_plain_text(markdown),
            CopyTarget::RawMarkdown | CopyTarget::ModelVersion(_) => markdown.to_string(),
        };
        let result = self.clipboard.copy(&text).map_err(|err| {
            app_warn!("clipboard copy failed: {err}");
            err.to_string()
        });
        let _ = self.msg_tx.send(Msg::CopyFinished { result });
    }

    fn save_json(
        &self,
        input: String,
        config: ExportConfig,
        result: polisher_core::ResultEnvelope,
    ) {
        let snapshot = polisher_engine::ExportSnapshot {
            timestamp: Utc::now().to_rfc3339(),
            input,
            configuration: map_export_config(config),
            result: envelope_to_wire(result),
        };
        let outcome = write_snapshot(&self.export_dir, &snapshot)
            .map(|path| path.display().to_string())
            .map_err(|err| err.to_string());
        let _ = self.msg_tx.send(Msg::ExportFinished { result: outcome });
    }

    fn save_markdown(&self, markdown: &str) {
        let timestamp = Utc::now().to_rfc3339();
        let outcome = write_markdown(&self.export_dir, &timestamp, markdown)
            .map(|path| path.display().to_string())
            .map_err(|err| err.to_string());
        let _ = self.msg_tx.send(Msg::ExportFinished { result: outcome });
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            match engine.try_recv() {
                Some(event) => {
                    if msg_tx.send(map_event(event)).is_err() {
                        break;
                    }
                }
                None => thread::sleep(Duration::from_millis(25)),
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ModelsLoaded(models) => Msg::ModelsLoaded(
            models
                .into_iter()
                .map(|model| polisher_core::ModelInfo {
                    id: model.id,
                    name: model.name,
                    description: model.description,
                })
                .collect(),
        ),
        EngineEvent::RequestCompleted { request_id, result } => match result {
            Ok(envelope) => Msg::RequestSucceeded {
                request_id,
                result: envelope_from_wire(envelope),
            },
            Err(ApiFailure::Offline { detail }) => {
                app_warn!("request {request_id} failed offline: {detail}");
                Msg::ConnectivityLost
            }
            Err(failure) => {
                app_warn!("request {request_id} failed: {failure:?}");
                Msg::RequestFailed {
                    request_id,
                    message: failure.to_string(),
                }
            }
        },
    }
}

fn map_payload(payload: polisher_core::RequestPayload) -> polisher_engine::OptimizeRequest {
    polisher_engine::OptimizeRequest {
        input: payload.input,
        target_models: payload.target_models,
        complexity_level: payload.complexity_level,
        task_type: payload.task_type,
        language: payload.language,
        generate_multi: payload.generate_multi,
    }
}

fn map_export_config(config: ExportConfig) -> polisher_engine::ExportConfig {
    polisher_engine::ExportConfig {
        complexity_level: config.complexity_level,
        task_type: config.task_type,
        language: config.language,
        target_models: config.target_models,
    }
}

fn envelope_from_wire(envelope: polisher_engine::ResultEnvelope) -> polisher_core::ResultEnvelope {
    polisher_core::ResultEnvelope {
        optimized_prompt: envelope.optimized_prompt,
        usage_guide: envelope.usage_guide,
        test_cases: envelope
            .test_cases
            .into_iter()
            .map(|case| polisher_core::TestCase {
                input: case.input,
                expected_behavior: case.expected_behavior,
            })
            .collect(),
        optimization_notes: envelope.optimization_notes,
        metadata: envelope.metadata.map(|meta| polisher_core::ResultMetadata {
            complexity_level: meta.complexity_level,
            task_type: meta.task_type,
            estimated_tokens: meta.estimated_tokens,
            target_models: meta.target_models,
            techniques_used: meta.techniques_used,
        }),
        model_versions: envelope.model_versions,
    }
}

fn envelope_to_wire(envelope: polisher_core::ResultEnvelope) -> polisher_engine::ResultEnvelope {
    polisher_engine::ResultEnvelope {
        optimized_prompt: envelope.optimized_prompt,
        usage_guide: envelope.usage_guide,
        test_cases: envelope
            .test_cases
            .into_iter()
            .map(|case| polisher_engine::TestCase {
                input: case.input,
                expected_behavior: case.expected_behavior,
            })
            .collect(),
        optimization_notes: envelope.optimization_notes,
        metadata: envelope.metadata.map(|meta| polisher_engine::ResultMetadata {
            complexity_level: meta.complexity_level,
            task_type: meta.task_type,
            estimated_tokens: meta.estimated_tokens,
            target_models: meta.target_models,
            techniques_used: meta.techniques_used,
        }),
        model_versions: envelope.model_versions,
    }
}
