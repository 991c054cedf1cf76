use crate::{AppState, CopyTarget, Effect, Msg};

const EMPTY_INPUT_MESSAGE: &str = "enter a prompt to optimize";
const NO_MODEL_MESSAGE: &str = "select at least one target model";
const OFFLINE_MESSAGE: &str = "network connection lost, check your connection and retry";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::ModelToggled(id) => {
            state.toggle_model(&id);
            Vec::new()
        }
        Msg::AllModelsSelected => {
            state.select_all_models();
            Vec::new()
        }
        Msg::AllModelsCleared => {
            state.clear_all_models();
            Vec::new()
        }
        Msg::ComplexityChanged(complexity) => {
            state.set_complexity(complexity);
            Vec::new()
        }
        Msg::TaskTypeChanged(task_type) => {
            state.set_task_type(task_type);
            Vec::new()
        }
        Msg::LanguageChanged(language) => {
            state.set_language(language);
            Vec::new()
        }
        Msg::GenerateMultiToggled(enabled) => {
            state.set_generate_multi(enabled);
            Vec::new()
        }
        Msg::OptimizeClicked => submit(&mut state, false),
        Msg::BatchGenerateClicked => submit(&mut state, true),
        Msg::ModelsLoaded(models) => {
            state.set_models(models);
            Vec::new()
        }
        Msg::RequestSucceeded { request_id, result } => {
            if state.settles_current(request_id) {
                state.complete_request(result);
            }
            Vec::new()
        }
        Msg::RequestFailed {
            request_id,
            message,
        } => {
            if state.settles_current(request_id) {
                state.fail_request(message);
            }
            Vec::new()
        }
        Msg::ConnectivityLost => {
            if state.is_busy() {
                state.fail_request(OFFLINE_MESSAGE.to_string());
            }
            Vec::new()
        }
        Msg::TabSelected(id) => {
            state.select_tab(id);
            Vec::new()
        }
        Msg::CopyClicked(target) => copy_effect(&state, target),
        Msg::CopyFinished { result } => {
            match result {
                Ok(()) => state.set_notice("copied to clipboard".to_string()),
                Err(err) => {
                    state.set_notice(format!("copy failed ({err}), copy the text manually"))
                }
            }
            Vec::new()
        }
        Msg::ExportJsonClicked => match state.current_result() {
            Some(envelope) => vec![Effect::SaveJson {
                input: state.input().to_string(),
                config: state.export_config(),
                result: envelope.clone(),
            }],
            None => Vec::new(),
        },
        Msg::SaveMarkdownClicked => match state.current_result() {
            Some(envelope) => vec![Effect::SaveMarkdown {
                markdown: envelope.optimized_prompt.clone(),
            }],
            None => Vec::new(),
        },
        Msg::ExportFinished { result } => {
            match result {
                Ok(path) => state.set_notice(format!("saved to {path}")),
                Err(err) => state.set_notice(format!("export failed: {err}")),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Validates the form and, when valid, enters the busy state and emits the
/// request effect. The busy check happens here, synchronously, before any
/// effect exists; a second submit while busy is a no-op.
fn submit(state: &mut AppState, batch: bool) -> Vec<Effect> {
    if state.is_busy() {
        return Vec::new();
    }
    if state.input().trim().is_empty() {
        state.show_error(EMPTY_INPUT_MESSAGE.to_string());
        return Vec::new();
    }
    if state.selected_models().is_empty() {
        state.show_error(NO_MODEL_MESSAGE.to_string());
        return Vec::new();
    }

    let generate_multi = batch || state.generate_multi();
    let payload = state.request_payload(generate_multi);
    let request_id = state.begin_request();
    if batch {
        vec![Effect::SendGenerateMulti {
            request_id,
            payload,
        }]
    } else {
        vec![Effect::SendOptimize {
            request_id,
            payload,
        }]
    }
}

fn copy_effect(state: &AppState, target: CopyTarget) -> Vec<Effect> {
    let Some(envelope) = state.current_result() else {
        return Vec::new();
    };
    let markdown = match &target {
        CopyTarget::PlainText | CopyTarget::RawMarkdown => envelope.optimized_prompt.clone(),
        CopyTarget::ModelVersion(id) => match envelope.model_versions.get(id) {
            Some(content) if !content.trim().is_empty() => content.clone(),
            _ => return Vec::new(),
        },
    };
    if markdown.is_empty() {
        return Vec::new();
    }
    vec![Effect::CopyMarkdown { target, markdown }]
}
