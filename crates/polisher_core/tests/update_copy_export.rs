use polisher_core::{
    update, AppState, Complexity, CopyTarget, Effect, ModelInfo, Msg, ResultEnvelope,
};

fn init_logging() {
    app_logging::initialize_for_tests();
}

/// State holding a settled result with one model version.
fn with_result() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::ModelsLoaded(vec![ModelInfo {
            id: "claude".to_string(),
            name: "Claude 4".to_string(),
            description: String::new(),
        }]),
    );
    let (state, _) = update(state, Msg::InputChanged("write a haiku".to_string()));
    let (state, _) = update(state, Msg::ComplexityChanged(Complexity::Complex));
    let (state, _) = update(state, Msg::ModelToggled("claude".to_string()));
    let (state, effects) = update(state, Msg::OptimizeClicked);
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SendOptimize { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("optimize effect");

    let mut result = ResultEnvelope {
        optimized_prompt: "# Haiku\n\nCherry blossoms fall".to_string(),
        ..ResultEnvelope::default()
    };
    result
        .model_versions
        .insert("claude".to_string(), "claude flavoured haiku".to_string());
    let (state, _) = update(state, Msg::RequestSucceeded { request_id, result });
    state
}

#[test]
fn copy_without_a_result_is_a_noop() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::CopyClicked(CopyTarget::PlainText));
    assert!(effects.is_empty());
}

#[test]
fn copy_targets_resolve_to_the_right_markdown() {
    init_logging();
    let state = with_result();

    let (state, effects) = update(state, Msg::CopyClicked(CopyTarget::PlainText));
    match effects.as_slice() {
        [Effect::CopyMarkdown { target, markdown }] => {
            assert_eq!(*target, CopyTarget::PlainText);
            assert_eq!(markdown, "# Haiku\n\nCherry blossoms fall");
        }
        other => panic!("unexpected effects: {other:?}"),
    }

    let (_, effects) = update(
        state,
        Msg::CopyClicked(CopyTarget::ModelVersion("claude".to_string())),
    );
    match effects.as_slice() {
        [Effect::CopyMarkdown { markdown, .. }] => {
            assert_eq!(markdown, "claude flavoured haiku");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn copying_an_unknown_model_version_is_a_noop() {
    init_logging();
    let (_, effects) = update(
        with_result(),
        Msg::CopyClicked(CopyTarget::ModelVersion("gemini".to_string())),
    );
    assert!(effects.is_empty());
}

#[test]
fn copy_outcome_becomes_a_notice() {
    init_logging();
    let (state, _) = update(with_result(), Msg::CopyFinished { result: Ok(()) });
    assert_eq!(state.view().notice.as_deref(), Some("copied to clipboard"));

    let (state, _) = update(
        state,
        Msg::CopyFinished {
            result: Err("no clipboard".to_string()),
        },
    );
    let notice = state.view().notice.expect("notice");
    assert!(notice.contains("copy the text manually"), "{notice}");
}

#[test]
fn export_json_carries_input_config_and_result() {
    init_logging();
    let (_, effects) = update(with_result(), Msg::ExportJsonClicked);
    match effects.as_slice() {
        [Effect::SaveJson {
            input,
            config,
            result,
        }] => {
            assert_eq!(input, "write a haiku");
            assert_eq!(config.complexity_level, "complex");
            assert_eq!(config.target_models, vec!["claude".to_string()]);
            assert_eq!(result.optimized_prompt, "# Haiku\n\nCherry blossoms fall");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn export_without_a_result_is_a_noop() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::ExportJsonClicked);
    assert!(effects.is_empty());
    let (_, effects) = update(AppState::new(), Msg::SaveMarkdownClicked);
    assert!(effects.is_empty());
}

#[test]
fn save_markdown_uses_the_raw_markdown() {
    init_logging();
    let (_, effects) = update(with_result(), Msg::SaveMarkdownClicked);
    match effects.as_slice() {
        [Effect::SaveMarkdown { markdown }] => {
            assert_eq!(markdown, "# Haiku\n\nCherry blossoms fall");
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn export_outcome_becomes_a_notice() {
    init_logging();
    let (state, _) = update(
        with_result(),
        Msg::ExportFinished {
            result: Ok("exports/prompt_optimization_20260830.json".to_string()),
        },
    );
    let notice = state.view().notice.expect("notice");
    assert!(notice.starts_with("saved to "), "{notice}");
}
