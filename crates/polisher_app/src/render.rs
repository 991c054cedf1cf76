use polisher_core::{AppViewModel, Panel, ResultView, SeverityTier};
use polisher_engine::{char_count, extract_plain_text, word_count};

/// Pure view-model formatter: the main loop prints whatever this returns.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "[{}] input: {} chars | complexity: {} | task: {} | lang: {} | multi: {}\n",
        if view.busy { "working..." } else { "ready" },
        view.input_char_count,
        view.complexity.badge().label,
        view.task_type,
        view.language,
        if view.generate_multi { "on" } else { "off" }
    ));

    if view.models.is_empty() {
        out.push_str("models: (loading)\n");
    } else {
        let rows: Vec<String> = view
            .models
            .iter()
            .map(|model| {
                format!(
                    "[{}] {} ({})",
                    if model.selected { "x" } else { " " },
                    model.id,
                    model.name
                )
            })
            .collect();
        out.push_str(&format!("models: {}\n", rows.join("  ")));
    }

    if let Some(notice) = &view.notice {
        out.push_str(&format!("-- {notice}\n"));
    }

    match view.panel {
        Panel::Placeholder => {
            if view.busy {
                out.push_str("optimizing, hang tight...\n");
            } else {
                out.push_str("enter a prompt and run :optimize\n");
            }
        }
        Panel::Error => {
            let message = view.error_message.as_deref().unwrap_or("unknown error");
            out.push_str(&format!("error: {message}\n"));
        }
        Panel::Result => {
            if let Some(result) = &view.result {
                render_result(&mut out, result);
            }
        }
    }

    out
}

fn render_result(out: &mut String, result: &ResultView) {
    let plain = extract_plain_text(&result.optimized_prompt);

    out.push_str("== Optimized Prompt ==\n");
    if let Some(badge) = &result.badge {
        out.push_str(&format!(
            "complexity: {} [{}]",
            badge.label,
            tier_label(badge.tier)
        ));
        if let Some(tokens) = result.estimated_tokens {
            out.push_str(&format!(" | ~{tokens} tokens"));
        }
        out.push_str(&format!(
            " | {} words, {} chars\n",
            word_count(&plain),
            char_count(&plain)
        ));
    }
    out.push_str(&plain);
    out.push('\n');

    if let Some(guide) = &result.usage_guide {
        out.push_str("\n== Usage Guide ==\n");
        out.push_str(&extract_plain_text(guide));
        out.push('\n');
    }

    if !result.test_cases.is_empty() {
        out.push_str("\n== Test Cases ==\n");
        for (index, case) in result.test_cases.iter().enumerate() {
            out.push_str(&format!(
                "{}. input: {} | expected: {}\n",
                index + 1,
                case.input,
                case.expected_behavior
            ));
        }
    }

    if let Some(notes) = &result.optimization_notes {
        out.push_str("\n== Optimization Notes ==\n");
        out.push_str(&extract_plain_text(notes));
        out.push('\n');
    }

    if !result.tabs.is_empty() {
        let headers: Vec<String> = result
            .tabs
            .iter()
            .map(|tab| {
                if result.active_tab.as_deref() == Some(tab.model_id.as_str()) {
                    format!("*{}*", tab.model_id)
                } else {
                    tab.model_id.clone()
                }
            })
            .collect();
        out.push_str(&format!("\n== Model Versions: {} ==\n", headers.join(" | ")));
        let active = result
            .tabs
            .iter()
            .find(|tab| result.active_tab.as_deref() == Some(tab.model_id.as_str()));
        if let Some(tab) = active {
            out.push_str(&format!("[{}]\n", tab.title));
            out.push_str(&extract_plain_text(&tab.markdown));
            out.push('\n');
        }
    }
}

fn tier_label(tier: SeverityTier) -> &'static str {
    match tier {
        SeverityTier::Low => "low",
        SeverityTier::Mid => "mid",
        SeverityTier::High => "high",
        SeverityTier::Neutral => "neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use polisher_core::{update, AppState, ModelInfo, Msg, ResultEnvelope};

    fn loaded_state() -> AppState {
        let (state, _) = update(
            AppState::new(),
            Msg::ModelsLoaded(vec![ModelInfo {
                id: "claude".to_string(),
                name: "Claude 4".to_string(),
                description: "reasoning".to_string(),
            }]),
        );
        state
    }

    #[test]
    fn idle_view_shows_placeholder_and_models() {
        let rendered = render(&loaded_state().view());
        assert!(rendered.contains("enter a prompt"));
        assert!(rendered.contains("claude"));
        assert!(rendered.contains("ready"));
    }

    #[test]
    fn error_view_shows_the_message() {
        let (state, _) = update(loaded_state(), Msg::OptimizeClicked);
        let rendered = render(&state.view());
        assert!(rendered.contains("error: enter a prompt to optimize"));
    }

    #[test]
    fn result_view_strips_markdown_for_display() {
        let (state, _) = update(loaded_state(), Msg::InputChanged("write a haiku".into()));
        let (state, _) = update(state, Msg::ModelToggled("claude".to_string()));
        let (state, effects) = update(state, Msg::OptimizeClicked);
        assert_eq!(effects.len(), 1);
        let (state, _) = update(
            state,
            Msg::RequestSucceeded {
                request_id: 1,
                result: ResultEnvelope {
                    optimized_prompt: "# Haiku\n\nCherry blossoms fall".to_string(),
                    ..ResultEnvelope::default()
                },
            },
        );

        let rendered = render(&state.view());
        assert!(rendered.contains("Haiku\nCherry blossoms fall"));
        assert!(!rendered.contains("# Haiku"));
    }
}
