use polisher_core::{Complexity, CopyTarget, Msg};

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    /// Print the sanitized HTML of the current optimized prompt.
    ShowHtml,
    /// Re-print the current view.
    Show,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Type a prompt to set the input, or use a command:
  :optimize            optimize the current input
  :batch               batch-generate versions for every selected model
  :toggle <model-id>   toggle one target model
  :all / :none         select or clear all target models
  :complexity <level>  simple | medium | complex
  :task <type>         task type (general, coding, creative, ...)
  :lang <language>     reply language
  :multi on|off        multi-model generation flag
  :tab <model-id>      switch the visible model-version tab
  :copy [plain|raw|<model-id>]   copy the result (default: plain text)
  :export              export a JSON snapshot of the session
  :save                save the optimized prompt as markdown
  :html                print the result as sanitized HTML
  :show                re-print the current view
  :help / :quit";

/// Parses one input line. Lines not starting with `:` replace the prompt
/// input; unknown commands and bad arguments come back as usage errors.
pub fn parse(line: &str) -> Result<Command, String> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        return Ok(Command::Dispatch(Msg::NoOp));
    }
    if !trimmed.starts_with(':') {
        return Ok(Command::Dispatch(Msg::InputChanged(trimmed.to_string())));
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match head {
        ":optimize" | ":opt" => Ok(Command::Dispatch(Msg::OptimizeClicked)),
        ":batch" => Ok(Command::Dispatch(Msg::BatchGenerateClicked)),
        ":toggle" if !arg.is_empty() => {
            Ok(Command::Dispatch(Msg::ModelToggled(arg.to_string())))
        }
        ":toggle" => Err("usage: :toggle <model-id>".to_string()),
        ":all" => Ok(Command::Dispatch(Msg::AllModelsSelected)),
        ":none" => Ok(Command::Dispatch(Msg::AllModelsCleared)),
        ":complexity" if !arg.is_empty() => Ok(Command::Dispatch(Msg::ComplexityChanged(
            Complexity::parse(arg),
        ))),
        ":complexity" => Err("usage: :complexity <simple|medium|complex>".to_string()),
        ":task" if !arg.is_empty() => {
            Ok(Command::Dispatch(Msg::TaskTypeChanged(arg.to_string())))
        }
        ":task" => Err("usage: :task <type>".to_string()),
        ":lang" if !arg.is_empty() => {
            Ok(Command::Dispatch(Msg::LanguageChanged(arg.to_string())))
        }
        ":lang" => Err("usage: :lang <language>".to_string()),
        ":multi" => match arg {
            "on" => Ok(Command::Dispatch(Msg::GenerateMultiToggled(true))),
            "off" => Ok(Command::Dispatch(Msg::GenerateMultiToggled(false))),
            _ => Err("usage: :multi on|off".to_string()),
        },
        ":tab" if !arg.is_empty() => Ok(Command::Dispatch(Msg::TabSelected(arg.to_string()))),
        ":tab" => Err("usage: :tab <model-id>".to_string()),
        ":copy" => Ok(Command::Dispatch(Msg::CopyClicked(parse_copy_target(arg)))),
        ":export" => Ok(Command::Dispatch(Msg::ExportJsonClicked)),
        ":save" => Ok(Command::Dispatch(Msg::SaveMarkdownClicked)),
        ":html" => Ok(Command::ShowHtml),
        ":show" => Ok(Command::Show),
        ":help" => Ok(Command::Help),
        ":quit" | ":q" => Ok(Command::Quit),
        other => Err(format!("unknown command {other}, try :help")),
    }
}

fn parse_copy_target(arg: &str) -> CopyTarget {
    match arg {
        "" | "plain" => CopyTarget::PlainText,
        "raw" => CopyTarget::RawMarkdown,
        model_id => CopyTarget::ModelVersion(model_id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, Command};
    use polisher_core::{Complexity, CopyTarget, Msg};

    #[test]
    fn plain_lines_replace_the_input() {
        assert_eq!(
            parse("write a haiku"),
            Ok(Command::Dispatch(Msg::InputChanged(
                "write a haiku".to_string()
            )))
        );
        // Leading/trailing spaces are kept; trimming is the core's concern.
        assert_eq!(
            parse("  hello  "),
            Ok(Command::Dispatch(Msg::InputChanged("  hello  ".to_string())))
        );
    }

    #[test]
    fn actions_map_to_messages() {
        assert_eq!(parse(":optimize"), Ok(Command::Dispatch(Msg::OptimizeClicked)));
        assert_eq!(parse(":opt"), Ok(Command::Dispatch(Msg::OptimizeClicked)));
        assert_eq!(parse(":batch"), Ok(Command::Dispatch(Msg::BatchGenerateClicked)));
        assert_eq!(
            parse(":toggle claude"),
            Ok(Command::Dispatch(Msg::ModelToggled("claude".to_string())))
        );
        assert_eq!(
            parse(":complexity complex"),
            Ok(Command::Dispatch(Msg::ComplexityChanged(Complexity::Complex)))
        );
    }

    #[test]
    fn copy_targets_default_to_plain_text() {
        assert_eq!(
            parse(":copy"),
            Ok(Command::Dispatch(Msg::CopyClicked(CopyTarget::PlainText)))
        );
        assert_eq!(
            parse(":copy raw"),
            Ok(Command::Dispatch(Msg::CopyClicked(CopyTarget::RawMarkdown)))
        );
        assert_eq!(
            parse(":copy gemini"),
            Ok(Command::Dispatch(Msg::CopyClicked(CopyTarget::ModelVersion(
                "gemini".to_string()
            ))))
        );
    }

    #[test]
    fn bad_arguments_come_back_as_usage_errors() {
        assert!(parse(":toggle").is_err());
        assert!(parse(":multi sideways").is_err());
        assert!(parse(":frobnicate").is_err());
    }
}
