use pulldown_cmark::{html, Event, Options, Parser, TagEnd};

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Renders markdown to sanitized HTML. Soft line breaks become hard breaks;
/// script and event-handler content never survives the sanitizer.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);
    ammonia::clean(&rendered)
}

/// Derives markup-free text from markdown: text and code content only, one
/// newline per block boundary, runs of blank lines collapsed to a single
/// blank, every line and the whole string trimmed.
pub fn extract_plain_text(markdown: &str) -> String {
    let mut raw = String::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Text(text) => raw.push_str(&text),
            Event::Code(code) => raw.push_str(&code),
            Event::SoftBreak | Event::HardBreak | Event::Rule => raw.push('\n'),
            Event::End(end) if is_block_end(&end) => raw.push('\n'),
            _ => {}
        }
    }
    normalize_blank_lines(&raw)
}

fn is_block_end(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::CodeBlock
            | TagEnd::List(_)
            | TagEnd::Table
            | TagEnd::TableRow
            | TagEnd::HtmlBlock
    )
}

fn normalize_blank_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut pending_blanks = 0usize;
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            pending_blanks += 1;
            continue;
        }
        if !lines.is_empty() && pending_blanks > 0 {
            lines.push("");
        }
        pending_blanks = 0;
        lines.push(line);
    }
    lines.join("\n")
}

/// Whitespace-delimited token count of already-extracted plain text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::{char_count, extract_plain_text, render_markdown, word_count};

    #[test]
    fn script_tags_never_survive_rendering() {
        let html = render_markdown("hello <script>alert('x')</script> world");
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert('x')"));

        let html = render_markdown("<img src=x onerror=\"alert(1)\">");
        assert!(!html.contains("onerror"));
    }

    #[test]
    fn rendering_is_idempotent_in_effect() {
        let input = "# Title\n\nbody with *emphasis*";
        assert_eq!(render_markdown(input), render_markdown(input));
    }

    #[test]
    fn soft_breaks_become_hard_breaks() {
        let html = render_markdown("line one\nline two");
        assert!(html.contains("<br"));
    }

    #[test]
    fn plain_text_strips_heading_markup() {
        let text = extract_plain_text("# Haiku\n\nCherry blossoms fall");
        assert_eq!(text, "Haiku\nCherry blossoms fall");
        assert_eq!(char_count(&text), text.chars().count());
    }

    #[test]
    fn plain_text_contains_no_markup_characters() {
        let text = extract_plain_text("# A\n\n- **bold** item\n- [link](https://x)\n\n`code`");
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
        assert!(!text.contains('*'));
        assert!(text.contains("bold item"));
        assert!(text.contains("link"));
        assert!(text.contains("code"));
    }

    #[test]
    fn blank_line_runs_collapse_to_one() {
        let text = extract_plain_text("one\\\n\\\n\\\n\\\ntwo");
        assert!(!text.contains("\n\n\n"));

        let direct = super::normalize_blank_lines("a\n\n\n\n\nb");
        assert_eq!(direct, "a\n\nb");
    }

    #[test]
    fn plain_text_trims_lines_and_ends() {
        assert_eq!(super::normalize_blank_lines("  a  \n\n  b  \n"), "a\n\nb");
        assert_eq!(extract_plain_text(""), "");
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count("write a haiku"), 3);
        assert_eq!(word_count("  spaced\tout \n tokens "), 3);
        assert_eq!(word_count(""), 0);
    }
}
