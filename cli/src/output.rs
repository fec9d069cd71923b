use colored::*;
use pulldown_cmark::{Event as MdEvent, HeadingLevel, Options, Parser as MdParser, Tag};
use std::io::{self, Write};

/// Clear the terminal and park the cursor at the top left
pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

/// Print the assistant's resolved reply with a colored prefix
pub fn print_assistant_response(response: &str) {
    println!(
        "{}: {}",
        "Travel Assistant".blue().bold(),
        render_markdown(response)
    );
}

/// Farewell printed on the exit/quit sentinels
pub fn print_goodbye() {
    println!("{}", "Goodbye!".green());
}

/// Render the model's markdown for the terminal.
///
/// Hotel conversations are prose, lists and links, so this handles exactly
/// that: headings, emphasis, bullet and numbered lists, inline code and
/// link targets. Code blocks pass through dimmed.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = MdParser::new_ext(markdown, options);

    let mut output = String::new();
    let mut strong = false;
    let mut emphasis = false;
    let mut in_code_block = false;
    let mut list_index: Option<u64> = None;

    for event in parser {
        match event {
            MdEvent::Start(Tag::Heading(level, ..)) => {
                if !output.is_empty() {
                    output.push('\n');
                }
                let prefix = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    _ => "### ",
                };
                output.push_str(&prefix.bright_cyan().bold().to_string());
                strong = true;
            }
            MdEvent::End(Tag::Heading(..)) => {
                strong = false;
                output.push('\n');
            }
            MdEvent::Start(Tag::Paragraph) => {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            MdEvent::End(Tag::Paragraph) => output.push('\n'),
            MdEvent::Start(Tag::List(start)) => {
                list_index = start;
                if !output.ends_with('\n') && !output.is_empty() {
                    output.push('\n');
                }
            }
            MdEvent::End(Tag::List(_)) => {
                list_index = None;
            }
            MdEvent::Start(Tag::Item) => match list_index {
                Some(index) => {
                    output.push_str(&format!("{} ", format!("{}.", index).yellow()));
                    list_index = Some(index + 1);
                }
                None => output.push_str(&format!("{}  ", "•".yellow())),
            },
            MdEvent::End(Tag::Item) => {
                if !output.ends_with('\n') {
                    output.push('\n');
                }
            }
            MdEvent::Start(Tag::Emphasis) => emphasis = true,
            MdEvent::End(Tag::Emphasis) => emphasis = false,
            MdEvent::Start(Tag::Strong) => strong = true,
            MdEvent::End(Tag::Strong) => strong = false,
            MdEvent::End(Tag::Link(_, url, _)) => {
                output.push_str(&format!(" ({})", url).dimmed().to_string());
            }
            MdEvent::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                if !output.ends_with('\n') && !output.is_empty() {
                    output.push('\n');
                }
            }
            MdEvent::End(Tag::CodeBlock(_)) => {
                in_code_block = false;
            }
            MdEvent::Code(code) => {
                output.push_str(&format!("`{}`", code).on_bright_black().white().to_string());
            }
            MdEvent::Text(text) => {
                if in_code_block {
                    output.push_str(&text.dimmed().to_string());
                } else if strong {
                    output.push_str(&text.bold().to_string());
                } else if emphasis {
                    output.push_str(&text.italic().to_string());
                } else {
                    output.push_str(&text);
                }
            }
            MdEvent::SoftBreak => output.push(' '),
            MdEvent::HardBreak => output.push('\n'),
            _ => {}
        }
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Styling is disabled in test binaries unless forced, so assert on the
    // text content rather than escape codes.
    fn plain(markdown: &str) -> String {
        colored::control::set_override(false);
        render_markdown(markdown)
    }

    #[test]
    fn bullet_lists_get_bullets() {
        let rendered = plain("Options:\n- Hotel A\n- Hotel B\n");
        assert!(rendered.contains("•  Hotel A"));
        assert!(rendered.contains("•  Hotel B"));
    }

    #[test]
    fn ordered_lists_count_up() {
        let rendered = plain("1. First\n2. Second\n");
        assert!(rendered.contains("1. First"));
        assert!(rendered.contains("2. Second"));
    }

    #[test]
    fn link_targets_are_shown() {
        let rendered = plain("See [Hotel Le Six](https://example.com/le-six).");
        assert!(rendered.contains("Hotel Le Six"));
        assert!(rendered.contains("(https://example.com/le-six)"));
    }

    #[test]
    fn soft_breaks_become_spaces() {
        let rendered = plain("line one\nline two");
        assert_eq!(rendered, "line one line two");
    }
}
