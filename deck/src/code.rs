use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as CmarkParser, Tag, TagEnd};
use thiserror::Error;

/// Marker for authoring annotations inside slides and code blocks.
pub const COMMENT_MARKER: &str = "///";

/// A fenced code block taken from a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub code: String,
    /// First word of the fence info string; empty when none was given.
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// The slide has no fenced code block.
    #[error("error: could not parse code block")]
    NoCodeBlocks,
}

/// Collect every fenced code block of a slide in document order.
///
/// Directive comment markers are removed from the returned code so the
/// annotated lines execute as plain code.
pub fn parse(markdown: &str) -> Result<Vec<CodeBlock>, CodeError> {
    let parser = CmarkParser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let events: Vec<Event<'_>> = parser.collect();

    let mut blocks = Vec::new();
    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let language = info.split_whitespace().next().unwrap_or("").to_string();
                i += 1;
                let code = collect_code(&events, &mut i);
                blocks.push(CodeBlock {
                    code: remove_comments(&code),
                    language,
                });
            }
            _ => i += 1,
        }
    }

    if blocks.is_empty() {
        return Err(CodeError::NoCodeBlocks);
    }
    Ok(blocks)
}

/// Collect text until the end of the current code block.
fn collect_code(events: &[Event<'_>], i: &mut usize) -> String {
    let mut code = String::new();
    while *i < events.len() {
        match &events[*i] {
            Event::End(TagEnd::CodeBlock) => {
                *i += 1;
                break;
            }
            Event::Text(s) => {
                code.push_str(s);
                *i += 1;
            }
            _ => *i += 1,
        }
    }
    code
}

/// Drop every line carrying a directive comment, for display.
pub fn hide_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        if !line.contains(COMMENT_MARKER) {
            out.push_str(line);
        }
    }
    out
}

/// Strip the directive markers but keep the annotated code, for execution.
pub fn remove_comments(source: &str) -> String {
    source.replace(COMMENT_MARKER, "")
}
