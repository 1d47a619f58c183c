use std::ops::Range;

use crate::meta::FrontMatter;
use crate::parser::error::{ParseError, ParseErrorKind};

/// The fence style that opened a front matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence {
    /// `---`, YAML-style keys (TOML is accepted too).
    Dashes,
    /// `+++`, TOML.
    Pluses,
}

impl Fence {
    fn marker(self) -> &'static str {
        match self {
            Fence::Dashes => "---",
            Fence::Pluses => "+++",
        }
    }
}

/// A front matter block located at the top of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub fence: Fence,
    pub content: &'a str,
    /// Byte span of `content` in the source.
    pub content_span: Range<usize>,
    /// Offset of the first byte after the closing fence line.
    pub body_start: usize,
}

/// Locate a front matter block. The opening fence must be the very first
/// line; a block that is never closed is not front matter.
pub fn locate(source: &str) -> Option<Block<'_>> {
    let offset = if source.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
    let rest = &source[offset..];

    let first_line_end = rest.find('\n')?;
    let fence = match rest[..first_line_end].trim_end() {
        "---" => Fence::Dashes,
        "+++" => Fence::Pluses,
        _ => return None,
    };

    let content_start = offset + first_line_end + 1;
    let mut line_start = content_start;
    while line_start <= source.len() {
        let line_end = source[line_start..]
            .find('\n')
            .map(|p| line_start + p)
            .unwrap_or(source.len());
        if source[line_start..line_end].trim_end() == fence.marker() {
            let body_start = (line_end + 1).min(source.len());
            return Some(Block {
                fence,
                content: &source[content_start..line_start],
                content_span: content_start..line_start,
                body_start,
            });
        }
        if line_end == source.len() {
            break;
        }
        line_start = line_end + 1;
    }

    None
}

/// Decode the keys of a front matter block. `---` blocks are YAML, with
/// TOML accepted as well; `+++` blocks are TOML.
pub fn decode(block: &Block<'_>, file_id: usize) -> Result<FrontMatter, ParseError> {
    match block.fence {
        Fence::Dashes => decode_yaml(block, file_id),
        Fence::Pluses => decode_toml(block, file_id),
    }
}

fn decode_yaml(block: &Block<'_>, file_id: usize) -> Result<FrontMatter, ParseError> {
    if block.content.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    let err = match serde_yaml::from_str::<FrontMatter>(block.content) {
        Ok(front_matter) => return Ok(front_matter),
        Err(err) => err,
    };
    // A comment-only block is an empty YAML document; TOML reads it as no keys.
    if let Ok(front_matter) = toml::from_str::<FrontMatter>(block.content) {
        return Ok(front_matter);
    }

    let span = match err.location() {
        Some(location) => {
            let at = (block.content_span.start + location.index()).min(block.content_span.end);
            at..(at + 1).min(block.content_span.end)
        }
        None => block.content_span.clone(),
    };
    let kind = ParseErrorKind::InvalidFrontMatter {
        format: "YAML",
        detail: err.to_string(),
    };
    Err(ParseError::new(kind, span, file_id).with_note("expected `key: value` pairs such as `author: Jane`"))
}

fn decode_toml(block: &Block<'_>, file_id: usize) -> Result<FrontMatter, ParseError> {
    toml::from_str::<FrontMatter>(block.content).map_err(|err| {
        let span = err
            .span()
            .map(|s| block.content_span.start + s.start..block.content_span.start + s.end)
            .unwrap_or_else(|| block.content_span.clone());
        let kind = ParseErrorKind::InvalidFrontMatter {
            format: "TOML",
            detail: err.message().to_string(),
        };
        ParseError::new(kind, span, file_id)
            .with_note("front matter values must be quoted strings, e.g. date = \"YYYY-MM-DD\"")
    })
}
