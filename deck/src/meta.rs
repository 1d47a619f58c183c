//! Presentation metadata taken from a document's front matter.

use chrono::Local;
use serde::Deserialize;

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_PAGING: &str = "Slide %d / %d";
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Raw front matter keys. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub theme: String,
    pub author: String,
    pub date: String,
    pub paging: String,
}

impl FrontMatter {
    /// True when none of the known keys carries a value.
    pub fn is_empty(&self) -> bool {
        self.theme.is_empty() && self.author.is_empty() && self.date.is_empty() && self.paging.is_empty()
    }
}

/// Resolved metadata shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    /// Carried for completeness; theming is not applied.
    pub theme: String,
    pub author: String,
    pub date: String,
    pub paging: String,
}

impl Meta {
    /// Metadata for a document without front matter.
    pub fn defaults() -> Self {
        Meta {
            theme: default_theme(),
            author: default_author(),
            date: format_date(DEFAULT_DATE_FORMAT),
            paging: DEFAULT_PAGING.to_string(),
        }
    }

    /// Fill the keys missing from `front_matter` with defaults.
    pub fn from_front_matter(front_matter: &FrontMatter) -> Self {
        let fallback = Meta::defaults();
        Meta {
            theme: or_fallback(&front_matter.theme, fallback.theme),
            author: or_fallback(&front_matter.author, fallback.author),
            date: if front_matter.date.is_empty() {
                fallback.date
            } else {
                format_date(&front_matter.date)
            },
            paging: or_fallback(&front_matter.paging, fallback.paging),
        }
    }

    /// Render the paging template for a zero-based page.
    pub fn paging_label(&self, page: usize, total: usize) -> String {
        match self.paging.matches("%d").count() {
            2 => self
                .paging
                .replacen("%d", &(page + 1).to_string(), 1)
                .replacen("%d", &total.to_string(), 1),
            1 => self.paging.replacen("%d", &(page + 1).to_string(), 1),
            _ => self.paging.clone(),
        }
    }
}

fn or_fallback(value: &str, fallback: String) -> String {
    if value.is_empty() { fallback } else { value.to_string() }
}

fn default_theme() -> String {
    std::env::var("GLAMOUR_STYLE")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_THEME.to_string())
}

fn default_author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

/// Longest token first where one is a prefix of another.
const DATE_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("mm", "%-m"),
    ("DD", "%d"),
    ("dd", "%-d"),
];

/// Render a date value. A value containing format tokens (`YYYY`, `MM`,
/// `dd`, ...) becomes today's date in that format; anything else is kept
/// verbatim.
pub fn format_date(value: &str) -> String {
    let mut format = String::with_capacity(value.len() + 8);
    let mut has_token = false;
    let mut rest = value;

    while let Some(c) = rest.chars().next() {
        if let Some((token, spec)) = DATE_TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            format.push_str(spec);
            rest = &rest[token.len()..];
            has_token = true;
            continue;
        }
        if c == '%' {
            format.push_str("%%");
        } else {
            format.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    if !has_token {
        return value.to_string();
    }
    Local::now().format(&format).to_string()
}
