use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

/// What a deck diagnostic reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A front matter block that its format's decoder rejects.
    InvalidFrontMatter { format: &'static str, detail: String },
    /// Front matter with none of theme, author, date, paging.
    NoKnownKeys,
    /// A slide holding only whitespace. 1-based.
    EmptySlide(usize),
}

/// A deck diagnostic anchored to a byte span of the normalized source.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Range<usize>, file_id: usize) -> Self {
        ParseError {
            kind,
            span,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Only undecodable front matter fails a strict parse.
    pub fn severity(&self) -> Severity {
        match self.kind {
            ParseErrorKind::InvalidFrontMatter { .. } => Severity::Error,
            ParseErrorKind::NoKnownKeys | ParseErrorKind::EmptySlide(_) => Severity::Warning,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }

    /// Stable identifier shown next to the severity, e.g. `warning[empty-slide]`.
    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::InvalidFrontMatter { .. } => "front-matter",
            ParseErrorKind::NoKnownKeys => "unknown-keys",
            ParseErrorKind::EmptySlide(_) => "empty-slide",
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::InvalidFrontMatter { format, detail } => {
                format!("invalid {} front matter: {}", format, detail)
            }
            ParseErrorKind::NoKnownKeys => "front matter has no known keys".to_string(),
            ParseErrorKind::EmptySlide(number) => format!("slide {} is empty", number),
        }
    }

    fn label(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::InvalidFrontMatter { .. } => "cannot decode this",
            ParseErrorKind::NoKnownKeys => "kept as part of the first slide",
            ParseErrorKind::EmptySlide(_) => "nothing between these delimiters",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(self.severity())
            .with_code(self.code())
            .with_message(self.message())
            .with_labels(vec![
                Label::primary(self.file_id, self.span.clone()).with_message(self.label()),
            ])
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
