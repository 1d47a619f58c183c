pub mod code;
pub mod error;
pub mod meta;
pub mod navigation;
pub mod parser;
pub mod source;

pub use error::Error;

use tracing::warn;

use crate::meta::Meta;
use crate::parser::Parser;

/// Separator between two slides.
pub const SLIDE_DELIMITER: &str = "\n---\n";

/// A loaded presentation.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Raw markdown of each slide, in order. Never empty.
    pub slides: Vec<String>,
    pub meta: Meta,
}

impl Deck {
    /// Build a deck from document text. Front matter that cannot be decoded
    /// is logged and replaced by default metadata.
    pub fn load(source: &str) -> Deck {
        let (deck, diagnostics) = Parser::new(source.to_string(), 0).parse_lenient();
        for diagnostic in diagnostics.iter().filter(|d| !d.is_warning()) {
            warn!(message = %diagnostic, "front matter ignored");
        }
        deck
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, page: usize) -> Option<&str> {
        self.slides.get(page).map(String::as_str)
    }
}

/// Strip carriage returns so the slide delimiter matches on every platform.
pub fn normalize(source: &str) -> String {
    source.replace('\r', "")
}
