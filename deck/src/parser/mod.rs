pub mod error;
pub mod front_matter;

pub use error::{ParseError, ParseErrorKind};

use tracing::debug;

use crate::meta::Meta;
use crate::{Deck, SLIDE_DELIMITER, normalize};

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser {
            source: normalize(&source),
            file_id,
        }
    }

    /// The normalized source that diagnostic spans refer to.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse the source into a Deck. Warnings are returned alongside the
    /// deck; any error fails the parse.
    pub fn parse(&self) -> Result<(Deck, Vec<ParseError>), Vec<ParseError>> {
        let (deck, diagnostics) = self.parse_lenient();
        if diagnostics.iter().any(|d| !d.is_warning()) {
            return Err(diagnostics);
        }
        Ok((deck, diagnostics))
    }

    /// Parse the source, falling back to default metadata when the front
    /// matter cannot be decoded. Always produces a deck.
    pub fn parse_lenient(&self) -> (Deck, Vec<ParseError>) {
        let mut diagnostics = Vec::new();
        let mut meta = Meta::defaults();
        let mut body_start = 0;

        if let Some(block) = front_matter::locate(&self.source) {
            match front_matter::decode(&block, self.file_id) {
                Ok(front_matter) if !front_matter.is_empty() => {
                    meta = Meta::from_front_matter(&front_matter);
                    body_start = block.body_start;
                }
                Ok(_) => {
                    diagnostics.push(
                        ParseError::new(
                            ParseErrorKind::NoKnownKeys,
                            block.content_span.clone(),
                            self.file_id,
                        )
                        .with_note("known keys: theme, author, date, paging"),
                    );
                }
                Err(err) => diagnostics.push(err),
            }
        }

        let mut slides = Vec::new();
        let mut start = body_start;
        let body = &self.source[body_start..];
        let mut pieces: Vec<(usize, &str)> = Vec::new();
        for (offset, _) in body.match_indices(SLIDE_DELIMITER) {
            let at = body_start + offset;
            pieces.push((start, &self.source[start..at]));
            start = at + SLIDE_DELIMITER.len();
        }
        pieces.push((start, &self.source[start..]));

        for (index, (offset, slide)) in pieces.into_iter().enumerate() {
            if slide.trim().is_empty() {
                diagnostics.push(ParseError::new(
                    ParseErrorKind::EmptySlide(index + 1),
                    offset..offset + slide.len(),
                    self.file_id,
                ));
            }
            slides.push(slide.to_string());
        }

        debug!(slides = slides.len(), diagnostics = diagnostics.len(), "parsed deck");
        (Deck { slides, meta }, diagnostics)
    }
}
