//! Incremental slide search, entered with `/`.

use deck::code::hide_comments;

#[derive(Debug, Default)]
pub struct Search {
    active: bool,
    input: String,
    /// The last submitted query, reused by `ctrl+n`.
    query: String,
}

impl Search {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn begin(&mut self) {
        self.active = true;
        self.input.clear();
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.input.clear();
    }

    /// Close the prompt. Returns the query when one was typed.
    pub fn submit(&mut self) -> Option<&str> {
        self.active = false;
        if self.input.is_empty() {
            return None;
        }
        self.query = std::mem::take(&mut self.input);
        Some(&self.query)
    }

    /// The next slide after `page` containing the query, wrapping around.
    /// The current slide is checked last.
    pub fn find(&self, slides: &[String], page: usize) -> Option<usize> {
        if self.query.is_empty() || slides.is_empty() {
            return None;
        }
        let case_sensitive = self.query.chars().any(char::is_uppercase);
        let needle = if case_sensitive {
            self.query.clone()
        } else {
            self.query.to_lowercase()
        };

        (1..=slides.len())
            .map(|offset| (page + offset) % slides.len())
            .find(|&i| {
                let text = hide_comments(&slides[i]);
                if case_sensitive {
                    text.contains(&needle)
                } else {
                    text.to_lowercase().contains(&needle)
                }
            })
    }
}
