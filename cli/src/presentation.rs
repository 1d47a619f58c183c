//! The presentation controller: current page, addressing state, inline
//! execution output, search and live reload.

use deck::code;
use deck::navigation::{self, State};
use deck::{Deck, source};
use sandbox::{HidePolicy, Sandbox};
use tracing::{debug, info, warn};

use crate::search::Search;
use crate::watcher::FileWatcher;

const TAB_SPACES: &str = "    ";
const SCROLL_PAGE: u16 = 10;

/// Execution settings chosen at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub allow_execution: bool,
    pub hide_policy: HidePolicy,
}

pub struct Presentation {
    deck: Deck,
    address: State,
    /// Execution output shown below the slide until the page changes.
    virtual_text: String,
    search: Search,
    watcher: Option<FileWatcher>,
    scroll: u16,
    sandbox: Sandbox,
    settings: Settings,
    quit: bool,
}

impl Presentation {
    pub fn new(deck: Deck, sandbox: Sandbox, settings: Settings) -> Self {
        let address = State::new(0, deck.len());
        Presentation {
            deck,
            address,
            virtual_text: String::new(),
            search: Search::default(),
            watcher: None,
            scroll: 0,
            sandbox,
            settings,
            quit: false,
        }
    }

    /// Reload the deck whenever `watcher` reports a modification.
    pub fn with_watcher(mut self, watcher: FileWatcher) -> Self {
        self.watcher = Some(watcher);
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn page(&self) -> usize {
        self.address.page
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    pub fn virtual_text(&self) -> &str {
        &self.virtual_text
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// `Slide 3 / 10`, per the deck's paging template.
    pub fn paging(&self) -> String {
        self.deck.meta.paging_label(self.page(), self.deck.len())
    }

    /// The text displayed for the current slide: directive comments hidden,
    /// execution output appended.
    pub fn slide_text(&self) -> String {
        let slide = self.deck.slide(self.page()).unwrap_or_default();
        let mut text = code::hide_comments(slide).replace('\t', TAB_SPACES);
        if !self.virtual_text.is_empty() && !text.ends_with('\n') && !self.virtual_text.starts_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.virtual_text);
        text
    }

    pub fn set_page(&mut self, page: usize) {
        let page = page.min(self.deck.len().saturating_sub(1));
        if page == self.address.page {
            return;
        }
        debug!(from = self.address.page, to = page, "page change");
        self.address.page = page;
        self.virtual_text.clear();
        self.scroll = 0;
    }

    /// Handle one key, named the way the terminal front end reports it
    /// (`"l"`, `"G"`, `"ctrl+e"`, `"enter"`, ...).
    pub fn handle_key(&mut self, key: &str) {
        if self.search.is_active() {
            self.handle_search_key(key);
            return;
        }

        match key {
            "/" => self.search.begin(),
            "ctrl+n" => self.search_next(),
            "ctrl+e" => self.execute_slide(),
            "q" | "ctrl+c" => self.quit = true,
            "up" => self.scroll = self.scroll.saturating_sub(1),
            "down" => self.scroll = self.scroll.saturating_add(1),
            "pgup" | "ctrl+u" => self.scroll = self.scroll.saturating_sub(SCROLL_PAGE),
            "pgdown" | "ctrl+d" => self.scroll = self.scroll.saturating_add(SCROLL_PAGE),
            "home" => self.scroll = 0,
            "end" => self.scroll = self.slide_text().lines().count().try_into().unwrap_or(u16::MAX),
            _ => self.navigate(key),
        }
    }

    fn navigate(&mut self, key: &str) {
        let current = self.address.page;
        let mut next = navigation::navigate(self.address.clone(), key);
        let target = next.page;
        next.page = current;
        self.address = next;
        self.set_page(target);
    }

    fn handle_search_key(&mut self, key: &str) {
        match key {
            "enter" => {
                if self.search.submit().is_some() {
                    self.search_next();
                }
            }
            "esc" | "ctrl+c" => self.search.cancel(),
            "backspace" => self.search.pop(),
            _ => {
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    self.search.push(c);
                }
            }
        }
    }

    fn search_next(&mut self) {
        match self.search.find(&self.deck.slides, self.page()) {
            Some(page) => self.set_page(page),
            None => debug!(query = self.search.query(), "no match"),
        }
    }

    /// Run the code blocks of the current slide and show their output.
    pub fn execute_slide(&mut self) {
        let slide = self.deck.slide(self.page()).unwrap_or_default();
        let blocks = match code::parse(slide) {
            Ok(blocks) => blocks,
            Err(err) => {
                self.virtual_text = format!("\n{}", err);
                return;
            }
        };
        if !self.settings.allow_execution {
            self.virtual_text = "\n Execution is disabled".to_string();
            return;
        }

        info!(page = self.page(), blocks = blocks.len(), "executing slide");
        let results = self.sandbox.execute_all(&blocks, self.settings.hide_policy);
        self.virtual_text = results
            .iter()
            .map(|r| r.output.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }

    /// Watch tick: reload the deck if its file changed.
    pub fn tick(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        if !watcher.changed() {
            return;
        }
        match source::read_file(watcher.path()) {
            Ok(content) => {
                info!(path = %watcher.path().display(), "reloading presentation");
                self.reload(Deck::load(&content));
            }
            Err(err) => warn!(error = %err, "reload failed"),
        }
    }

    /// Replace the deck, keeping the page when it still exists.
    pub fn reload(&mut self, deck: Deck) {
        self.deck = deck;
        self.address.total_slides = self.deck.len();
        if self.address.page >= self.deck.len() {
            self.address.page = self.deck.len().saturating_sub(1);
            self.virtual_text.clear();
            self.scroll = 0;
        }
    }
}
