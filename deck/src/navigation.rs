use std::num::IntErrorKind;

/// Addressing state carried between keystrokes.
///
/// The caller owns this value and feeds it back into [`navigate`] with each
/// key. `page` is always a valid index into a deck of `total_slides` slides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// Unconsumed numeric prefix (digits, optionally a leading `-`).
    pub buffer: String,
    pub page: usize,
    pub total_slides: usize,
    /// One `g` has been seen; a second one jumps to the first slide.
    pub pending_first: bool,
}

impl State {
    pub fn new(page: usize, total_slides: usize) -> Self {
        State {
            buffer: String::new(),
            page,
            total_slides,
            pending_first: false,
        }
    }

    fn last_page(&self) -> usize {
        self.total_slides.saturating_sub(1)
    }
}

/// The key classes understood by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `0`-`9`
    Digit(char),
    /// `-`
    Sign,
    /// `l`, `n`
    Forward,
    /// `j`, `N`
    Backward,
    /// `g`
    First,
    /// `G`
    Last,
    /// Anything else.
    Other,
}

impl Key {
    /// Classify a key name as reported by the terminal front end
    /// (`"l"`, `"G"`, `"ctrl+e"`, ...).
    pub fn parse(key: &str) -> Key {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Key::Other;
        };
        match c {
            '0'..='9' => Key::Digit(c),
            '-' => Key::Sign,
            'l' | 'n' => Key::Forward,
            'j' | 'N' => Key::Backward,
            'g' => Key::First,
            'G' => Key::Last,
            _ => Key::Other,
        }
    }
}

/// Resolve one keystroke against the current addressing state.
pub fn navigate(state: State, key: &str) -> State {
    navigate_key(state, Key::parse(key))
}

/// Same as [`navigate`] for an already classified key.
pub fn navigate_key(mut state: State, key: Key) -> State {
    let pending_first = std::mem::take(&mut state.pending_first);

    match key {
        Key::Digit(c) => state.buffer.push(c),
        Key::Sign => state.buffer.push('-'),
        Key::Forward => {
            state.page = state.page.saturating_add(1).min(state.last_page());
        }
        Key::Backward => {
            let count = match parse_count(&state.buffer) {
                Some(n) if n > 0 => n,
                _ => 1,
            };
            state.page = state.page.saturating_sub(count);
            state.buffer.clear();
        }
        Key::First => {
            if pending_first {
                state.page = 0;
                state.buffer.clear();
            } else {
                state.pending_first = true;
            }
        }
        Key::Last => {
            state.page = match parse_count(&state.buffer) {
                Some(n) => n.saturating_sub(1).min(state.last_page()),
                None => state.last_page(),
            };
            state.buffer.clear();
        }
        Key::Other => {}
    }

    state.page = state.page.min(state.last_page());
    state
}

/// Parse the buffer as an unsigned count. Counts too large to represent
/// saturate; anything that is not plain digits is rejected.
fn parse_count(buffer: &str) -> Option<usize> {
    if buffer.is_empty() || !buffer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match buffer.parse::<usize>() {
        Ok(n) => Some(n),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
        Err(_) => None,
    }
}
