use deck::navigation::{Key, State, navigate};

const TOTAL: usize = 11;

fn feed(keys: &str) -> State {
    feed_from(State::new(0, TOTAL), keys)
}

fn feed_from(state: State, keys: &str) -> State {
    keys.chars()
        .fold(state, |state, key| navigate(state, &key.to_string()))
}

#[test]
fn key_sequences() {
    let cases = [
        ("", 0),
        ("l", 1),
        ("jjjjjjjjjj", 0),
        ("jjjjjjjjjjjjj", 0),
        ("G", 10),
        ("llgg", 0),
        ("2jll", 2),
        ("0jl", 1),
        ("-11G", 10),
        ("0G", 0),
        ("3G", 2),
        ("11G", 10),
        ("101G", 10),
        ("nnN", 1),
    ];

    for (keys, target) in cases {
        let state = feed(keys);
        assert_eq!(state, State::new(target, TOTAL), "keys: {:?}", keys);
    }
}

#[test]
fn page_stays_in_range() {
    let sequences = ["lllllllllllllll", "99999G", "G l l n", "5j", "gGgGl", "-G", "--3j"];
    for keys in sequences {
        let state = feed(keys);
        assert!(state.page < TOTAL, "keys {:?} left page {}", keys, state.page);
    }
}

#[test]
fn double_g_goes_to_first_from_anywhere() {
    for page in 0..TOTAL {
        let state = feed_from(State::new(page, TOTAL), "gg");
        assert_eq!(state.page, 0);
    }
}

#[test]
fn absolute_jump_is_one_indexed() {
    for n in 0..=TOTAL {
        let state = feed(&format!("{}G", n));
        assert_eq!(state.page, n.saturating_sub(1).min(TOTAL - 1), "{}G", n);
        assert!(state.buffer.is_empty());
    }
}

#[test]
fn negative_prefix_jumps_to_last() {
    for digits in ["0", "1", "5", "42", "10000"] {
        let state = feed(&format!("-{}G", digits));
        assert_eq!(state.page, TOTAL - 1);
    }
}

#[test]
fn large_repeat_count_clamps_at_first() {
    let state = feed_from(State::new(7, TOTAL), "123456789012345678901234567890j");
    assert_eq!(state.page, 0);
    assert!(state.buffer.is_empty());
}

#[test]
fn backward_consumes_count() {
    let state = feed_from(State::new(8, TOTAL), "3j");
    assert_eq!(state, State::new(5, TOTAL));
}

#[test]
fn forward_keeps_pending_count() {
    let state = feed("3l");
    assert_eq!(state.page, 1);
    assert_eq!(state.buffer, "3");

    // The count is still there for the next consuming key.
    let state = feed_from(state, "j");
    assert_eq!(state, State::new(0, TOTAL));
}

#[test]
fn forward_stops_at_last_slide() {
    let state = feed_from(State::new(TOTAL - 1, TOTAL), "l");
    assert_eq!(state.page, TOTAL - 1);
}

#[test]
fn single_g_is_pending() {
    let state = feed_from(State::new(4, TOTAL), "g");
    assert_eq!(state.page, 4);
    assert!(state.pending_first);
}

#[test]
fn other_key_cancels_pending_g() {
    let state = feed_from(State::new(4, TOTAL), "gxg");
    assert_eq!(state.page, 4);
    assert!(state.pending_first);

    let state = feed_from(State::new(4, TOTAL), "glg");
    assert_eq!(state.page, 5);
}

#[test]
fn unrecognized_keys_keep_buffer() {
    let mut state = feed("12");
    for key in ["h", "k", "x", "ctrl+e", "enter"] {
        state = navigate(state, key);
    }
    assert_eq!(state.buffer, "12");
    assert_eq!(state.page, 0);
}

#[test]
fn key_classes() {
    assert_eq!(Key::parse("7"), Key::Digit('7'));
    assert_eq!(Key::parse("-"), Key::Sign);
    assert_eq!(Key::parse("n"), Key::Forward);
    assert_eq!(Key::parse("N"), Key::Backward);
    assert_eq!(Key::parse("g"), Key::First);
    assert_eq!(Key::parse("G"), Key::Last);
    assert_eq!(Key::parse("ctrl+n"), Key::Other);
    assert_eq!(Key::parse(""), Key::Other);
}

#[test]
fn single_slide_deck() {
    let state = feed_from(State::new(0, 1), "lllG5Gjgg");
    assert_eq!(state.page, 0);
}

#[test]
fn forward_at_the_largest_page_does_not_overflow() {
    let state = State {
        page: usize::MAX,
        ..State::new(0, usize::MAX)
    };
    let state = navigate(state, "l");
    assert_eq!(state.page, usize::MAX - 1);
}
