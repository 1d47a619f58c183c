//! Screen layout: the slide body above a one-line status bar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::presentation::Presentation;

const ACCENT: Color = Color::Magenta;
const DIM: Color = Color::DarkGray;

pub fn draw(f: &mut Frame, presentation: &Presentation) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Slide
            Constraint::Length(1), // Status
        ])
        .split(f.area());

    draw_slide(f, presentation, chunks[0]);
    draw_status(f, presentation, chunks[1]);
}

fn draw_slide(f: &mut Frame, presentation: &Presentation, area: Rect) {
    let text = presentation.slide_text();
    let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
    let paragraph = Paragraph::new(lines)
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)))
        .wrap(Wrap { trim: false })
        .scroll((presentation.scroll(), 0));
    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame, presentation: &Presentation, area: Rect) {
    let paging = presentation.paging();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(paging.chars().count() as u16 + 2),
        ])
        .split(area);

    let search = presentation.search();
    let left = if search.is_active() {
        Line::from(vec![
            Span::styled("/", Style::default().fg(ACCENT)),
            Span::raw(search.input().to_string()),
        ])
    } else {
        let meta = &presentation.deck().meta;
        Line::from(vec![
            Span::styled(
                format!(" {} ", meta.author),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", meta.date), Style::default().fg(DIM)),
        ])
    };

    f.render_widget(Paragraph::new(left), chunks[0]);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(paging, Style::default().fg(DIM)))),
        chunks[1],
    );
}
