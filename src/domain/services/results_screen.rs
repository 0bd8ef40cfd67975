#[cfg(test)]
#[path = "results_screen_test.rs"]
mod tests;

use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Gauge;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;

use super::AppState;
use crate::domain::models::hex_to_color;
use crate::domain::models::ResultSource;

pub const DEMO_BADGE_TEXT: &str =
    "Demo results: the analysis service could not be reached.";
const HINTS: &str =
    "1-4 jump to section, ↑/↓ scroll, d download, s share, e edit, n new analysis, Ctrl+C quit";

pub fn score_color(score: u8) -> Color {
    if score >= 80 {
        return hex_to_color("#10b981");
    }
    if score >= 60 {
        return hex_to_color("#f59e0b");
    }
    return hex_to_color("#ef4444");
}

/// Splits the screen into score header, scrollable body and footer. The body
/// rect is what `AppState::set_rect` is sized against.
pub fn layout(rect: Rect, demo: bool) -> (Rect, Rect, Rect) {
    let header_height = if demo { 4 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(header_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(rect);

    return (chunks[0], chunks[1], chunks[2]);
}

pub fn is_demo(app_state: &AppState) -> bool {
    return app_state.result_source == Some(ResultSource::Fallback);
}

pub fn render<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let demo = is_demo(app_state);
    let (header, body, footer) = layout(rect, demo);
    let score = app_state.displayed_score.min(100);

    let mut gauge_rect = header;
    if demo {
        let header_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1), Constraint::Min(3)])
            .split(header);
        frame.render_widget(
            Paragraph::new(Span::styled(
                DEMO_BADGE_TEXT,
                Style::default()
                    .fg(hex_to_color("#f59e0b"))
                    .add_modifier(Modifier::BOLD),
            )),
            header_chunks[0],
        );
        gauge_rect = header_chunks[1];
    }

    frame.render_widget(
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Match Score"),
            )
            .gauge_style(Style::default().fg(score_color(score)))
            .percent(score as u16)
            .label(format!("{score}%")),
        gauge_rect,
    );

    let lines = app_state
        .result_lines
        .as_ref()
        .map(|e| return e.lines.to_vec())
        .unwrap_or_default();

    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Analysis Results")
                    .padding(Padding::new(1, 1, 0, 0)),
            )
            .scroll((app_state.scroll.position, 0)),
        body,
    );

    let mut scrollbar_state = app_state.scroll.scrollbar_state;
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        body.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            HINTS,
            Style::default().fg(hex_to_color("#6b7280")),
        )),
        footer,
    );
}
