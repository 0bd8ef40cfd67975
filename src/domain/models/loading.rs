#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::hex_to_color;

pub const LOADING_PHASES: [&str; 4] = [
    "Reading your resume",
    "Parsing the job description",
    "Matching skills and experience",
    "Generating your optimized resume",
];

/// Decorative loading view. The active phase comes from the loading cycler
/// and has no relation to real request progress.
#[derive(Default)]
pub struct Loading {
    pub active_phase: Option<usize>,
}

impl Loading {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Analyzing your resume...",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (idx, phase) in LOADING_PHASES.iter().enumerate() {
            if self.active_phase == Some(idx) {
                lines.push(Line::from(Span::styled(
                    format!("> {phase}"),
                    Style::default()
                        .fg(hex_to_color("#6366f1"))
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(format!("  {phase}")));
            }
        }

        return lines;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .title("Loading")
                        .padding(Padding::new(1, 1, 1, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}
