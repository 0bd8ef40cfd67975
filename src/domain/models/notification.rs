#[cfg(test)]
#[path = "notification_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

pub const NOTIFICATION_TIMEOUT_MS: u64 = 5000;
const MAX_WIDTH: u16 = 48;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            NotificationKind::Success => return "✔",
            NotificationKind::Error => return "✖",
            NotificationKind::Warning => return "▲",
            NotificationKind::Info => return "ℹ",
        }
    }

    pub fn hex_color(&self) -> &'static str {
        match self {
            NotificationKind::Success => return "#10b981",
            NotificationKind::Error => return "#ef4444",
            NotificationKind::Warning => return "#f59e0b",
            NotificationKind::Info => return "#6366f1",
        }
    }

    pub fn color(&self) -> Color {
        return hex_to_color(self.hex_color());
    }
}

pub fn hex_to_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::Reset;
    }

    let channel = |idx: usize| {
        return u8::from_str_radix(&digits[idx..idx + 2], 16).unwrap_or(0);
    };

    return Color::Rgb(channel(0), channel(2), channel(4));
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let width = MAX_WIDTH.min(area.width);
        let text_width = width.saturating_sub(6).max(1) as usize;
        let text_lines = (self.message.chars().count() + 2) / text_width + 1;
        let height = (text_lines as u16 + 2).min(area.height);

        let rect = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + 1.min(area.height),
            width,
            height,
        );

        let color = self.kind.color();
        let line = Line::from(vec![
            Span::styled(
                format!("{} ", self.kind.glyph()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::from(self.message.to_string()),
        ]);

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(line)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color))
                        .title("Esc to dismiss")
                        .padding(Padding::new(1, 1, 0, 0)),
                ),
            rect,
        );
    }
}
