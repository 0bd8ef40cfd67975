#[cfg(test)]
#[path = "wizard_screen_test.rs"]
mod tests;

use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;

use super::AppState;
use crate::domain::models::hex_to_color;
use crate::domain::models::IndicatorState;
use crate::domain::models::ProgressMarkers;
use crate::domain::models::ResumeFile;
use crate::domain::models::StepIndicator;
use crate::domain::models::WizardStep;
use crate::domain::models::MIN_JOB_DESCRIPTION_CHARS;
use crate::domain::models::PROGRESS_MARKER_COUNT;

const ACCENT: &str = "#6366f1";
const COMPLETED: &str = "#10b981";
const MUTED: &str = "#6b7280";
const PREVIEW_CHARS: usize = 280;

pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    if bytes < 1024 * 1024 {
        return format!("{:.1} KB", bytes as f64 / 1024.0);
    }
    return format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0));
}

pub fn stepper_line(indicators: &[StepIndicator]) -> Line<'static> {
    let mut spans = vec![];
    for (idx, indicator) in indicators.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ── ", Style::default().fg(hex_to_color(MUTED))));
        }

        let number = indicator.step.index() + 1;
        let span = match indicator.state {
            IndicatorState::Active => Span::styled(
                format!("({number}) {}", indicator.step.title()),
                Style::default()
                    .fg(hex_to_color(ACCENT))
                    .add_modifier(Modifier::BOLD),
            ),
            IndicatorState::Completed => Span::styled(
                format!("✔ {}", indicator.step.title()),
                Style::default().fg(hex_to_color(COMPLETED)),
            ),
            IndicatorState::Pending => Span::styled(
                format!("({number}) {}", indicator.step.title()),
                Style::default().fg(hex_to_color(MUTED)),
            ),
        };
        spans.push(span);
    }

    return Line::from(spans);
}

pub fn markers_line(progress: &ProgressMarkers) -> Line<'static> {
    let mut spans = vec![Span::from("Progress ")];
    for marker in 1..=PROGRESS_MARKER_COUNT {
        if progress.is_active(marker) {
            spans.push(Span::styled("● ", Style::default().fg(hex_to_color(ACCENT))));
        } else {
            spans.push(Span::styled("○ ", Style::default().fg(hex_to_color(MUTED))));
        }
    }

    return Line::from(spans);
}

pub fn character_count_line(count: usize, ready: bool) -> Line<'static> {
    let style = if ready {
        Style::default().fg(hex_to_color(COMPLETED))
    } else {
        Style::default().fg(hex_to_color(MUTED))
    };

    let mut spans = vec![Span::styled(format!("{count} characters"), style)];
    if !ready {
        spans.push(Span::styled(
            format!(" (at least {MIN_JOB_DESCRIPTION_CHARS} needed)"),
            Style::default().fg(hex_to_color(MUTED)),
        ));
    }

    return Line::from(spans);
}

fn file_line(file: &ResumeFile) -> Line<'static> {
    return Line::from(vec![
        Span::styled("📄 ", Style::default().fg(hex_to_color(ACCENT))),
        Span::styled(
            file.name.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" ({})", format_size(file.size))),
    ]);
}

pub fn analyze_button_line(enabled: bool) -> Line<'static> {
    if enabled {
        return Line::from(Span::styled(
            " Analyze (Enter) ",
            Style::default()
                .fg(Color::White)
                .bg(hex_to_color(ACCENT))
                .add_modifier(Modifier::BOLD),
        ));
    }

    return Line::from(Span::styled(
        " Analyze (disabled) ",
        Style::default()
            .fg(hex_to_color(MUTED))
            .add_modifier(Modifier::DIM),
    ));
}

pub fn hints(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Upload => {
            return "Drop a file or type its path, Enter attach/continue, Ctrl+X remove, Ctrl+N next, Ctrl+C quit"
        }
        WizardStep::JobDescription => {
            return "Ctrl+N next, Ctrl+B back, Ctrl+L clear, Ctrl+C quit"
        }
        WizardStep::Review => {
            return "Enter or Ctrl+A analyze, Ctrl+B back, Ctrl+X remove resume, Ctrl+C quit"
        }
    }
}

/// Description excerpt for the review panel, cut on a character boundary.
pub fn description_preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }

    let cut = trimmed.chars().take(PREVIEW_CHARS).collect::<String>();
    return format!("{}...", cut.trim_end());
}

fn panel(title: &str) -> Block<'static> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title.to_string())
        .padding(Padding::new(1, 1, 0, 0));
}

fn render_upload<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(1)])
        .split(rect);

    frame.render_widget(app_state.path_input.widget(), layout[0]);

    let lines = match &app_state.session.uploaded_file {
        Some(file) => vec![
            file_line(file),
            Line::from(""),
            Line::from("Press Enter or Ctrl+N to continue, Ctrl+X to remove the file."),
        ],
        None => vec![
            Line::from("Drag and drop your resume onto the terminal, or type its path above."),
            Line::from(Span::styled(
                "PDF, DOC, DOCX or TXT, up to 10MB.",
                Style::default().fg(hex_to_color(MUTED)),
            )),
        ],
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Resume")),
        layout[1],
    );
}

fn render_job_description<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(3), Constraint::Length(1)])
        .split(rect);

    frame.render_widget(app_state.description_input.widget(), layout[0]);
    frame.render_widget(
        Paragraph::new(character_count_line(
            app_state.session.character_count(),
            app_state.session.job_description_ready(),
        ))
        .alignment(Alignment::Right),
        layout[1],
    );
}

fn render_review<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let mut lines = vec![Line::from(Span::styled(
        "Resume",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    match &app_state.session.uploaded_file {
        Some(file) => lines.push(file_line(file)),
        None => lines.push(Line::from(Span::styled(
            "No resume attached.",
            Style::default().fg(hex_to_color("#ef4444")),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Job description",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(character_count_line(
        app_state.session.character_count(),
        app_state.session.job_description_ready(),
    ));
    for line in description_preview(&app_state.session.job_description).lines() {
        lines.push(Line::from(line.to_string()));
    }

    lines.push(Line::from(""));
    lines.push(analyze_button_line(app_state.session.can_analyze()));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel("Review & analyze")),
        rect,
    );
}

pub fn render<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(rect);

    let step = app_state.session.current_step;
    frame.render_widget(
        Paragraph::new(vec![
            stepper_line(&app_state.session.indicators()),
            markers_line(&app_state.session.progress),
        ]),
        layout[0],
    );

    match step {
        WizardStep::Upload => render_upload(frame, layout[1], app_state),
        WizardStep::JobDescription => render_job_description(frame, layout[1], app_state),
        WizardStep::Review => render_review(frame, layout[1], app_state),
    }

    frame.render_widget(
        Paragraph::new(Span::styled(
            hints(step),
            Style::default().fg(hex_to_color(MUTED)),
        )),
        layout[2],
    );
}
