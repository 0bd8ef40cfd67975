use anyhow::Result;
use ratatui::backend::TestBackend;
use ratatui::prelude::Line;
use ratatui::Terminal;

use super::character_count_line;
use super::description_preview;
use super::format_size;
use super::markers_line;
use super::render;
use super::stepper_line;
use crate::domain::models::step_indicators;
use crate::domain::models::FailurePolicy;
use crate::domain::models::ProgressMarkers;
use crate::domain::models::ResumeFile;
use crate::domain::models::WizardStep;
use crate::domain::services::AppState;

fn line_text(line: &Line) -> String {
    return line
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<String>();
}

fn draw(app_state: &AppState) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(100, 20))?;
    terminal.draw(|frame| {
        render(frame, frame.size(), app_state);
    })?;

    let buffer = terminal.backend().buffer();
    let text = buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| {
            return row
                .iter()
                .map(|cell| return cell.symbol.to_string())
                .collect::<String>();
        })
        .collect::<Vec<String>>()
        .join("\n");

    return Ok(text);
}

#[test]
fn it_formats_file_sizes() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2048), "2.0 KB");
    assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
}

#[test]
fn it_marks_completed_steps() {
    let line = stepper_line(&step_indicators(WizardStep::Review));

    insta::assert_snapshot!(line_text(&line), @"✔ Upload resume ── ✔ Job description ── (3) Review & analyze");
}

#[test]
fn it_lights_progress_markers() {
    let mut progress = ProgressMarkers::default();
    assert_eq!(line_text(&markers_line(&progress)), "Progress ● ○ ○ ");

    progress.activate(2);
    assert_eq!(line_text(&markers_line(&progress)), "Progress ● ● ○ ");
}

#[test]
fn it_counts_characters() {
    assert_eq!(
        line_text(&character_count_line(12, false)),
        "12 characters (at least 50 needed)"
    );
    assert_eq!(line_text(&character_count_line(64, true)), "64 characters");
}

#[test]
fn it_shortens_long_descriptions() {
    let text = "word ".repeat(100);
    let preview = description_preview(&text);

    assert!(preview.ends_with("..."));
    assert!(preview.chars().count() <= 283);
    assert_eq!(description_preview("  short  "), "short");
}

#[test]
fn it_draws_the_upload_step() -> Result<()> {
    let app_state = AppState::new("http://localhost:5000", FailurePolicy::Mock);
    let screen = draw(&app_state)?;

    assert!(screen.contains("(1) Upload resume"));
    assert!(screen.contains("Drag and drop your resume onto the terminal"));

    return Ok(());
}

#[test]
fn it_draws_the_review_step() -> Result<()> {
    let mut app_state = AppState::new("http://localhost:5000", FailurePolicy::Mock);
    app_state.session.uploaded_file = Some(ResumeFile::new("/tmp/cv.pdf".into(), 2048));
    app_state.session.show_step(WizardStep::Review);
    let screen = draw(&app_state)?;

    assert!(screen.contains("cv.pdf (2.0 KB)"));
    assert!(screen.contains("Analyze (disabled)"));

    return Ok(());
}
