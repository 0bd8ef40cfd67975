#[cfg(test)]
#[path = "textarea_test.rs"]
mod tests;

use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use tui_textarea::Input;
use tui_textarea::Key;

pub struct TextArea {}

impl<'a> TextArea {
    fn with_title(title: &str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title.to_string())
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }

    pub fn path_input() -> tui_textarea::TextArea<'a> {
        return TextArea::with_title("Resume path (PDF, DOC, DOCX or TXT), Enter to attach");
    }

    pub fn job_description() -> tui_textarea::TextArea<'a> {
        return TextArea::with_title("Paste the job description");
    }

    /// Replays text as key presses so pasted newlines become real line breaks.
    pub fn insert_text(textarea: &mut tui_textarea::TextArea<'a>, text: &str) {
        for char in text.replace("\r\n", "\n").chars() {
            let key = match char {
                '\n' | '\r' => Key::Enter,
                '\t' => Key::Tab,
                _ => Key::Char(char),
            };

            textarea.input(Input {
                key,
                ctrl: false,
                alt: false,
            });
        }
    }

    pub fn text(textarea: &tui_textarea::TextArea<'a>) -> String {
        return textarea.lines().join("\n");
    }
}
