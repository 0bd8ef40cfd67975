#[cfg(test)]
#[path = "text_render_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use scraper::ElementRef;
use scraper::Html;
use scraper::Selector;

use crate::domain::models::hex_to_color;
use crate::domain::models::ListSection;
use crate::domain::models::RecommendationsView;
use crate::domain::models::ResultSection;
use crate::domain::models::ResultView;
use crate::domain::models::ResumePreviewView;
use crate::domain::models::SkillGapsView;
use crate::domain::models::SuitabilityView;
use crate::domain::models::NO_GAPS_TEXT;
use crate::domain::models::NO_RECOMMENDATIONS_TEXT;
use crate::domain::models::RESUME_BLURB;
use crate::domain::models::RESUME_FAILED_TEXT;
use crate::domain::models::RESUME_HEADER;
use crate::domain::models::UNAVAILABLE_TEXT;

const BLOCK_TAGS: [&str; 8] = ["h1", "h2", "h3", "h4", "h5", "h6", "p", "li"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextBlock {
    Heading(String),
    Paragraph(String),
    Bullet(String),
}

fn collapse_whitespace<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    return pieces
        .flat_map(|piece| return piece.split_whitespace())
        .collect::<Vec<&str>>()
        .join(" ");
}

/// Flattens an HTML fragment into headings, paragraphs and bullets. Blocks
/// nested in another block are folded into their parent's text.
pub fn html_to_blocks(html: &str) -> Result<Vec<TextBlock>> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(&BLOCK_TAGS.join(", "))
        .map_err(|err| return anyhow!("Invalid block selector: {err:?}"))?;

    let mut blocks = vec![];
    for element in fragment.select(&selector) {
        let nested = element.ancestors().any(|node| {
            return ElementRef::wrap(node)
                .map(|parent| return BLOCK_TAGS.contains(&parent.value().name()))
                .unwrap_or(false);
        });
        if nested {
            continue;
        }

        let text = collapse_whitespace(element.text());
        if text.is_empty() {
            continue;
        }

        let block = match element.value().name() {
            "li" => TextBlock::Bullet(text),
            "p" => TextBlock::Paragraph(text),
            _ => TextBlock::Heading(text),
        };
        blocks.push(block);
    }

    // Services that answer with plain text produce no block elements.
    if blocks.is_empty() {
        blocks = fragment
            .root_element()
            .text()
            .collect::<String>()
            .lines()
            .map(|line| return line.trim())
            .filter(|line| return !line.is_empty())
            .map(|line| return TextBlock::Paragraph(line.to_string()))
            .collect();
    }

    return Ok(blocks);
}

/// Greedy word wrap. Words longer than the width get a line of their own.
pub fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = vec![];
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.chars().count() > max_width {
            lines.push(current);
            current = String::new();
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    return lines;
}

fn bold() -> Style {
    return Style::default().add_modifier(Modifier::BOLD);
}

pub struct ResultLines {
    pub lines: Vec<Line<'static>>,
    pub sections: Vec<(ResultSection, u16)>,
}

impl ResultLines {
    pub fn offset(&self, section: ResultSection) -> Option<u16> {
        return self
            .sections
            .iter()
            .find(|(entry, _)| return *entry == section)
            .map(|(_, offset)| return *offset);
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }
}

struct LineWriter {
    lines: Vec<Line<'static>>,
    width: usize,
}

impl LineWriter {
    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn styled(&mut self, text: &str, style: Style) {
        for line in wrap_words(text, self.width) {
            self.lines.push(Line::from(Span::styled(line, style)));
        }
    }

    fn text(&mut self, text: &str) {
        self.styled(text, Style::default());
    }

    /// Wraps with a hanging indent so continuation lines align with the text
    /// after the marker.
    fn marked(&mut self, marker: &str, text: &str) {
        let indent = " ".repeat(marker.chars().count());
        let width = self.width.saturating_sub(indent.len()).max(1);
        for (idx, line) in wrap_words(text, width).into_iter().enumerate() {
            if idx == 0 {
                self.lines
                    .push(Line::from(vec![Span::from(marker.to_string()), Span::from(line)]));
            } else {
                self.lines.push(Line::from(format!("{indent}{line}")));
            }
        }
    }

    fn list(&mut self, section: &ListSection) {
        let color = hex_to_color(section.tone.hex_color());
        self.lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", section.tone.glyph()),
                Style::default().fg(color),
            ),
            Span::styled(section.tone.heading(), bold()),
        ]));

        for item in section.items.iter() {
            self.marked("  • ", item);
        }
        self.blank();
    }

    fn optional_list(&mut self, section: &Option<ListSection>) {
        if let Some(section) = section {
            self.list(section);
        }
    }

    fn blocks(&mut self, blocks: &[TextBlock]) {
        for block in blocks {
            match block {
                TextBlock::Heading(text) => {
                    self.blank();
                    self.styled(text, bold());
                }
                TextBlock::Paragraph(text) => self.text(text),
                TextBlock::Bullet(text) => self.marked("  • ", text),
            }
        }
    }
}

fn suitability_lines(writer: &mut LineWriter, view: &SuitabilityView) {
    match view {
        SuitabilityView::Unavailable => writer.text(UNAVAILABLE_TEXT),
        SuitabilityView::Available {
            overall,
            strengths,
            concerns,
        } => {
            writer.styled("Overall Assessment", bold());
            writer.text(overall);
            writer.blank();
            writer.optional_list(strengths);
            writer.optional_list(concerns);
        }
    }
}

fn skill_gaps_lines(writer: &mut LineWriter, view: &SkillGapsView) {
    match view {
        SkillGapsView::Unavailable => writer.text(UNAVAILABLE_TEXT),
        SkillGapsView::NoGaps => writer.text(NO_GAPS_TEXT),
        SkillGapsView::Gaps { missing, weak } => {
            writer.optional_list(missing);
            writer.optional_list(weak);
        }
    }
}

fn recommendations_lines(writer: &mut LineWriter, view: &RecommendationsView) {
    match view {
        RecommendationsView::Empty => writer.text(NO_RECOMMENDATIONS_TEXT),
        RecommendationsView::Items(items) => {
            for item in items {
                writer.marked(&format!("{}. ", item.number), &item.text);
            }
        }
    }
}

fn resume_lines(writer: &mut LineWriter, view: &ResumePreviewView) {
    match view {
        ResumePreviewView::Failed => writer.text(RESUME_FAILED_TEXT),
        ResumePreviewView::Ready { body_html } => {
            writer.styled(RESUME_HEADER, bold());
            writer.text(RESUME_BLURB);

            match html_to_blocks(body_html) {
                Ok(blocks) => writer.blocks(&blocks),
                Err(err) => {
                    tracing::error!(error = ?err, "Failed to convert optimized resume to text");
                    writer.text(RESUME_FAILED_TEXT);
                }
            }
        }
    }
}

/// Terminal rendition of every result section except the score, which the
/// results screen draws as a gauge.
pub fn result_lines(view: &ResultView, width: usize) -> ResultLines {
    let mut writer = LineWriter {
        lines: vec![],
        width: width.max(1),
    };
    let mut sections = vec![];

    let order = [
        ResultSection::Suitability,
        ResultSection::SkillGaps,
        ResultSection::Recommendations,
        ResultSection::Resume,
    ];

    for section in order {
        if !writer.lines.is_empty() {
            writer.blank();
        }

        sections.push((section, writer.lines.len() as u16));
        writer.lines.push(Line::from(Span::styled(
            section.title().to_uppercase(),
            bold().add_modifier(Modifier::UNDERLINED),
        )));
        writer.blank();

        match section {
            ResultSection::Suitability => suitability_lines(&mut writer, &view.suitability),
            ResultSection::SkillGaps => skill_gaps_lines(&mut writer, &view.skill_gaps),
            ResultSection::Recommendations => {
                recommendations_lines(&mut writer, &view.recommendations)
            }
            ResultSection::Resume => resume_lines(&mut writer, &view.resume),
        }
    }

    return ResultLines {
        lines: writer.lines,
        sections,
    };
}

pub fn plain_text(lines: &[Line]) -> String {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.as_ref())
                .collect::<String>();
        })
        .map(|line| return line.trim_end().to_string())
        .collect::<Vec<String>>()
        .join("\n");
}
