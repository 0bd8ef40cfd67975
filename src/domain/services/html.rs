#[cfg(test)]
#[path = "html_test.rs"]
mod tests;

use crate::domain::models::ListSection;
use crate::domain::models::RecommendationsView;
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

pub fn escape(text: &str) -> String {
    return text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;");
}

fn paragraph(text: &str) -> String {
    return format!("<p>{}</p>", escape(text));
}

fn list_html(section: &ListSection) -> String {
    let items = section
        .items
        .iter()
        .map(|item| return format!("<li>{}</li>", escape(item)))
        .collect::<Vec<String>>()
        .join("");

    return format!(
        r#"<div class="{class}"><h4><i class="fas fa-{icon}" style="color: {color};"></i> {heading}</h4><ul>{items}</ul></div>"#,
        class = section.tone.css_class(),
        icon = section.tone.icon(),
        color = section.tone.hex_color(),
        heading = section.tone.heading(),
    );
}

fn optional_list_html(section: &Option<ListSection>) -> String {
    return section
        .as_ref()
        .map(list_html)
        .unwrap_or_else(|| return "".to_string());
}

pub fn suitability_html(view: &SuitabilityView) -> String {
    match view {
        SuitabilityView::Unavailable => return paragraph(UNAVAILABLE_TEXT),
        SuitabilityView::Available {
            overall,
            strengths,
            concerns,
        } => {
            return format!(
                r#"<div class="suitability-overall"><h4>Overall Assessment</h4>{}</div>{}{}"#,
                paragraph(overall),
                optional_list_html(strengths),
                optional_list_html(concerns)
            );
        }
    }
}

pub fn skill_gaps_html(view: &SkillGapsView) -> String {
    match view {
        SkillGapsView::Unavailable => return paragraph(UNAVAILABLE_TEXT),
        SkillGapsView::NoGaps => return paragraph(NO_GAPS_TEXT),
        SkillGapsView::Gaps { missing, weak } => {
            return format!("{}{}", optional_list_html(missing), optional_list_html(weak));
        }
    }
}

pub fn recommendations_html(view: &RecommendationsView) -> String {
    match view {
        RecommendationsView::Empty => return paragraph(NO_RECOMMENDATIONS_TEXT),
        RecommendationsView::Items(items) => {
            let body = items
                .iter()
                .map(|item| {
                    return format!(
                        r#"<div class="recommendation-item"><div class="rec-number">{}</div>{}</div>"#,
                        item.number,
                        paragraph(&item.text)
                    );
                })
                .collect::<Vec<String>>()
                .join("");

            return format!(r#"<div class="recommendations-list">{body}</div>"#);
        }
    }
}

/// The resume fragment comes from the analysis service as markup and is
/// embedded as is.
pub fn resume_preview_html(view: &ResumePreviewView) -> String {
    match view {
        ResumePreviewView::Failed => return paragraph(RESUME_FAILED_TEXT),
        ResumePreviewView::Ready { body_html } => {
            return format!(
                r#"<div class="resume-content"><div class="resume-header"><h3>{RESUME_HEADER}</h3><p>{RESUME_BLURB}</p></div><div class="resume-body">{body_html}</div></div>"#
            );
        }
    }
}

/// Every section in display order, used for the headless report.
pub fn report_html(view: &ResultView) -> String {
    return format!(
        r#"<div class="match-score"><h2>Match Score</h2><p>{score}%</p></div>
<section id="suitability"><h2>Job Suitability</h2>{suitability}</section>
<section id="skill-gaps"><h2>Skill Gaps</h2>{gaps}</section>
<section id="recommendations"><h2>Recommendations</h2>{recommendations}</section>
<section id="resume"><h2>Optimized Resume</h2>{resume}</section>"#,
        score = view.score,
        suitability = suitability_html(&view.suitability),
        gaps = skill_gaps_html(&view.skill_gaps),
        recommendations = recommendations_html(&view.recommendations),
        resume = resume_preview_html(&view.resume),
    );
}
