#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use super::AnalysisResult;
use super::SkillGaps;
use super::Suitability;

pub const UNAVAILABLE_TEXT: &str = "Analysis not available.";
pub const NO_GAPS_TEXT: &str = "No significant skill gaps identified.";
pub const NO_RECOMMENDATIONS_TEXT: &str = "No specific recommendations available.";
pub const RESUME_FAILED_TEXT: &str = "Optimized resume generation failed. Please try again.";
pub const RESUME_HEADER: &str = "Your Optimized ATS Resume";
pub const RESUME_BLURB: &str = "This resume has been optimized for Applicant Tracking Systems and tailored to match the job requirements.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListTone {
    Strength,
    Concern,
    Missing,
    Weak,
}

impl ListTone {
    pub fn heading(&self) -> &'static str {
        match self {
            ListTone::Strength => return "Strengths",
            ListTone::Concern => return "Areas of Concern",
            ListTone::Missing => return "Missing Skills",
            ListTone::Weak => return "Areas for Improvement",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ListTone::Strength => return "strengths",
            ListTone::Concern => return "concerns",
            ListTone::Missing => return "missing-skills",
            ListTone::Weak => return "weak-skills",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ListTone::Strength => return "check-circle",
            ListTone::Concern => return "exclamation-triangle",
            ListTone::Missing => return "times-circle",
            ListTone::Weak => return "arrow-up",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ListTone::Strength => return "✔",
            ListTone::Concern => return "⚠",
            ListTone::Missing => return "✘",
            ListTone::Weak => return "↑",
        }
    }

    pub fn hex_color(&self) -> &'static str {
        match self {
            ListTone::Strength => return "#10b981",
            ListTone::Concern => return "#f59e0b",
            ListTone::Missing => return "#ef4444",
            ListTone::Weak => return "#f59e0b",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSection {
    pub tone: ListTone,
    pub items: Vec<String>,
}

impl ListSection {
    /// Empty lists are dropped rather than rendered as an empty heading.
    pub fn from_items(tone: ListTone, items: &[String]) -> Option<ListSection> {
        if items.is_empty() {
            return None;
        }

        return Some(ListSection {
            tone,
            items: items.to_vec(),
        });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SuitabilityView {
    Unavailable,
    Available {
        overall: String,
        strengths: Option<ListSection>,
        concerns: Option<ListSection>,
    },
}

impl SuitabilityView {
    pub fn build(suitability: &Option<Suitability>) -> SuitabilityView {
        match suitability {
            None => return SuitabilityView::Unavailable,
            Some(suitability) => {
                return SuitabilityView::Available {
                    overall: suitability.overall.to_string(),
                    strengths: ListSection::from_items(ListTone::Strength, &suitability.strengths),
                    concerns: ListSection::from_items(ListTone::Concern, &suitability.concerns),
                };
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkillGapsView {
    Unavailable,
    NoGaps,
    Gaps {
        missing: Option<ListSection>,
        weak: Option<ListSection>,
    },
}

impl SkillGapsView {
    pub fn build(skill_gaps: &Option<SkillGaps>) -> SkillGapsView {
        let gaps = match skill_gaps {
            None => return SkillGapsView::Unavailable,
            Some(gaps) => gaps,
        };

        let missing = ListSection::from_items(ListTone::Missing, &gaps.missing);
        let weak = ListSection::from_items(ListTone::Weak, &gaps.weak);
        if missing.is_none() && weak.is_none() {
            return SkillGapsView::NoGaps;
        }

        return SkillGapsView::Gaps { missing, weak };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberedItem {
    pub number: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecommendationsView {
    Empty,
    Items(Vec<NumberedItem>),
}

impl RecommendationsView {
    pub fn build(recommendations: &[String]) -> RecommendationsView {
        if recommendations.is_empty() {
            return RecommendationsView::Empty;
        }

        let items = recommendations
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                return NumberedItem {
                    number: idx + 1,
                    text: text.to_string(),
                };
            })
            .collect();

        return RecommendationsView::Items(items);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResumePreviewView {
    Failed,
    Ready { body_html: String },
}

impl ResumePreviewView {
    pub fn build(optimized_resume: &str) -> ResumePreviewView {
        if optimized_resume.trim().is_empty() {
            return ResumePreviewView::Failed;
        }

        return ResumePreviewView::Ready {
            body_html: optimized_resume.to_string(),
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultSection {
    Suitability,
    SkillGaps,
    Recommendations,
    Resume,
}

impl ResultSection {
    pub fn title(&self) -> &'static str {
        match self {
            ResultSection::Suitability => return "Job Suitability",
            ResultSection::SkillGaps => return "Skill Gaps",
            ResultSection::Recommendations => return "Recommendations",
            ResultSection::Resume => return "Optimized Resume",
        }
    }

    /// Hotkey used to jump to the section in the results screen.
    pub fn from_hotkey(key: char) -> Option<ResultSection> {
        match key {
            '1' => return Some(ResultSection::Suitability),
            '2' => return Some(ResultSection::SkillGaps),
            '3' => return Some(ResultSection::Recommendations),
            '4' => return Some(ResultSection::Resume),
            _ => return None,
        }
    }
}

/// Presentation ready shape of an analysis result. Each section degrades on
/// its own, so a partial result still renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    pub score: u8,
    pub suitability: SuitabilityView,
    pub skill_gaps: SkillGapsView,
    pub recommendations: RecommendationsView,
    pub resume: ResumePreviewView,
}

impl ResultView {
    pub fn build(result: &AnalysisResult) -> ResultView {
        return ResultView {
            score: result.score_target(),
            suitability: SuitabilityView::build(&result.suitability),
            skill_gaps: SkillGapsView::build(&result.skill_gaps),
            recommendations: RecommendationsView::build(&result.recommendations),
            resume: ResumePreviewView::build(&result.optimized_resume),
        };
    }
}
