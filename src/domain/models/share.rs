#[cfg(test)]
#[path = "share_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumVariantNames;

use super::AnalysisResult;

pub const SHARE_TITLE: &str = "My Resume Analysis Results";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareContent {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareContent {
    /// The score reads "high" when the result has none, matching what the
    /// share text says before the result is known.
    pub fn for_result(result: Option<&AnalysisResult>, url: &str) -> ShareContent {
        let score = result
            .and_then(|res| return res.match_score)
            .map(|score| return score.to_string())
            .unwrap_or_else(|| return "high".to_string());

        return ShareContent {
            title: SHARE_TITLE.to_string(),
            text: format!("I got a {score}% match for this job position!"),
            url: url.to_string(),
        };
    }

    /// Body handed to an external share command on stdin.
    pub fn to_message(&self) -> String {
        return format!("{}\n\n{}\n{}\n", self.title, self.text, self.url);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ShareName {
    Command,
    Clipboard,
}

#[async_trait]
pub trait ShareTarget {
    fn name(&self) -> ShareName;

    /// Hands the content to the platform. Returns the success message shown
    /// to the user.
    async fn share(&self, content: &ShareContent) -> Result<String>;
}

pub type ShareBox = Box<dyn ShareTarget + Send + Sync>;
