#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::AnalysisResult;
use super::ResumeFile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Http,
    Mock,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

/// What to do when the analysis service fails or answers with garbage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Mock,
    Error,
}

impl FailurePolicy {
    pub fn parse(text: &str) -> Result<FailurePolicy> {
        if let Some(policy) = FailurePolicy::iter().find(|e| return e.to_string() == text) {
            return Ok(policy);
        }

        bail!(format!("Unknown failure policy {text}"));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume: ResumeFile,
    pub job_description: String,
}

impl AnalysisRequest {
    /// The description is trimmed here so every backend sends the same text.
    pub fn new(resume: ResumeFile, job_description: &str) -> AnalysisRequest {
        return AnalysisRequest {
            resume,
            job_description: job_description.trim().to_string(),
        };
    }
}

#[async_trait]
pub trait AnalysisBackend {
    fn name(&self) -> BackendName;

    /// Used at startup to warn early when the analysis service is down. A
    /// failure never blocks the wizard.
    async fn health_check(&self) -> Result<()>;

    /// Submits the resume and job description, returning the parsed result.
    /// Any transport, status or decoding failure is an error; callers decide
    /// whether to fall back.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}

pub type BackendBox = Box<dyn AnalysisBackend + Send + Sync>;
