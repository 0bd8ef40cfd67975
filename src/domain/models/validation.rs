#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;

use std::fmt;

use super::ResumeFile;

pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// User correctable failures. The display string is what ends up in the
/// notification slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    UnsupportedFileType,
    FileTooLarge,
    FileUnreadable(String),
    ResumeRequired,
    JobDescriptionTooShort,
    AnalysisPrerequisites,
    NoResultToDownload,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::UnsupportedFileType => {
                return write!(f, "Please upload a PDF, DOC, DOCX, or TXT file.")
            }
            ValidationError::FileTooLarge => return write!(f, "File size must be less than 10MB."),
            ValidationError::FileUnreadable(path) => {
                return write!(f, "Could not read {path}. Check the path and try again.")
            }
            ValidationError::ResumeRequired => {
                return write!(f, "Please upload a resume file to proceed.")
            }
            ValidationError::JobDescriptionTooShort => {
                return write!(f, "Please enter a job description (min 50 characters).")
            }
            ValidationError::AnalysisPrerequisites => {
                return write!(f, "Please upload a resume and enter a job description.")
            }
            ValidationError::NoResultToDownload => {
                return write!(f, "No resume available for download.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn has_resume(file: &Option<ResumeFile>) -> bool {
    return file.is_some();
}

pub fn job_description_ready(text: &str) -> bool {
    return text.trim().chars().count() >= MIN_JOB_DESCRIPTION_CHARS;
}

pub fn is_allowed_mime(mime: &str) -> bool {
    return ALLOWED_MIME_TYPES.contains(&mime);
}

/// Type first, then size. A file failing both is reported as the wrong type.
pub fn validate_upload(mime: &str, size: u64) -> Result<(), ValidationError> {
    if !is_allowed_mime(mime) {
        return Err(ValidationError::UnsupportedFileType);
    }

    if size > MAX_RESUME_BYTES {
        return Err(ValidationError::FileTooLarge);
    }

    return Ok(());
}
