#[cfg(test)]
#[path = "resume_file_test.rs"]
mod tests;

use std::path;

use tokio::fs;

use super::validate_upload;
use super::ValidationError;

/// Handle to a resume on disk. Contents are only read when the analysis
/// request is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub path: path::PathBuf,
    pub mime: String,
    pub size: u64,
}

/// Terminals paste dropped files as quoted or backslash escaped paths,
/// sometimes as file URLs.
pub fn clean_dropped_path(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = text[1..text.len() - 1].to_string();
        }
    }

    if let Some(stripped) = text.strip_prefix("file://") {
        text = stripped.to_string();
    }

    return text.replace("\\ ", " ");
}

pub fn guess_mime(path: &path::Path) -> String {
    return mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("")
        .to_string();
}

impl ResumeFile {
    pub fn new(path: path::PathBuf, size: u64) -> ResumeFile {
        let name = path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_else(|| return path.to_string_lossy().to_string());
        let mime = guess_mime(&path);

        return ResumeFile {
            name,
            path,
            mime,
            size,
        };
    }

    /// Stats the file and runs upload validation. Nothing is read beyond
    /// metadata, so oversized files are rejected cheaply.
    pub async fn open(raw_path: &str) -> Result<ResumeFile, ValidationError> {
        let cleaned = clean_dropped_path(raw_path);
        let file_path = path::PathBuf::from(&cleaned);

        let metadata = match fs::metadata(&file_path).await {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(path = cleaned, error = ?err, "Unable to stat resume");
                return Err(ValidationError::FileUnreadable(cleaned));
            }
        };

        if !metadata.is_file() {
            return Err(ValidationError::FileUnreadable(cleaned));
        }

        let file = ResumeFile::new(file_path, metadata.len());
        file.validate()?;

        return Ok(file);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        return validate_upload(&self.mime, self.size);
    }
}
