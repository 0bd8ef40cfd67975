#[cfg(test)]
#[path = "export_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;

pub const DOWNLOAD_FILE_NAME: &str = "optimized-resume.html";

const DOCUMENT_STYLE: &str = r#"body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
        .resume-section { margin-bottom: 20px; }
        h3, h4, h5 { color: #333; }
        ul { padding-left: 20px; }
        .job { margin-bottom: 15px; }"#;

pub fn standalone_document(fragment: &str) -> String {
    return format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Optimized Resume</title>
    <style>
        {DOCUMENT_STYLE}
    </style>
</head>
<body>
{fragment}
</body>
</html>
"#
    );
}

/// Writes the optimized resume as a standalone document, replacing any
/// earlier download in the same directory.
pub async fn write_download(dir: &path::Path, fragment: &str) -> Result<path::PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).await?;
    }

    let file_path = dir.join(DOWNLOAD_FILE_NAME);
    fs::write(&file_path, standalone_document(fragment)).await?;
    tracing::info!(path = ?file_path, "Wrote optimized resume");

    return Ok(file_path);
}
