#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::process::Stdio;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::models::ShareContent;
use crate::domain::models::ShareName;
use crate::domain::models::ShareTarget;

/// Pipes the share message into a user configured command, such as a
/// notification tool or a mail client. Arguments are split on whitespace.
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    pub fn new(command: &str) -> CommandShare {
        let mut parts = command.split_whitespace().map(|e| return e.to_string());

        return CommandShare {
            program: parts.next().unwrap_or_default(),
            args: parts.collect(),
        };
    }
}

#[async_trait]
impl ShareTarget for CommandShare {
    fn name(&self) -> ShareName {
        return ShareName::Command;
    }

    #[allow(clippy::implicit_return)]
    async fn share(&self, content: &ShareContent) -> Result<String> {
        if self.program.is_empty() {
            bail!("No share command configured");
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(content.to_message().as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(
                program = self.program,
                status = ?output.status.code(),
                stderr = stderr,
                "Share command failed"
            );
            bail!(format!("Share command {} failed", self.program));
        }

        return Ok("Results shared!".to_string());
    }
}
