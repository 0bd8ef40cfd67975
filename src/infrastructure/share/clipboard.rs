use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::ShareContent;
use crate::domain::models::ShareName;
use crate::domain::models::ShareTarget;
use crate::domain::services::clipboard::ClipboardService;

#[derive(Default)]
pub struct ClipboardShare {}

#[async_trait]
impl ShareTarget for ClipboardShare {
    fn name(&self) -> ShareName {
        return ShareName::Clipboard;
    }

    #[allow(clippy::implicit_return)]
    async fn share(&self, content: &ShareContent) -> Result<String> {
        ClipboardService::set(content.url.to_string()).await?;
        return Ok("Link copied to clipboard!".to_string());
    }
}
