use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::AnalysisBackend;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::AnalysisResult;
use crate::domain::models::BackendName;

/// Offline demo backend. Never touches the network and always answers with the
/// mock result.
#[derive(Default)]
pub struct MockBackend {}

#[async_trait]
impl AnalysisBackend for MockBackend {
    fn name(&self) -> BackendName {
        return BackendName::Mock;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        tracing::debug!(file = request.resume.name, "Answering with demo analysis");
        return Ok(AnalysisResult::mock());
    }
}
