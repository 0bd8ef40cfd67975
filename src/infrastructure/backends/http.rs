#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use tokio::fs;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnalysisBackend;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::AnalysisResult;
use crate::domain::models::BackendName;

pub struct HttpBackend {
    url: String,
    timeout: String,
    health_check_timeout: String,
}

impl Default for HttpBackend {
    fn default() -> HttpBackend {
        return HttpBackend {
            url: Config::get(ConfigKey::ApiUrl),
            timeout: Config::get(ConfigKey::RequestTimeout),
            health_check_timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl HttpBackend {
    fn endpoint(&self, path: &str) -> String {
        return format!("{}{path}", self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    fn name(&self) -> BackendName {
        return BackendName::Http;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(self.endpoint("/api/health"))
            .timeout(Duration::from_millis(
                self.health_check_timeout.parse::<u64>()?,
            ))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, url = self.url, "Analysis service is not running");
                bail!("Analysis service is not running");
            }
        };

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Analysis service health check failed"
            );
            bail!("Analysis service health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        // Read at submit time so a file removed after attaching fails here.
        let bytes = fs::read(&request.resume.path).await?;
        let resume_part = multipart::Part::bytes(bytes)
            .file_name(request.resume.name.to_string())
            .mime_str(&request.resume.mime)?;

        let form = multipart::Form::new()
            .part("resume", resume_part)
            .text("jobDescription", request.job_description.to_string());

        let res = reqwest::Client::new()
            .post(self.endpoint("/api/analyze"))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .multipart(form)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make analysis request"
            );
            bail!(format!(
                "Analysis service responded with status {}",
                res.status().as_u16()
            ));
        }

        let body = res.text().await?;
        let result = serde_json::from_str::<AnalysisResult>(&body)?;
        tracing::debug!(match_score = ?result.match_score, "Analysis response");

        return Ok(result);
    }
}
