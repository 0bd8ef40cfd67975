#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use super::export::write_download;
use super::timers::run_loading_cycle;
use super::timers::run_score_ramp;
use crate::domain::models::Action;
use crate::domain::models::AnalysisOutcome;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::FailurePolicy;
use crate::domain::models::NotificationKind;
use crate::domain::models::ShareBox;
use crate::domain::models::ShareContent;
use crate::domain::models::NOTIFICATION_TIMEOUT_MS;

pub const DOWNLOAD_SUCCESS_TEXT: &str = "Resume downloaded successfully!";

pub fn help_text() -> String {
    let text = r#"
WIZARD:
- Enter - Attach the typed resume path, continue, or analyze on the review step.
- Drag and drop / paste - Attach a resume file, or paste text into the job description.
- CTRL+N - Next step
- CTRL+B - Previous step, or cancel a running analysis.
- CTRL+A - Analyze
- CTRL+X - Remove the attached resume.
- CTRL+L - Clear the job description.

RESULTS:
- 1, 2, 3, 4 - Jump to Job Suitability, Skill Gaps, Recommendations or Optimized Resume.
- Up arrow / Down arrow - Scroll
- CTRL+U / CTRL+D - Page up / Page down
- d - Download the optimized resume.
- s - Share your match score.
- e - Edit the optimized resume.
- n - Start a new analysis.

GLOBAL:
- Esc - Dismiss the current notification.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

/// Runs the analysis. With the mock policy any failure is logged and
/// replaced by the demo result, so this only errors under the error policy.
pub async fn analyze_with_policy(
    backend: &BackendBox,
    request: &AnalysisRequest,
    failure_policy: FailurePolicy,
) -> Result<AnalysisOutcome> {
    match backend.analyze(request).await {
        Ok(result) => {
            return Ok(AnalysisOutcome::from_service(result));
        }
        Err(err) => {
            tracing::error!(backend = %backend.name(), error = ?err, "Analysis failed");
            if failure_policy == FailurePolicy::Error {
                return Err(err);
            }

            return Ok(AnalysisOutcome::fallback());
        }
    }
}

async fn download(
    download_dir: &path::Path,
    fragment: &str,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match write_download(download_dir, fragment).await {
        Ok(file_path) => {
            tx.send(Event::Notify(
                NotificationKind::Success,
                format!("{DOWNLOAD_SUCCESS_TEXT} Saved to {}", file_path.display()),
            ))?;
        }
        Err(err) => {
            tracing::error!(dir = ?download_dir, error = ?err, "Download failed");
            tx.send(Event::Notify(
                NotificationKind::Error,
                format!("Unable to save the resume: {err}"),
            ))?;
        }
    }

    return Ok(());
}

async fn share(
    target: &ShareBox,
    content: ShareContent,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match target.share(&content).await {
        Ok(msg) => {
            tx.send(Event::Notify(NotificationKind::Success, msg))?;
        }
        Err(err) => {
            tracing::error!(target = %target.name(), error = ?err, "Share failed");
            tx.send(Event::Notify(
                NotificationKind::Error,
                format!("Unable to share results: {err}"),
            ))?;
        }
    }

    return Ok(());
}

fn replace_token(token: &mut CancellationToken) -> CancellationToken {
    token.cancel();
    *token = CancellationToken::new();
    return token.clone();
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: BackendBox,
        failure_policy: FailurePolicy,
        download_dir: path::PathBuf,
        share_target: ShareBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend = Arc::new(backend);
        let share_target = Arc::new(share_target);

        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });
        let mut loading_cancel = CancellationToken::new();
        let mut ramp_cancel = CancellationToken::new();

        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            match action {
                Action::AnalysisAbort() => {
                    worker.abort();
                    loading_cancel.cancel();
                    ramp_cancel.cancel();
                }
                Action::AnalysisRequest(request) => {
                    worker.abort();
                    ramp_cancel.cancel();

                    let cycle_cancel = replace_token(&mut loading_cancel);
                    tokio::spawn(run_loading_cycle(tx.clone(), cycle_cancel.clone()));

                    let worker_backend = Arc::clone(&backend);
                    worker = tokio::spawn(async move {
                        let res =
                            analyze_with_policy(&worker_backend, &request, failure_policy).await;
                        cycle_cancel.cancel();

                        match res {
                            Ok(outcome) => worker_tx.send(Event::AnalysisComplete(outcome))?,
                            Err(err) => worker_tx.send(Event::AnalysisFailed(err.to_string()))?,
                        }

                        return Ok(());
                    });
                }
                Action::DownloadResume(fragment) => {
                    download(&download_dir, &fragment, &tx).await?;
                }
                Action::NotificationExpiry(id) => {
                    tokio::spawn(async move {
                        time::sleep(Duration::from_millis(NOTIFICATION_TIMEOUT_MS)).await;
                        worker_tx.send(Event::NotificationExpired(id))?;
                        return anyhow::Ok(());
                    });
                }
                Action::ScoreRamp(target) => {
                    let cancel = replace_token(&mut ramp_cancel);
                    tokio::spawn(run_score_ramp(target, worker_tx, cancel));
                }
                Action::Share(content) => {
                    let target = Arc::clone(&share_target);
                    tokio::spawn(async move {
                        return share(&target, content, &worker_tx).await;
                    });
                }
            }
        }

        worker.abort();
        loading_cancel.cancel();
        ramp_cancel.cancel();

        return Ok(());
    }
}
