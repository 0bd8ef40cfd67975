use anyhow::anyhow;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

type ClipboardRequest = (String, oneshot::Sender<Result<()>>);

static SENDER: OnceCell<mpsc::UnboundedSender<ClipboardRequest>> = OnceCell::new();

/// Owns the platform clipboard on a single task. Some platforms drop the
/// clipboard contents when the owning handle goes away, so it lives for the
/// whole run.
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<ClipboardRequest>();
        SENDER
            .set(tx)
            .map_err(|_| return anyhow!("Clipboard service is already running."))?;
        let mut clipboard = arboard::Clipboard::new()?;

        loop {
            if let Some((text, reply)) = rx.recv().await {
                let res = clipboard.set_text(text).map_err(|err| {
                    tracing::error!(error = ?err, "Failed to write to clipboard");
                    return anyhow!(err);
                });

                // The caller may have stopped waiting.
                let _ = reply.send(res);
            }
        }
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    pub async fn set(text: String) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            let (reply_tx, reply_rx) = oneshot::channel();
            tx.send((text, reply_tx))?;
            return reply_rx.await?;
        }

        return Err(anyhow!("Clipboard service is not initialized."));
    }
}
