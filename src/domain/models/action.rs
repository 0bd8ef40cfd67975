use super::AnalysisRequest;
use super::ShareContent;

pub enum Action {
    AnalysisAbort(),
    AnalysisRequest(AnalysisRequest),
    DownloadResume(String),
    NotificationExpiry(u64),
    ScoreRamp(u8),
    Share(ShareContent),
}
