use tui_textarea::Input;

use super::AnalysisOutcome;
use super::NotificationKind;

pub enum Event {
    AnalysisComplete(AnalysisOutcome),
    AnalysisFailed(String),
    KeyboardCharInput(Input),
    KeyboardCTRLA(),
    KeyboardCTRLB(),
    KeyboardCTRLC(),
    KeyboardCTRLL(),
    KeyboardCTRLN(),
    KeyboardCTRLX(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    LoadingPhase(Option<usize>),
    Notify(NotificationKind, String),
    NotificationExpired(u64),
    ScoreTick(u8),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
}
