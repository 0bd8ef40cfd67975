#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::fs;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::text_render::result_lines;
use super::text_render::ResultLines;
use super::NotificationService;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::AnalysisBackend;
use crate::domain::models::AnalysisOutcome;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::Event;
use crate::domain::models::FailurePolicy;
use crate::domain::models::Loading;
use crate::domain::models::NotificationKind;
use crate::domain::models::ResultSection;
use crate::domain::models::ResultSource;
use crate::domain::models::ResultView;
use crate::domain::models::ResumeFile;
use crate::domain::models::SessionState;
use crate::domain::models::ShareContent;
use crate::domain::models::TextArea;
use crate::domain::models::ValidationError;
use crate::domain::models::WizardStep;

pub const UPLOAD_SUCCESS_TEXT: &str = "Resume uploaded successfully!";
pub const EDIT_COMING_SOON_TEXT: &str = "Resume editing feature coming soon!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Wizard,
    Loading,
    Results,
}

pub struct AppState<'a> {
    pub api_url: String,
    pub description_input: tui_textarea::TextArea<'a>,
    pub displayed_score: u8,
    pub failure_policy: FailurePolicy,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub loading: Loading,
    pub notifications: NotificationService,
    pub path_input: tui_textarea::TextArea<'a>,
    pub result_lines: Option<ResultLines>,
    pub result_source: Option<ResultSource>,
    pub result_view: Option<ResultView>,
    pub screen: Screen,
    pub scroll: Scroll,
    pub session: SessionState,
}

impl<'a> AppState<'a> {
    pub fn new(api_url: &str, failure_policy: FailurePolicy) -> AppState<'a> {
        return AppState {
            api_url: api_url.to_string(),
            description_input: TextArea::job_description(),
            displayed_score: 0,
            failure_policy,
            last_known_height: 0,
            last_known_width: 0,
            loading: Loading::default(),
            notifications: NotificationService::default(),
            path_input: TextArea::path_input(),
            result_lines: None,
            result_source: None,
            result_view: None,
            screen: Screen::Wizard,
            scroll: Scroll::default(),
            session: SessionState::default(),
        };
    }

    /// Startup work: warn when the analysis service is down, then attach
    /// whatever was passed on the command line.
    pub async fn init(
        &mut self,
        backend: &(dyn AnalysisBackend + Send + Sync),
        resume_path: &str,
        job_description_file: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        if let Err(err) = backend.health_check().await {
            tracing::warn!(error = ?err, url = self.api_url, "Analysis service health check failed");
            let mut msg = format!("Analysis service is not reachable at {}.", self.api_url);
            if self.failure_policy == FailurePolicy::Mock {
                msg = format!("{msg} Results will use demo data.");
            }
            self.notify(NotificationKind::Warning, &msg, tx)?;
        }

        if !resume_path.is_empty() {
            self.attach_path(resume_path, tx).await?;
        }

        if !job_description_file.is_empty() {
            match fs::read_to_string(job_description_file).await {
                Ok(text) => {
                    TextArea::insert_text(&mut self.description_input, text.trim());
                    self.sync_job_description();
                }
                Err(err) => {
                    tracing::warn!(path = job_description_file, error = ?err, "Unable to read job description");
                    let msg =
                        ValidationError::FileUnreadable(job_description_file.to_string()).to_string();
                    self.notify(NotificationKind::Error, &msg, tx)?;
                }
            }
        }

        if self.session.can_analyze() {
            self.session.show_step(WizardStep::Review);
        }

        return Ok(());
    }

    pub fn notify(
        &mut self,
        kind: NotificationKind,
        message: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let id = self.notifications.show(kind, message);
        tx.send(Action::NotificationExpiry(id))?;

        return Ok(());
    }

    fn notify_error(&mut self, err: ValidationError, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        return self.notify(NotificationKind::Error, &err.to_string(), tx);
    }

    /// Returns true when the application should exit.
    pub async fn handle_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        match event {
            Event::KeyboardCTRLC() => {
                tx.send(Action::AnalysisAbort())?;
                return Ok(true);
            }
            Event::KeyboardEsc() => {
                self.notifications.dismiss();
            }
            Event::Notify(kind, msg) => {
                self.notify(kind, &msg, tx)?;
            }
            Event::NotificationExpired(id) => {
                self.notifications.expire(id);
            }
            Event::AnalysisComplete(outcome) => {
                self.handle_analysis_complete(outcome, tx)?;
            }
            Event::AnalysisFailed(reason) => {
                self.handle_analysis_failed(&reason, tx)?;
            }
            Event::LoadingPhase(phase) => {
                self.loading.active_phase = phase;
            }
            Event::ScoreTick(score) => {
                self.displayed_score = score;
            }
            Event::UITick() => {}
            event => match self.screen {
                Screen::Wizard => self.handle_wizard_event(event, tx).await?,
                Screen::Loading => self.handle_loading_event(event, tx)?,
                Screen::Results => self.handle_results_event(event, tx)?,
            },
        }

        return Ok(false);
    }

    async fn handle_wizard_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let step = self.session.current_step;

        match event {
            Event::KeyboardPaste(text) => {
                if step == WizardStep::JobDescription {
                    TextArea::insert_text(&mut self.description_input, &text);
                    self.sync_job_description();
                } else {
                    // Dropping a file on a terminal pastes its path.
                    self.attach_path(&text, tx).await?;
                }
            }
            Event::KeyboardEnter() => match step {
                WizardStep::Upload => {
                    let typed = TextArea::text(&self.path_input);
                    if typed.trim().is_empty() {
                        self.next_step(tx)?;
                    } else {
                        self.attach_path(&typed, tx).await?;
                    }
                }
                WizardStep::JobDescription => {
                    self.description_input.insert_newline();
                    self.sync_job_description();
                }
                WizardStep::Review => {
                    self.analyze(tx)?;
                }
            },
            Event::KeyboardCTRLN() => {
                self.next_step(tx)?;
            }
            Event::KeyboardCTRLB() => {
                self.session.back_step();
            }
            Event::KeyboardCTRLA() => {
                self.analyze(tx)?;
            }
            Event::KeyboardCTRLX() => {
                self.session.remove_file();
            }
            Event::KeyboardCTRLL() => {
                if step == WizardStep::JobDescription {
                    self.clear_job_description();
                }
            }
            Event::KeyboardCharInput(input) => match step {
                WizardStep::Upload => {
                    self.path_input.input(input);
                }
                WizardStep::JobDescription => {
                    if self.description_input.input(input) {
                        self.sync_job_description();
                    }
                }
                WizardStep::Review => {}
            },
            Event::UIScrollUp() => self.move_description_cursor(Key::Up),
            Event::UIScrollDown() => self.move_description_cursor(Key::Down),
            Event::UIScrollPageUp() => self.move_description_cursor(Key::PageUp),
            Event::UIScrollPageDown() => self.move_description_cursor(Key::PageDown),
            _ => {}
        }

        return Ok(());
    }

    fn handle_loading_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        if let Event::KeyboardCTRLB() = event {
            tx.send(Action::AnalysisAbort())?;
            self.loading = Loading::default();
            self.screen = Screen::Wizard;
            self.session.show_step(WizardStep::Review);
        }

        return Ok(());
    }

    fn handle_results_event(
        &mut self,
        event: Event,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        match event {
            Event::UIScrollUp() => self.scroll.up(),
            Event::UIScrollDown() => self.scroll.down(),
            Event::UIScrollPageUp() => self.scroll.up_page(),
            Event::UIScrollPageDown() => self.scroll.down_page(),
            Event::KeyboardCTRLN() => self.start_new_analysis(tx)?,
            Event::KeyboardCharInput(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            }) => {
                if let Some(section) = ResultSection::from_hotkey(char) {
                    self.jump_to(section);
                    return Ok(());
                }

                match char {
                    'd' => self.download(tx)?,
                    's' => self.share(tx)?,
                    'e' => self.notify(NotificationKind::Info, EDIT_COMING_SOON_TEXT, tx)?,
                    'n' => self.start_new_analysis(tx)?,
                    _ => {}
                }
            }
            _ => {}
        }

        return Ok(());
    }

    fn move_description_cursor(&mut self, key: Key) {
        if self.session.current_step == WizardStep::JobDescription {
            self.description_input.input(Input {
                key,
                ctrl: false,
                alt: false,
            });
        }
    }

    pub fn clear_job_description(&mut self) {
        self.description_input = TextArea::job_description();
        self.session.clear_job_description();
    }

    fn sync_job_description(&mut self) {
        let text = TextArea::text(&self.description_input);
        self.session.set_job_description(&text);
    }

    pub async fn attach_path(
        &mut self,
        raw_path: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let res = match ResumeFile::open(raw_path).await {
            Ok(file) => self.session.attach_file(file),
            Err(err) => Err(err),
        };

        match res {
            Ok(()) => {
                self.path_input = TextArea::path_input();
                self.notify(NotificationKind::Success, UPLOAD_SUCCESS_TEXT, tx)?;
            }
            Err(err) => {
                self.notify_error(err, tx)?;
            }
        }

        return Ok(());
    }

    pub fn next_step(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if let Err(err) = self.session.next_step() {
            self.notify_error(err, tx)?;
        }

        return Ok(());
    }

    pub fn analyze(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let ready = self.session.job_description_ready();
        let file = match self.session.uploaded_file.clone() {
            Some(file) if ready => file,
            _ => {
                return self.notify_error(ValidationError::AnalysisPrerequisites, tx);
            }
        };

        let request = AnalysisRequest::new(file, &self.session.job_description);
        tracing::info!(file = request.resume.name, "Submitting analysis");

        self.loading = Loading::default();
        self.screen = Screen::Loading;
        tx.send(Action::AnalysisRequest(request))?;

        return Ok(());
    }

    pub fn handle_analysis_complete(
        &mut self,
        outcome: AnalysisOutcome,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        // Results of an analysis that was abandoned in the meantime.
        if self.screen != Screen::Loading {
            return Ok(());
        }

        if outcome.source == ResultSource::Fallback {
            tracing::warn!("Showing demo results after analysis failure");
        }

        let view = ResultView::build(&outcome.result);
        let target = view.score;

        self.session.last_result = Some(outcome.result);
        self.result_source = Some(outcome.source);
        self.result_view = Some(view);
        self.displayed_score = 0;
        self.loading = Loading::default();
        self.screen = Screen::Results;
        self.scroll.reset();
        self.sync_dependants();

        tx.send(Action::ScoreRamp(target))?;

        return Ok(());
    }

    pub fn handle_analysis_failed(
        &mut self,
        reason: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        if self.screen != Screen::Loading {
            return Ok(());
        }

        self.loading = Loading::default();
        self.screen = Screen::Wizard;
        self.session.show_step(WizardStep::Review);
        self.notify(
            NotificationKind::Error,
            &format!("Analysis failed: {reason}"),
            tx,
        )?;

        return Ok(());
    }

    pub fn download(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let fragment = self
            .session
            .last_result
            .as_ref()
            .filter(|result| return result.has_optimized_resume())
            .map(|result| return result.optimized_resume.to_string());

        match fragment {
            Some(fragment) => tx.send(Action::DownloadResume(fragment))?,
            None => self.notify_error(ValidationError::NoResultToDownload, tx)?,
        }

        return Ok(());
    }

    pub fn share(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let content = ShareContent::for_result(self.session.last_result.as_ref(), &self.api_url);
        tx.send(Action::Share(content))?;

        return Ok(());
    }

    pub fn start_new_analysis(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        tx.send(Action::AnalysisAbort())?;

        self.session.reset();
        self.path_input = TextArea::path_input();
        self.description_input = TextArea::job_description();
        self.displayed_score = 0;
        self.loading = Loading::default();
        self.result_lines = None;
        self.result_source = None;
        self.result_view = None;
        self.screen = Screen::Wizard;
        self.scroll = Scroll::default();

        return Ok(());
    }

    pub fn jump_to(&mut self, section: ResultSection) {
        if let Some(lines) = &self.result_lines {
            if let Some(offset) = lines.offset(section) {
                self.scroll.jump_to(offset);
            }
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        if let Some(view) = &self.result_view {
            // Borders, padding and scrollbar.
            let width = self.last_known_width.saturating_sub(5).max(20) as usize;
            let lines = result_lines(view, width);
            self.scroll.set_state(
                lines.len() as u16,
                self.last_known_height.saturating_sub(2),
            );
            self.result_lines = Some(lines);
        }
    }
}
