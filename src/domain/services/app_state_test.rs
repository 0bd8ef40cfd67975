use std::fs;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use ratatui::prelude::Rect;
use test_utils::job_description_fixture;
use test_utils::resume_text_fixture;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::AppState;
use super::Screen;
use super::EDIT_COMING_SOON_TEXT;
use super::UPLOAD_SUCCESS_TEXT;
use crate::domain::models::Action;
use crate::domain::models::AnalysisBackend;
use crate::domain::models::AnalysisOutcome;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::AnalysisResult;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::models::FailurePolicy;
use crate::domain::models::NotificationKind;
use crate::domain::models::ResultSection;
use crate::domain::models::ResultSource;
use crate::domain::models::WizardStep;
use crate::infrastructure::backends::mock::MockBackend;

const API_URL: &str = "http://localhost:5000";

struct UnreachableBackend {}

#[async_trait]
impl AnalysisBackend for UnreachableBackend {
    fn name(&self) -> BackendName {
        return BackendName::Http;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        bail!("connection refused");
    }

    #[allow(clippy::implicit_return)]
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResult> {
        bail!("connection refused");
    }
}

fn write_resume(dir: &tempfile::TempDir, name: &str) -> Result<String> {
    let file_path = dir.path().join(name);
    fs::write(&file_path, resume_text_fixture())?;
    return Ok(file_path.to_string_lossy().to_string());
}

fn write_job_description(dir: &tempfile::TempDir) -> Result<String> {
    let file_path = dir.path().join("job.txt");
    fs::write(&file_path, job_description_fixture())?;
    return Ok(file_path.to_string_lossy().to_string());
}

fn char_input(char: char) -> Event {
    return Event::KeyboardCharInput(Input {
        key: Key::Char(char),
        ctrl: false,
        alt: false,
    });
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = vec![];
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    return actions;
}

fn notification(app_state: &AppState) -> Option<(NotificationKind, String)> {
    return app_state
        .notifications
        .current()
        .map(|e| return (e.kind, e.message.to_string()));
}

async fn ready_app_state(
    dir: &tempfile::TempDir,
    tx: &mpsc::UnboundedSender<Action>,
) -> Result<AppState<'static>> {
    let resume = write_resume(dir, "resume.txt")?;
    let job = write_job_description(dir)?;
    let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
    app_state.init(&MockBackend::default(), &resume, &job, tx).await?;

    return Ok(app_state);
}

async fn results_app_state(
    dir: &tempfile::TempDir,
    tx: &mpsc::UnboundedSender<Action>,
) -> Result<AppState<'static>> {
    let mut app_state = ready_app_state(dir, tx).await?;
    app_state.set_rect(Rect::new(0, 0, 100, 30));
    app_state.analyze(tx)?;
    app_state.handle_analysis_complete(AnalysisOutcome::from_service(AnalysisResult::mock()), tx)?;

    return Ok(app_state);
}

mod init {
    use super::*;

    #[tokio::test]
    async fn it_prefills_and_jumps_to_review() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let app_state = ready_app_state(&dir, &tx).await?;

        assert_eq!(app_state.session.current_step, WizardStep::Review);
        assert!(app_state.session.can_analyze());
        assert_eq!(
            app_state.session.job_description.trim(),
            job_description_fixture().trim()
        );
        assert_eq!(
            notification(&app_state),
            Some((NotificationKind::Success, UPLOAD_SUCCESS_TEXT.to_string()))
        );
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Action::NotificationExpiry(1)]
        ));

        return Ok(());
    }

    #[tokio::test]
    async fn it_warns_when_the_service_is_unreachable() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.init(&UnreachableBackend {}, "", "", &tx).await?;

        assert_eq!(app_state.session.current_step, WizardStep::Upload);
        insta::assert_snapshot!(notification(&app_state).unwrap().1, @"Analysis service is not reachable at http://localhost:5000. Results will use demo data.");

        return Ok(());
    }

    #[tokio::test]
    async fn it_omits_the_demo_note_when_failures_are_errors() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Error);
        app_state.init(&UnreachableBackend {}, "", "", &tx).await?;

        assert_eq!(
            notification(&app_state),
            Some((
                NotificationKind::Warning,
                "Analysis service is not reachable at http://localhost:5000.".to_string()
            ))
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_reports_a_missing_job_description_file() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state
            .init(&MockBackend::default(), "", "/tmp/resumatch-missing-job.txt", &tx)
            .await?;

        assert_eq!(notification(&app_state).unwrap().0, NotificationKind::Error);
        assert_eq!(app_state.session.job_description, "");

        return Ok(());
    }
}

mod handle_event {
    use super::*;

    #[tokio::test]
    async fn it_quits_on_ctrl_c() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        let should_quit = app_state.handle_event(Event::KeyboardCTRLC(), &tx).await?;

        assert!(should_quit);
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Action::AnalysisAbort()]
        ));

        return Ok(());
    }

    #[tokio::test]
    async fn it_expires_only_the_scheduled_notification() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.notify(NotificationKind::Info, "first", &tx)?;
        app_state.notify(NotificationKind::Info, "second", &tx)?;

        app_state.handle_event(Event::NotificationExpired(1), &tx).await?;
        assert_eq!(notification(&app_state).unwrap().1, "second");

        app_state.handle_event(Event::NotificationExpired(2), &tx).await?;
        assert!(notification(&app_state).is_none());

        return Ok(());
    }

    #[tokio::test]
    async fn it_dismisses_on_esc() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.notify(NotificationKind::Info, "hello", &tx)?;
        app_state.handle_event(Event::KeyboardEsc(), &tx).await?;

        assert!(notification(&app_state).is_none());

        return Ok(());
    }
}

mod wizard {
    use super::*;

    #[tokio::test]
    async fn it_blocks_next_without_a_resume() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.handle_event(Event::KeyboardCTRLN(), &tx).await?;

        assert_eq!(app_state.session.current_step, WizardStep::Upload);
        assert_eq!(
            notification(&app_state),
            Some((
                NotificationKind::Error,
                "Please upload a resume file to proceed.".to_string()
            ))
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_attaches_a_dropped_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let resume = write_resume(&dir, "resume.txt")?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state
            .handle_event(Event::KeyboardPaste(format!("'{resume}'")), &tx)
            .await?;

        let file = app_state.session.uploaded_file.clone().unwrap();
        assert_eq!(file.name, "resume.txt");
        assert_eq!(file.mime, "text/plain");
        assert!(app_state.session.progress.is_active(1));

        return Ok(());
    }

    #[tokio::test]
    async fn it_rejects_unsupported_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let image = write_resume(&dir, "resume.png")?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.handle_event(Event::KeyboardPaste(image), &tx).await?;

        assert!(app_state.session.uploaded_file.is_none());
        assert_eq!(
            notification(&app_state).unwrap().1,
            "Please upload a PDF, DOC, DOCX, or TXT file."
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_attaches_a_typed_path_then_advances() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let resume = write_resume(&dir, "resume.txt")?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        for char in resume.chars() {
            app_state.handle_event(char_input(char), &tx).await?;
        }

        app_state.handle_event(Event::KeyboardEnter(), &tx).await?;
        assert!(app_state.session.has_resume());
        assert_eq!(app_state.session.current_step, WizardStep::Upload);

        app_state.handle_event(Event::KeyboardEnter(), &tx).await?;
        assert_eq!(app_state.session.current_step, WizardStep::JobDescription);

        return Ok(());
    }

    #[tokio::test]
    async fn it_types_into_the_job_description() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.session.show_step(WizardStep::JobDescription);

        app_state.handle_event(char_input('R'), &tx).await?;
        app_state.handle_event(Event::KeyboardEnter(), &tx).await?;
        app_state
            .handle_event(Event::KeyboardPaste("ust".to_string()), &tx)
            .await?;

        assert_eq!(app_state.session.job_description, "R\nust");
        assert_eq!(app_state.session.character_count(), 5);
        assert!(app_state.session.progress.is_active(2));

        return Ok(());
    }

    #[tokio::test]
    async fn it_blocks_next_on_a_short_description() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.session.show_step(WizardStep::JobDescription);
        app_state
            .handle_event(Event::KeyboardPaste("Too short".to_string()), &tx)
            .await?;
        app_state.handle_event(Event::KeyboardCTRLN(), &tx).await?;

        assert_eq!(app_state.session.current_step, WizardStep::JobDescription);
        assert_eq!(
            notification(&app_state).unwrap().1,
            "Please enter a job description (min 50 characters)."
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_removes_the_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        app_state.handle_event(Event::KeyboardCTRLX(), &tx).await?;

        assert!(!app_state.session.has_resume());
        assert!(!app_state.session.can_analyze());

        return Ok(());
    }

    #[tokio::test]
    async fn it_clears_the_job_description() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        assert!(app_state.session.can_analyze());

        app_state.session.show_step(WizardStep::JobDescription);
        app_state.handle_event(Event::KeyboardCTRLL(), &tx).await?;

        assert_eq!(app_state.session.job_description, "");
        assert_eq!(app_state.session.character_count(), 0);
        assert_eq!(app_state.description_input.lines().join(""), "");
        assert!(app_state.session.has_resume());
        assert!(!app_state.session.can_analyze());

        return Ok(());
    }

    #[tokio::test]
    async fn it_only_clears_the_description_on_its_step() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;

        app_state.session.show_step(WizardStep::Review);
        app_state.handle_event(Event::KeyboardCTRLL(), &tx).await?;

        assert!(app_state.session.can_analyze());

        return Ok(());
    }

    #[tokio::test]
    async fn it_refuses_to_analyze_without_inputs() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.handle_event(Event::KeyboardCTRLA(), &tx).await?;

        assert_eq!(app_state.screen, Screen::Wizard);
        assert_eq!(
            notification(&app_state).unwrap().1,
            "Please upload a resume and enter a job description."
        );
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Action::NotificationExpiry(_)]
        ));

        return Ok(());
    }

    #[tokio::test]
    async fn it_submits_the_analysis() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        drain(&mut rx);

        app_state.handle_event(Event::KeyboardEnter(), &tx).await?;

        assert_eq!(app_state.screen, Screen::Loading);
        let actions = drain(&mut rx);
        match actions.as_slice() {
            [Action::AnalysisRequest(req)] => {
                assert_eq!(req.resume.name, "resume.txt");
                assert_eq!(req.job_description, job_description_fixture());
            }
            _ => panic!("expected a single analysis request"),
        }

        return Ok(());
    }
}

mod loading {
    use super::*;

    #[tokio::test]
    async fn it_tracks_the_active_phase() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::new(API_URL, FailurePolicy::Mock);
        app_state.handle_event(Event::LoadingPhase(Some(2)), &tx).await?;

        assert_eq!(app_state.loading.active_phase, Some(2));

        return Ok(());
    }

    #[tokio::test]
    async fn it_cancels_back_to_review() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        app_state.analyze(&tx)?;
        drain(&mut rx);

        app_state.handle_event(Event::KeyboardCTRLB(), &tx).await?;

        assert_eq!(app_state.screen, Screen::Wizard);
        assert_eq!(app_state.session.current_step, WizardStep::Review);
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Action::AnalysisAbort()]
        ));

        return Ok(());
    }

    #[tokio::test]
    async fn it_ignores_results_after_cancelling() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        app_state.analyze(&tx)?;
        app_state.handle_event(Event::KeyboardCTRLB(), &tx).await?;

        app_state
            .handle_event(Event::AnalysisComplete(AnalysisOutcome::fallback()), &tx)
            .await?;

        assert_eq!(app_state.screen, Screen::Wizard);
        assert!(app_state.session.last_result.is_none());

        return Ok(());
    }

    #[tokio::test]
    async fn it_returns_to_review_on_failure() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        app_state.analyze(&tx)?;

        app_state
            .handle_event(Event::AnalysisFailed("HTTP 500".to_string()), &tx)
            .await?;

        assert_eq!(app_state.screen, Screen::Wizard);
        assert_eq!(app_state.session.current_step, WizardStep::Review);
        assert_eq!(
            notification(&app_state),
            Some((
                NotificationKind::Error,
                "Analysis failed: HTTP 500".to_string()
            ))
        );

        return Ok(());
    }
}

mod results {
    use super::*;

    #[tokio::test]
    async fn it_shows_results_and_ramps_the_score() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        app_state.analyze(&tx)?;
        drain(&mut rx);

        app_state
            .handle_event(Event::AnalysisComplete(AnalysisOutcome::fallback()), &tx)
            .await?;

        assert_eq!(app_state.screen, Screen::Results);
        assert_eq!(app_state.result_source, Some(ResultSource::Fallback));
        assert_eq!(app_state.session.last_result, Some(AnalysisResult::mock()));
        assert_eq!(app_state.displayed_score, 0);
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Action::ScoreRamp(78)]
        ));

        app_state.handle_event(Event::ScoreTick(40), &tx).await?;
        assert_eq!(app_state.displayed_score, 40);

        return Ok(());
    }

    #[tokio::test]
    async fn it_jumps_to_sections() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = results_app_state(&dir, &tx).await?;
        app_state.handle_event(char_input('2'), &tx).await?;

        let lines = app_state.result_lines.as_ref().unwrap();
        let max_position = (lines.len() as u16).saturating_sub(28);
        let expected = lines
            .offset(ResultSection::SkillGaps)
            .unwrap()
            .min(max_position);
        assert!(expected > 0);
        assert_eq!(app_state.scroll.position, expected);

        app_state.handle_event(char_input('1'), &tx).await?;
        assert_eq!(app_state.scroll.position, 0);

        return Ok(());
    }

    #[tokio::test]
    async fn it_requests_a_download() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = results_app_state(&dir, &tx).await?;
        drain(&mut rx);

        app_state.handle_event(char_input('d'), &tx).await?;

        match drain(&mut rx).as_slice() {
            [Action::DownloadResume(fragment)] => {
                assert_eq!(fragment, &AnalysisResult::mock().optimized_resume);
            }
            _ => panic!("expected a download request"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_refuses_to_download_without_a_resume() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = ready_app_state(&dir, &tx).await?;
        app_state.analyze(&tx)?;
        app_state.handle_analysis_complete(
            AnalysisOutcome::from_service(AnalysisResult {
                match_score: Some(60),
                ..AnalysisResult::default()
            }),
            &tx,
        )?;
        drain(&mut rx);

        app_state.handle_event(char_input('d'), &tx).await?;

        assert_eq!(
            notification(&app_state).unwrap().1,
            "No resume available for download."
        );
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Action::NotificationExpiry(_)]
        ));

        return Ok(());
    }

    #[tokio::test]
    async fn it_shares_the_score() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = results_app_state(&dir, &tx).await?;
        drain(&mut rx);

        app_state.handle_event(char_input('s'), &tx).await?;

        match drain(&mut rx).as_slice() {
            [Action::Share(content)] => {
                assert_eq!(content.text, "I got a 78% match for this job position!");
                assert_eq!(content.url, API_URL);
            }
            _ => panic!("expected a share request"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_announces_editing_is_coming() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = results_app_state(&dir, &tx).await?;
        app_state.handle_event(char_input('e'), &tx).await?;

        assert_eq!(
            notification(&app_state),
            Some((NotificationKind::Info, EDIT_COMING_SOON_TEXT.to_string()))
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_starts_a_new_analysis() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = results_app_state(&dir, &tx).await?;
        drain(&mut rx);

        app_state.handle_event(char_input('n'), &tx).await?;

        assert_eq!(app_state.screen, Screen::Wizard);
        assert_eq!(app_state.session.current_step, WizardStep::Upload);
        assert!(app_state.session.uploaded_file.is_none());
        assert!(app_state.session.last_result.is_none());
        assert_eq!(app_state.session.job_description, "");
        assert!(!app_state.session.progress.is_active(2));
        assert!(app_state.result_view.is_none());
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [Action::AnalysisAbort()]
        ));

        return Ok(());
    }

    #[tokio::test]
    async fn it_keeps_the_scroll_within_bounds_on_resize() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = results_app_state(&dir, &tx).await?;
        for _ in 0..10 {
            app_state.handle_event(Event::UIScrollPageDown(), &tx).await?;
        }

        app_state.set_rect(Rect::new(0, 0, 60, 200));
        let lines = app_state.result_lines.as_ref().unwrap();
        assert!(app_state.scroll.position <= (lines.len() as u16).saturating_sub(198));

        return Ok(());
    }
}

