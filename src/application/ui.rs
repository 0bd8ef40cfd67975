use std::io;

use anyhow::bail;
use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::hex_to_color;
use crate::domain::models::Action;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::models::FailurePolicy;
use crate::domain::services::events::EventsService;
use crate::domain::services::results_screen;
use crate::domain::services::wizard_screen;
use crate::domain::services::AppState;
use crate::domain::services::Screen;
use crate::infrastructure::backends::BackendManager;

const LOADING_HINT: &str = "Ctrl+B cancel, Ctrl+C quit";

fn draw<B: Backend>(frame: &mut Frame<B>, app_state: &mut AppState) {
    let area = frame.size();

    match app_state.screen {
        Screen::Wizard => {
            wizard_screen::render(frame, area, app_state);
        }
        Screen::Loading => {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(8), Constraint::Length(1)])
                .split(area);

            app_state.loading.render(frame, layout[0]);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    LOADING_HINT,
                    Style::default().fg(hex_to_color("#6b7280")),
                )),
                layout[1],
            );
        }
        Screen::Results => {
            let (_, body, _) = results_screen::layout(area, results_screen::is_demo(app_state));
            if body.width != app_state.last_known_width
                || body.height != app_state.last_known_height
            {
                app_state.set_rect(body);
            }

            results_screen::render(frame, area, app_state);
        }
    }

    if let Some(notification) = app_state.notifications.current() {
        notification.render(frame, area);
    }
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    loop {
        terminal.draw(|frame| {
            draw(frame, app_state);
        })?;

        let event = events.next().await?;
        if app_state.handle_event(event, &tx).await? {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let backend = match BackendName::parse(Config::get(ConfigKey::Backend)) {
        Some(name) => BackendManager::get(name),
        None => bail!(format!(
            "Unknown backend {}",
            Config::get(ConfigKey::Backend)
        )),
    };
    let failure_policy = FailurePolicy::parse(&Config::get(ConfigKey::OnFailure))?;

    let mut app_state = AppState::new(&Config::get(ConfigKey::ApiUrl), failure_policy);
    app_state
        .init(
            backend.as_ref(),
            &Config::get(ConfigKey::Resume),
            &Config::get(ConfigKey::JobDescriptionFile),
            &tx,
        )
        .await?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
