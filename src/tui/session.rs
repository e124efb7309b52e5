use std::io;
use std::sync::Arc;
use std::time::Duration;
use chrono::Local;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use weekplan::{
    app::{AppState, Mode, SaveStatus},
    input::{insert_mode, normal_mode},
    session::{Mutation, Persistence, ScheduleSession, SessionError},
    storage::{config::Config, SqliteWeekStore},
    ui::{refresh::RefreshTicker, theme::Theme},
};
use crate::tui::presentation::ui;

const INPUT_POLL: Duration = Duration::from_millis(250);

type Session = ScheduleSession<Arc<SqliteWeekStore>>;

pub async fn run_tui(config: Config) -> Result<(), io::Error> {
    let store = SqliteWeekStore::shared(&config.storage.database_path);
    let mut session = ScheduleSession::new(store, config.day_labels());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new()
        .with_theme(theme)
        .with_header(&config.ui.title, &config.ui.subtitle)
        .with_recency_window(config.recency_window_ms());

    terminal.draw(|f| ui(f, &app)).ok();

    let schedule = session.load_or_init(Local::now()).await;
    app.save_status = if schedule.is_empty() {
        SaveStatus::Error("storage unavailable".to_string())
    } else {
        SaveStatus::Saved
    };
    app.week_id = session.week_id().cloned();
    app.set_schedule(schedule);
    normal_mode::jump_to_date(&mut app, Local::now().date_naive());
    app.message = None;

    let mut ticker = RefreshTicker::start(config.refresh_interval());
    let res = run_app(&mut terminal, &mut app, &mut session, &mut ticker).await;
    ticker.stop();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("terminal loop failed: {}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    session: &mut Session,
    ticker: &mut RefreshTicker,
) -> io::Result<()> {
    let mut dirty = true;

    loop {
        if ticker.take_tick() {
            dirty = true;
        }

        if dirty {
            terminal.draw(|f| ui(f, app))?;
            dirty = false;
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            dirty = true;
            match app.mode {
                Mode::Normal => {
                    if key.code == KeyCode::Char('q') && !app.show_help {
                        return Ok(());
                    }
                    normal_mode::handle_key(key.code, app);
                }
                Mode::Insert => handle_insert_mode(key.code, app, session).await,
                Mode::ConfirmDelete => handle_delete_confirmation(key.code, app, session).await,
            }
        } else {
            // Resize and other terminal events still need a redraw.
            dirty = true;
        }
    }
}

async fn handle_insert_mode(code: KeyCode, app: &mut AppState, session: &mut Session) {
    match code {
        KeyCode::Esc => {
            app.event_form = None;
            app.message = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let Some(form) = app.event_form.as_ref() else {
                app.mode = Mode::Normal;
                return;
            };

            if let Some(field) = form.missing_field() {
                app.message = Some(format!("{} is required", field.label()));
                return;
            }

            let day_index = form.day_index;
            let result = match form.updated_event() {
                Some(updated) => session.edit_event(day_index, updated).await,
                None => session.add_event(day_index, form.to_fields()).await,
            };

            app.event_form = None;
            app.message = None;
            app.mode = Mode::Normal;
            if let Some(event_id) = apply_mutation(app, result) {
                select_event(app, day_index, &event_id);
            }
        }
        _ => insert_mode::handle_key(code, app),
    }
}

async fn handle_delete_confirmation(code: KeyCode, app: &mut AppState, session: &mut Session) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(event_id) = app.delete_confirmation_event_id.take() {
                tracing::info!(event_id = %event_id, "deleting event");
                let result = session.delete_event(app.selected_day, &event_id).await;
                apply_mutation(app, result);
            }
            app.mode = Mode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.delete_confirmation_event_id = None;
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

/// Installs the mutated week and returns the affected event id.
fn apply_mutation(app: &mut AppState, result: Result<Mutation, SessionError>) -> Option<String> {
    match result {
        Ok(mutation) => {
            app.save_status = match &mutation.persistence {
                Persistence::Saved => SaveStatus::Saved,
                Persistence::Unchanged => app.save_status.clone(),
                Persistence::Failed(e) => SaveStatus::Unsaved(e.to_string()),
            };
            app.set_schedule(mutation.snapshot);
            Some(mutation.event_id)
        }
        Err(e) => {
            tracing::warn!("mutation rejected: {}", e);
            app.message = Some(e.to_string());
            None
        }
    }
}

fn select_event(app: &mut AppState, day_index: usize, event_id: &str) {
    let position = app
        .schedule
        .day(day_index)
        .and_then(|day| day.events.iter().position(|event| event.id == event_id));

    if let Some(position) = position {
        app.select_day(day_index);
        app.selected_event_index = position;
    }
}
