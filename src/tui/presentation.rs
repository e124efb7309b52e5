use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weekplan::{
    app::{AppState, Mode, SaveStatus},
    ui::week_view::{self, WeekLayout},
};
use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let now = Local::now();
    let layout = week_view::calculate_layout(app, now.date_naive(), now.timestamp_millis());

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(70),
        ])
        .split(main_chunks[1]);

    render_header(f, app, &layout, main_chunks[0]);

    if layout.days.is_empty() {
        let placeholder = Paragraph::new(empty_schedule_text(app))
            .style(Style::default().fg(app.theme.empty_day))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(placeholder, main_chunks[1]);
    } else {
        calendar_views::week::render(f, app, &layout, content_chunks[0]);
        calendar_views::day::render(f, app, &layout, content_chunks[1]);
    }

    render_status(f, app, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.event_form.is_some() {
        dialogs::event_form::render(f, app);
    }

    if app.mode == Mode::ConfirmDelete {
        dialogs::delete_confirmation::render(f, app);
    }
}

fn render_header(f: &mut Frame, app: &AppState, layout: &WeekLayout, area: ratatui::layout::Rect) {
    let week_range = match &layout.date_range {
        Some((first, last)) => format!("{} ({} - {})", app.subtitle, first, last),
        None => app.subtitle.clone(),
    };

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            app.title.as_str(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(week_range, Style::default().fg(app.theme.subtitle))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_status(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let (save_text, save_color) = match &app.save_status {
        SaveStatus::Loading => ("Loading...".to_string(), app.theme.status_bar),
        SaveStatus::Saved => ("Saved".to_string(), app.theme.success),
        SaveStatus::Unsaved(reason) => (format!("Not saved: {}", reason), app.theme.error),
        SaveStatus::Error(reason) => (format!("Error: {}", reason), app.theme.error),
    };

    let mut spans = vec![
        Span::styled(save_text, Style::default().fg(save_color)),
        Span::raw(" | "),
    ];
    if let Some(message) = &app.message {
        spans.push(Span::styled(message.as_str(), Style::default().fg(app.theme.help_section)));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::raw(format!(
        "{:?} | Events: {} | 'q' quit, '?' help",
        app.mode,
        app.schedule.event_count()
    )));

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(app.theme.status_bar))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn empty_schedule_text(app: &AppState) -> &'static str {
    match app.save_status {
        SaveStatus::Loading => "Loading schedule...",
        _ => "Schedule unavailable. Check the log for storage errors.",
    }
}
