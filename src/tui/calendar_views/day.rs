use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use weekplan::{
    app::{AppState, FormField},
    ui::week_view::{EventRow, WeekLayout},
};

/// Right pane: the selected day's events as a table.
pub fn render(f: &mut Frame, app: &AppState, layout: &WeekLayout, area: ratatui::layout::Rect) {
    let Some(table) = layout.selected_table() else {
        return;
    };

    let title = if table.is_today {
        format!(" {} - {} (Hôm nay) ", table.label, table.date)
    } else {
        format!(" {} - {} ", table.label, table.date)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.table_border))
        .title(Span::styled(title, Style::default().fg(app.theme.day_header).add_modifier(Modifier::BOLD)));

    if table.rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No events. Press 'a' to add one.", Style::default().fg(app.theme.empty_day))),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(FormField::ALL.iter().map(|field| {
        Cell::from(field.label()).style(Style::default().fg(app.theme.column_header).add_modifier(Modifier::BOLD))
    }));

    let rows: Vec<Row> = table.rows.iter().map(|row| build_row(app, row)).collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Percentage(15),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Percentage(12),
        Constraint::Percentage(20),
    ];

    let table_widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table_widget, area);
}

fn build_row<'a>(app: &AppState, row: &'a EventRow) -> Row<'a> {
    let mut time = vec![Span::raw(row.time.as_str())];
    if row.is_new {
        time.push(Span::styled(" NEW", Style::default().fg(app.theme.new_badge).add_modifier(Modifier::BOLD)));
    }

    let mut location = vec![Span::raw(row.location.as_str())];
    if row.is_online {
        location.push(Span::styled(" (Trực tuyến)", Style::default().fg(app.theme.online_marker)));
    }

    let participants = match &row.participants_link {
        Some(link) => Line::from(vec![
            Span::raw(row.participants.as_str()),
            Span::raw(" "),
            Span::styled(link.as_str(), Style::default().fg(app.theme.link).add_modifier(Modifier::UNDERLINED)),
        ]),
        None => Line::from(row.participants.as_str()),
    };

    let style = if row.is_selected {
        Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(Line::from(time)),
        Cell::from(Line::from(location)),
        Cell::from(row.content.as_str()),
        Cell::from(row.preparation.as_str()),
        Cell::from(row.host.as_str()),
        Cell::from(participants),
    ])
    .style(style)
}
