use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use weekplan::app::{AppState, FormField};

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.event_form else {
        return;
    };

    let area = f.size();
    let form_width = 70.min(area.width);
    let form_height = 20.min(area.height);
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;

    let form_title = if form.is_editing() { "Chỉnh sửa sự kiện" } else { "Thêm sự kiện mới" };
    let day_text = app
        .schedule
        .day(form.day_index)
        .map(|day| format!("{} {}", day.day_of_week, day.date))
        .unwrap_or_default();

    let mut form_text = vec![
        Line::from(vec![Span::styled(form_title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(Span::styled(day_text, Style::default().fg(inactive_color))),
        Line::from(""),
    ];

    for field in FormField::ALL {
        let is_active = form.active_field == field;
        let mut spans = vec![
            Span::styled(
                format!("{}: ", field.label()),
                Style::default().fg(if is_active { active_color } else { inactive_color }),
            ),
            Span::raw(form.value(&field)),
        ];
        if is_active {
            spans.push(Span::styled("_", Style::default().fg(active_color)));
        }
        form_text.push(Line::from(spans));
        form_text.push(Line::from(""));
    }

    if let Some(message) = &app.message {
        form_text.push(Line::from(Span::styled(message.as_str(), Style::default().fg(app.theme.error))));
    }

    form_text.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Next field | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Lưu | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Hủy"),
    ]));

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", form_title))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
