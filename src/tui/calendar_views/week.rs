use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use weekplan::{
    app::AppState,
    ui::week_view::WeekLayout,
};

/// Left pane: one line per day with its event count.
pub fn render(f: &mut Frame, app: &AppState, layout: &WeekLayout, area: ratatui::layout::Rect) {
    let mut lines = Vec::new();

    for day in &layout.days {
        let style = if day.is_selected {
            Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
        } else if day.is_today {
            Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.day_header)
        };

        let mut spans = vec![
            Span::styled(format!(" {:<10} {} ", day.label, day.date), style),
        ];
        if day.is_today {
            spans.push(Span::styled("(Hôm nay)", Style::default().fg(app.theme.today)));
        }
        lines.push(Line::from(spans));

        let new_count = day.rows.iter().filter(|row| row.is_new).count();
        let mut detail = vec![Span::styled(
            match day.rows.len() {
                0 => "   -".to_string(),
                n => format!("   {} event(s)", n),
            },
            Style::default().fg(app.theme.empty_day),
        )];
        if new_count > 0 {
            detail.push(Span::styled(
                format!(" {} NEW", new_count),
                Style::default().fg(app.theme.new_badge).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(detail));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Tuần "));
    f.render_widget(content, area);
}
