use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use weekplan::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 56.min(area.width);
    let help_height = 22.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled("weekplan Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", Style::default().fg(app.theme.help_section))]),
        Line::from("  h/l, Left/Right  - Previous/next day"),
        Line::from("  j/k, Down/Up     - Next/previous event"),
        Line::from("  t                - Jump to today"),
        Line::from(""),
        Line::from(vec![Span::styled("Events:", Style::default().fg(app.theme.help_section))]),
        Line::from("  a                - Add event to selected day"),
        Line::from("  e/E/Enter        - Edit selected event"),
        Line::from("  x                - Delete selected event"),
        Line::from(""),
        Line::from(vec![Span::styled("Event form:", Style::default().fg(app.theme.help_section))]),
        Line::from("  Tab/Shift-Tab    - Next/previous field"),
        Line::from("  Enter            - Save (all fields required)"),
        Line::from("  Esc              - Cancel"),
        Line::from(""),
        Line::from("  NEW marks events changed in the last few minutes."),
        Line::from("  q                - Quit"),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Help (? or Esc to close) ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
