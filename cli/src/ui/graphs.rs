use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::theme::ThemeColors;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let history = &app.history;

    let current_value = history
        .latest()
        .map(|p| format!("{:+.1}W", p.watts()))
        .unwrap_or_default();
    let avg_value = history
        .average_watts()
        .map(|avg| format!("avg: {:+.1}W", avg))
        .unwrap_or_default();

    let title_line = Line::from(vec![
        Span::styled(
            " Charge rate ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(current_value, Style::default().fg(theme.fg)),
        Span::styled(" ", Style::default()),
        Span::styled(avg_value, Style::default().fg(theme.muted)),
        Span::styled(" (g: toggle) ", Style::default().fg(theme.muted)),
    ]);

    let block = Block::default()
        .title(title_line)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg));

    let data = history.values();

    if data.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let (min_y, max_y) = history.value_range();
    let max_x = data.len().max(history.capacity()) as f64;

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.graph_line))
        .data(&data);

    let x_labels = vec![
        Span::styled(
            format!("-{}s", history.span_secs()),
            Style::default().fg(theme.muted),
        ),
        Span::styled("now", Style::default().fg(theme.muted)),
    ];

    let y_labels = vec![
        Span::styled(format!("{:.0}W", min_y), Style::default().fg(theme.muted)),
        Span::styled(
            format!("{:.0}W", (min_y + max_y) / 2.0),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("{:.0}W", max_y), Style::default().fg(theme.muted)),
    ];

    let x_axis = Axis::default()
        .style(Style::default().fg(theme.muted))
        .bounds([0.0, max_x])
        .labels(x_labels);

    let y_axis = Axis::default()
        .style(Style::default().fg(theme.muted))
        .bounds([min_y, max_y])
        .labels(y_labels);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .style(Style::default().bg(theme.bg));

    frame.render_widget(chart, area);
}
