use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::input::keys;
use crate::theme::ThemeColors;

use super::utils::format_elapsed;

pub fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let version = super::VERSION;

    let left_spans = vec![
        Span::styled("juice ", Style::default().fg(theme.accent)),
        Span::styled(format!("v{}", version), Style::default().fg(theme.muted)),
    ];

    let right_text = match app.last_update {
        Some(at) => format!(
            "updated {} ago · every {}ms ",
            format_elapsed(at.elapsed()),
            app.refresh_ms
        ),
        None if app.is_source_connected() => format!("waiting · every {}ms ", app.refresh_ms),
        None => "no battery source ".to_string(),
    };

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width = right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, Style::default().fg(theme.muted)));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let appearance = app.config.appearance_label().to_lowercase();
    let icons = app.aggregator.glyphs().label();
    let graph = if app.config.user_config.show_graph {
        "on"
    } else {
        "off"
    };

    let left_hints: Vec<(&str, String)> = vec![
        (keys::HELP, "help".to_string()),
        (keys::DEVICES, "devices".to_string()),
        (keys::APPEARANCE, format!("appearance ({})", appearance)),
        (keys::ICONS, format!("icons ({})", icons)),
        (keys::GRAPH, format!("graph ({})", graph)),
        (keys::QUIT, "quit".to_string()),
    ];

    let mut left_spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in left_hints.iter().enumerate() {
        if i > 0 {
            left_spans.push(Span::styled(" │ ", Style::default().fg(theme.border)));
        }
        left_spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        left_spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(theme.muted),
        ));
    }

    let right_spans: Vec<Span> = vec![
        Span::styled(keys::REFRESH_FASTER, Style::default().fg(theme.accent)),
        Span::styled("/", Style::default().fg(theme.muted)),
        Span::styled(keys::REFRESH_SLOWER, Style::default().fg(theme.accent)),
        Span::styled(" refresh ", Style::default().fg(theme.muted)),
    ];

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    left_spans.push(Span::raw(" ".repeat(padding)));
    left_spans.extend(right_spans);

    let line = Line::from(left_spans);
    let bar = Paragraph::new(line)
        .style(Style::default().bg(theme.bg))
        .alignment(Alignment::Left);

    frame.render_widget(bar, area);
}
