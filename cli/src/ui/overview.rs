use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{DerivedBatteryState, IndicatorColor};
use crate::theme::{indicator_color, ThemeColors};

use super::utils::{format_mw, format_mwh};

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::default()
        .title(" Battery ")
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(Style::default().bg(theme.bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let Some(state) = app.state() else {
        let message = if app.is_source_connected() {
            "Waiting for the first battery report..."
        } else {
            "No battery source available"
        };
        let waiting = Paragraph::new(message)
            .style(theme.muted_style())
            .alignment(Alignment::Center);
        frame.render_widget(waiting, v_center(inner));
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    render_gauge(frame, chunks[0], state, theme);
    render_cards(frame, chunks[2], chunks[3], state, theme);
}

fn render_gauge(frame: &mut Frame, area: Rect, state: &DerivedBatteryState, theme: &ThemeColors) {
    let ratio = state.effective_percent_remaining.unwrap_or(0.0).clamp(0.0, 1.0);
    let label = state
        .formatted_percent()
        .unwrap_or_else(|| "(unknown)".to_string());

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(indicator_color(state.battery_indicator.color))
                .bg(darken_color(theme.border, 0.6)),
        )
        .ratio(ratio)
        .label(label)
        .use_unicode(true);

    frame.render_widget(gauge, area);
}

fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        _ => Color::Rgb(40, 40, 45),
    }
}

fn render_cards(
    frame: &mut Frame,
    header: Rect,
    body: Rect,
    state: &DerivedBatteryState,
    theme: &ThemeColors,
) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(header);

    let battery = &state.battery_indicator;
    let health = &state.efficiency_indicator;

    frame.render_widget(
        Paragraph::new(indicator_line(battery.glyph, state.formatted_status, battery.color)),
        header_chunks[0],
    );
    frame.render_widget(
        Paragraph::new(indicator_line(health.glyph, health.label, health.color))
            .alignment(Alignment::Right),
        header_chunks[1],
    );

    if body.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(body);

    let charge_block = Block::default()
        .title(" Charge ")
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .padding(Padding::horizontal(1));
    let charge_inner = charge_block.inner(chunks[0]);
    frame.render_widget(charge_block, chunks[0]);

    let charge_lines = vec![
        label_value("Remaining", format_mwh(state.remaining_capacity_mwh), theme),
        label_value("Of full", format_percent(state.effective_percent_remaining), theme),
        label_value("Of design", format_percent(state.percent_remaining), theme),
        label_value("Rate", format_mw(state.charge_rate_mw), theme),
    ];
    frame.render_widget(Paragraph::new(charge_lines), charge_inner);

    let health_block = Block::default()
        .title(" Health ")
        .title_alignment(Alignment::Right)
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .padding(Padding::horizontal(1));
    let health_inner = health_block.inner(chunks[1]);
    frame.render_widget(health_block, chunks[1]);

    let health_lines = vec![
        label_value("Design", format_mwh(state.design_capacity_mwh), theme),
        label_value("Full charge", format_mwh(state.full_charge_capacity_mwh), theme),
        label_value("Efficiency", format_percent(state.efficiency), theme),
        Line::from(Span::styled(
            state.efficiency_status.clone(),
            Style::default().fg(indicator_color(health.color)),
        )),
    ];
    frame.render_widget(
        Paragraph::new(health_lines).wrap(Wrap { trim: true }),
        health_inner,
    );
}

fn indicator_line(
    glyph: &'static str,
    label: &'static str,
    color: IndicatorColor,
) -> Line<'static> {
    let color = indicator_color(color);
    Line::from(vec![
        Span::styled(glyph, Style::default().fg(color)),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn label_value(label: &'static str, value: String, theme: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:12}", label), theme.muted_style()),
        Span::styled(value, theme.fg_style()),
    ])
}

fn format_percent(value: Option<f64>) -> String {
    value.map_or("unknown".to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn v_center(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area)[1]
}
