use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::DeviceEntry;
use crate::theme::{indicator_color, ThemeColors};

use super::utils::{centered_rect, format_mw, format_mwh};

pub fn render(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let area = centered_rect(frame.area(), 70, 20);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Battery Devices ({}) ", app.devices.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.dialog_bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &app.devices_error {
        let message = Paragraph::new(format!("Failed to enumerate batteries: {}", error))
            .style(Style::default().fg(theme.danger))
            .centered();
        frame.render_widget(message, inner);
        return;
    }

    if app.devices.is_empty() {
        let message = Paragraph::new("No batteries found")
            .style(theme.muted_style())
            .centered();
        frame.render_widget(message, inner);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.devices.len().min(6) as u16),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let items: Vec<ListItem> = app
        .devices
        .devices
        .iter()
        .map(|entry| ListItem::new(device_summary(entry, theme)))
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(theme.border)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected_device));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(entry) = app.devices.devices.get(app.selected_device) {
        frame.render_widget(Paragraph::new(device_details(entry, theme)), chunks[2]);
    }
}

fn device_summary(entry: &DeviceEntry, theme: &ThemeColors) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{:12}", entry.id), theme.fg_style())];

    match &entry.derived {
        Some(derived) => {
            let indicator = &derived.battery_indicator;
            spans.push(Span::styled(
                indicator.glyph,
                Style::default().fg(indicator_color(indicator.color)),
            ));
            spans.push(Span::styled(
                format!(
                    " {} {}",
                    derived.formatted_status,
                    derived.formatted_percent().unwrap_or_default()
                ),
                theme.fg_style(),
            ));
        }
        None => spans.push(Span::styled("report unavailable", theme.muted_style())),
    }

    Line::from(spans)
}

fn device_details(entry: &DeviceEntry, theme: &ThemeColors) -> Vec<Line<'static>> {
    let details = &entry.details;
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "unknown".to_string());

    let mut lines = vec![
        detail_line("Vendor", text(&details.vendor), theme),
        detail_line("Model", text(&details.model), theme),
        detail_line("Serial", text(&details.serial_number), theme),
        detail_line("Technology", details.technology.to_string(), theme),
        detail_line(
            "Cycles",
            details
                .cycle_count
                .map_or("unknown".to_string(), |c| c.to_string()),
            theme,
        ),
    ];

    if let (Some(report), Some(derived)) = (&entry.report, &entry.derived) {
        lines.push(detail_line(
            "Capacity",
            format!(
                "{} of {} (design {})",
                format_mwh(report.remaining_capacity_mwh),
                format_mwh(report.full_charge_capacity_mwh),
                format_mwh(report.design_capacity_mwh)
            ),
            theme,
        ));
        lines.push(detail_line("Rate", format_mw(report.charge_rate_mw), theme));
        lines.push(Line::from(vec![
            Span::styled(format!("{:12}", "Health"), theme.muted_style()),
            Span::styled(
                derived.efficiency_status.clone(),
                Style::default().fg(indicator_color(derived.efficiency_indicator.color)),
            ),
        ]));
    }

    lines
}

fn detail_line(label: &'static str, value: String, theme: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:12}", label), theme.muted_style()),
        Span::styled(value, theme.fg_style()),
    ])
}
