mod devices;
mod graphs;
mod help;
mod overview;
mod status_bar;
pub mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, AppView};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const OVERVIEW_MIN: u16 = 12;
const GRAPH_MIN: u16 = 8;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.current_theme();
    let area = frame.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(OVERVIEW_MIN),
            Constraint::Length(1),
        ])
        .split(area);

    status_bar::render_title_bar(frame, outer_chunks[0], app, &theme);
    status_bar::render_status_bar(frame, outer_chunks[2], app, &theme);

    let content_area = outer_chunks[1];
    let show_graph =
        app.config.user_config.show_graph && content_area.height >= OVERVIEW_MIN + GRAPH_MIN;

    if show_graph {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(OVERVIEW_MIN), Constraint::Min(GRAPH_MIN)])
            .split(content_area);

        overview::render(frame, chunks[0], app, &theme);
        graphs::render(frame, chunks[1], app, &theme);
    } else {
        overview::render(frame, content_area, app, &theme);
    }

    match app.view {
        AppView::Help => help::render(frame, app, &theme),
        AppView::Devices => devices::render(frame, app, &theme),
        AppView::Main => {}
    }
}
