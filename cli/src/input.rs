use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, App, AppView};

pub mod keys {
    pub const HELP: &str = "?";
    pub const QUIT: &str = "q";
    pub const DEVICES: &str = "d";
    pub const APPEARANCE: &str = "a";
    pub const ICONS: &str = "i";
    pub const GRAPH: &str = "g";
    pub const REFRESH_FASTER: &str = "+";
    pub const REFRESH_SLOWER: &str = "-";
    pub const RELOAD: &str = "r";
    pub const ESC: &str = "Esc";
}

/// Key bindings shown in the help overlay, in display order.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    (keys::HELP, "Toggle this help"),
    (keys::DEVICES, "Show battery devices"),
    (keys::APPEARANCE, "Cycle appearance (auto/dark/light)"),
    (keys::ICONS, "Cycle icon set (nerd/ascii)"),
    (keys::GRAPH, "Toggle charge rate graph"),
    (keys::REFRESH_FASTER, "Refresh faster"),
    (keys::REFRESH_SLOWER, "Refresh slower"),
    (keys::RELOAD, "Reload device list"),
    (keys::ESC, "Close overlay"),
    (keys::QUIT, "Quit"),
];

pub fn handle_key(app: &App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.view {
        AppView::Main => handle_main_keys(key),
        AppView::Help => handle_help_keys(key),
        AppView::Devices => handle_devices_keys(key),
    }
}

fn handle_main_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') | KeyCode::Char('/') => Action::ToggleHelp,
        KeyCode::Char('d') => Action::ToggleDevices,
        KeyCode::Char('a') => Action::CycleAppearance,
        KeyCode::Char('i') => Action::CycleIcons,
        KeyCode::Char('g') => Action::ToggleGraph,
        KeyCode::Char('=') | KeyCode::Char('+') => Action::IncreaseRefreshRate,
        KeyCode::Char('-') => Action::DecreaseRefreshRate,
        _ => Action::None,
    }
}

fn handle_help_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseOverlay,
        _ => Action::None,
    }
}

fn handle_devices_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('d') | KeyCode::Char('q') => Action::CloseOverlay,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('r') => Action::RefreshDevices,
        KeyCode::Char('i') => Action::CycleIcons,
        _ => Action::None,
    }
}
