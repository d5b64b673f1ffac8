//! Core types and constants for the TUI application.

/// Step size for refresh rate adjustments in milliseconds.
pub const REFRESH_STEP_MS: u64 = 500;

/// How long the event loop waits for input before draining new reports.
pub const UI_POLL_MS: u64 = 100;

/// How often the "updated Xs ago" text is redrawn while nothing else changes.
pub const STATUS_REDRAW_MS: u64 = 1000;

/// Actions that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    ToggleDevices,
    RefreshDevices,
    CloseOverlay,
    SelectNext,
    SelectPrevious,
    CycleAppearance,
    CycleIcons,
    ToggleGraph,
    IncreaseRefreshRate,
    DecreaseRefreshRate,
    None,
}

/// Current view state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Main,
    Help,
    Devices,
}
