//! Action handling methods for App.

use tracing::info;

use crate::config::{MAX_REFRESH_MS, MIN_REFRESH_MS};

use super::types::{Action, AppView, REFRESH_STEP_MS};
use super::App;

impl App {
    /// Main action handler.
    ///
    /// Returns `false` if the application should quit, `true` otherwise.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::None => {}

            Action::ToggleHelp => {
                self.view = match self.view {
                    AppView::Help => AppView::Main,
                    _ => AppView::Help,
                };
            }
            Action::ToggleDevices => {
                self.view = match self.view {
                    AppView::Devices => AppView::Main,
                    _ => {
                        self.load_devices();
                        AppView::Devices
                    }
                };
            }
            Action::RefreshDevices => {
                if self.view == AppView::Devices {
                    self.load_devices();
                }
            }
            Action::CloseOverlay => {
                self.view = AppView::Main;
            }

            Action::SelectNext => {
                if self.view == AppView::Devices
                    && self.selected_device + 1 < self.devices.len()
                {
                    self.selected_device += 1;
                }
            }
            Action::SelectPrevious => {
                if self.view == AppView::Devices {
                    self.selected_device = self.selected_device.saturating_sub(1);
                }
            }

            Action::CycleAppearance => {
                self.config.cycle_appearance();
            }
            Action::CycleIcons => {
                let icons = self.aggregator.glyphs().next();
                self.aggregator.set_glyphs(icons);
                self.config.set_icons(icons);
                if self.view == AppView::Devices {
                    self.load_devices();
                }
            }
            Action::ToggleGraph => {
                self.config.toggle_graph();
            }

            Action::IncreaseRefreshRate | Action::DecreaseRefreshRate => {
                self.handle_refresh_action(action);
            }
        }
        true
    }

    /// Faster refresh means a shorter interval.
    fn handle_refresh_action(&mut self, action: Action) {
        let new_ms = match action {
            Action::IncreaseRefreshRate => self
                .refresh_ms
                .saturating_sub(REFRESH_STEP_MS)
                .max(MIN_REFRESH_MS),
            Action::DecreaseRefreshRate => (self.refresh_ms + REFRESH_STEP_MS).min(MAX_REFRESH_MS),
            _ => return,
        };

        if new_ms != self.refresh_ms {
            info!(from = self.refresh_ms, to = new_ms, "Refresh interval changed");
            self.refresh_ms = new_ms;
            self.restart_watcher();
        }
    }
}
