//! Application core module.
//!
//! This module contains the main App struct that owns the aggregator and
//! everything the TUI renders.

mod actions;
mod tui;
pub mod types;

pub use tui::run_tui;

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use juice_platform::{BatteryReportSource, SystemBatteries};
use tracing::{debug, info, warn};

use crate::config::{RuntimeConfig, UserConfig};
use crate::data::{
    BatteryStatusAggregator, ChargeRateHistory, DerivedBatteryState, DeviceList, ReportWatcher,
};
use crate::theme::ThemeColors;

pub use types::{Action, AppView};

type SourceFactory =
    Arc<dyn Fn() -> Result<Box<dyn BatteryReportSource>> + Send + Sync + 'static>;

/// Main application state for the TUI.
///
/// Reports are read on the watcher thread and handed over through a channel;
/// the aggregator itself is only ever touched from the UI thread.
pub struct App {
    pub config: RuntimeConfig,
    pub view: AppView,
    pub aggregator: BatteryStatusAggregator,
    pub history: ChargeRateHistory,
    pub devices: DeviceList,
    pub devices_error: Option<String>,
    pub selected_device: usize,
    pub refresh_ms: u64,
    pub last_update: Option<Instant>,
    watcher: ReportWatcher,
    source_factory: SourceFactory,
}

impl App {
    /// Creates an App reading from the system batteries.
    pub fn new(user_config: UserConfig) -> Self {
        Self::with_source(user_config, || {
            let source: Box<dyn BatteryReportSource> = Box::new(SystemBatteries::new()?);
            Ok(source)
        })
    }

    /// Creates an App reading from an arbitrary report source.
    pub fn with_source<F>(user_config: UserConfig, make_source: F) -> Self
    where
        F: Fn() -> Result<Box<dyn BatteryReportSource>> + Send + Sync + 'static,
    {
        info!(refresh_ms = user_config.refresh_ms, "Initializing app");

        let source_factory: SourceFactory = Arc::new(make_source);
        let refresh_ms = user_config.refresh_ms;
        let watcher = spawn_watcher(&source_factory, refresh_ms);

        Self {
            aggregator: BatteryStatusAggregator::new(user_config.icons),
            history: ChargeRateHistory::new(user_config.history_points),
            config: RuntimeConfig::new(user_config),
            view: AppView::Main,
            devices: DeviceList::default(),
            devices_error: None,
            selected_device: 0,
            refresh_ms,
            last_update: None,
            watcher,
            source_factory,
        }
    }

    /// Drains pending reports and ingests the newest one.
    ///
    /// Returns `true` if the UI should be redrawn.
    pub fn tick(&mut self) -> bool {
        let Some(report) = self.watcher.latest() else {
            return false;
        };

        let changes = self.aggregator.ingest_report(report);
        let recorded = self.history.record(report.charge_rate_mw);
        self.last_update = Some(Instant::now());

        debug!(
            changed = changes.len(),
            recorded, "Ingested battery report"
        );

        !changes.is_empty() || (recorded && self.config.user_config.show_graph)
    }

    pub fn state(&self) -> Option<&DerivedBatteryState> {
        self.aggregator.state()
    }

    pub fn current_theme(&self) -> ThemeColors {
        self.config.theme()
    }

    pub fn is_source_connected(&self) -> bool {
        self.watcher.is_connected()
    }

    /// Restart polling with the current refresh interval.
    pub(crate) fn restart_watcher(&mut self) {
        self.watcher = spawn_watcher(&self.source_factory, self.refresh_ms);
    }

    pub(crate) fn load_devices(&mut self) {
        match DeviceList::from_system(self.aggregator.glyphs()) {
            Ok(devices) => {
                self.devices = devices;
                self.devices_error = None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to enumerate battery devices");
                self.devices = DeviceList::default();
                self.devices_error = Some(e.to_string());
            }
        }
        self.selected_device = self
            .selected_device
            .min(self.devices.len().saturating_sub(1));
    }
}

fn spawn_watcher(factory: &SourceFactory, refresh_ms: u64) -> ReportWatcher {
    let factory = Arc::clone(factory);
    ReportWatcher::spawn(move || factory(), Duration::from_millis(refresh_ms))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use juice_platform::{BatteryReport, BatteryStatus};

    use super::*;
    use crate::data::{GlyphSet, Property};

    struct SteadySource {
        remaining: Arc<AtomicU32>,
    }

    impl BatteryReportSource for SteadySource {
        fn current_report(&mut self) -> Result<BatteryReport> {
            Ok(BatteryReport {
                design_capacity_mwh: Some(50_000),
                full_charge_capacity_mwh: Some(40_000),
                remaining_capacity_mwh: Some(self.remaining.load(Ordering::SeqCst)),
                charge_rate_mw: Some(-10_000),
                status: BatteryStatus::Discharging,
            })
        }
    }

    fn test_app(remaining: Arc<AtomicU32>) -> App {
        let config = UserConfig {
            refresh_ms: 10,
            icons: GlyphSet::Ascii,
            ..UserConfig::default()
        };
        App::with_source(config, move || {
            let source: Box<dyn BatteryReportSource> = Box::new(SteadySource {
                remaining: Arc::clone(&remaining),
            });
            Ok(source)
        })
    }

    fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.tick();
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("condition not reached before deadline");
    }

    #[test]
    fn test_tick_ingests_reports() {
        let remaining = Arc::new(AtomicU32::new(20_000));
        let mut app = test_app(Arc::clone(&remaining));

        tick_until(&mut app, |app| app.state().is_some());

        let state = app.state().unwrap();
        assert_eq!(state.effective_percent_remaining, Some(0.5));
        assert!(!app.history.points.is_empty());
        assert!(app.last_update.is_some());
    }

    #[test]
    fn test_later_reports_win() {
        let remaining = Arc::new(AtomicU32::new(20_000));
        let mut app = test_app(Arc::clone(&remaining));
        tick_until(&mut app, |app| app.state().is_some());

        remaining.store(30_000, Ordering::SeqCst);
        tick_until(&mut app, |app| {
            app.state().and_then(|s| s.remaining_capacity_mwh) == Some(30_000)
        });

        assert_eq!(
            app.state().map(|s| s.display_value(Property::EffectivePercentRemaining)),
            Some("75.0%".to_string())
        );
    }
}
