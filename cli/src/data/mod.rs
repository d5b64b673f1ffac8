pub mod aggregator;
pub mod devices;
pub mod history;
pub mod indicator;
pub mod watcher;

pub use aggregator::{BatteryStatusAggregator, ChangeSet, DerivedBatteryState, Property};
pub use devices::{DeviceEntry, DeviceList};
pub use history::ChargeRateHistory;
pub use indicator::{GlyphSet, HealthTier, Indicator, IndicatorColor};
pub use watcher::ReportWatcher;
