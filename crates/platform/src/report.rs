//! Battery reports and the sources that produce them.

use color_eyre::eyre::Result;
use serde::Serialize;

use crate::types::BatteryStatus;

/// A single battery report, as delivered by the power subsystem.
///
/// Every numeric field is optional: the OS may not know a value, and an
/// unknown value must stay unknown rather than be replaced with a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatteryReport {
    /// Factory capacity in milliwatt-hours.
    pub design_capacity_mwh: Option<u32>,

    /// Capacity when fully charged, in milliwatt-hours.
    pub full_charge_capacity_mwh: Option<u32>,

    /// Energy remaining, in milliwatt-hours.
    pub remaining_capacity_mwh: Option<u32>,

    /// Charge rate in milliwatts. Negative while discharging.
    pub charge_rate_mw: Option<i32>,

    pub status: BatteryStatus,
}

impl BatteryReport {
    /// Report for a system without a battery.
    pub fn not_present() -> Self {
        Self::default()
    }
}

/// Something that can produce the current aggregate battery report.
///
/// Production code uses [`crate::SystemBatteries`]; tests substitute fakes.
pub trait BatteryReportSource {
    /// Pull the current report.
    fn current_report(&mut self) -> Result<BatteryReport>;
}

impl<S: BatteryReportSource + ?Sized> BatteryReportSource for Box<S> {
    fn current_report(&mut self) -> Result<BatteryReport> {
        (**self).current_report()
    }
}
