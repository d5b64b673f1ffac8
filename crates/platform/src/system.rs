//! Battery access backed by the system power API (via `starship-battery`).

use color_eyre::eyre::{eyre, Result};
use starship_battery::units::energy::watt_hour;
use starship_battery::units::power::watt;
use starship_battery::{Battery, Manager};
use tracing::{debug, warn};

use crate::device::{BatteryDevice, DeviceDetails, DeviceEnumerator, DeviceId};
use crate::report::{BatteryReport, BatteryReportSource};
use crate::types::{BatteryStatus, BatteryTechnology};

const DEVICE_ID_PREFIX: &str = "battery-";

/// The aggregate of every battery in the system.
///
/// Capacities and charge rates are summed across batteries, mirroring how
/// the OS presents a single aggregate battery.
pub struct SystemBatteries {
    manager: Manager,
}

impl SystemBatteries {
    pub fn new() -> Result<Self> {
        Ok(Self {
            manager: Manager::new()?,
        })
    }
}

impl BatteryReportSource for SystemBatteries {
    fn current_report(&mut self) -> Result<BatteryReport> {
        let mut reports = Vec::new();
        for (index, battery) in self.manager.batteries()?.enumerate() {
            let mut battery = match battery {
                Ok(battery) => battery,
                Err(e) => {
                    warn!(index, error = %e, "Failed to read battery");
                    continue;
                }
            };
            if let Err(e) = self.manager.refresh(&mut battery) {
                warn!(index, error = %e, "Failed to refresh battery");
                continue;
            }
            reports.push(report_from_battery(&battery));
        }

        debug!(batteries = reports.len(), "Aggregated battery report");
        Ok(aggregate_reports(&reports))
    }
}

impl DeviceEnumerator for SystemBatteries {
    type Device = SystemDevice;

    fn device_ids(&self) -> Result<Vec<DeviceId>> {
        let count = self.manager.batteries()?.count();
        Ok((0..count)
            .map(|i| DeviceId(format!("{}{}", DEVICE_ID_PREFIX, i)))
            .collect())
    }

    fn open(&self, id: &DeviceId) -> Result<SystemDevice> {
        let index = parse_device_index(id)?;
        let manager = Manager::new()?;
        let battery = manager
            .batteries()?
            .nth(index)
            .ok_or_else(|| eyre!("Battery device {} not found", id))??;

        Ok(SystemDevice {
            id: id.clone(),
            manager,
            battery,
        })
    }
}

/// A single system battery.
pub struct SystemDevice {
    id: DeviceId,
    manager: Manager,
    battery: Battery,
}

impl BatteryDevice for SystemDevice {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn details(&self) -> DeviceDetails {
        DeviceDetails {
            vendor: self.battery.vendor().map(str::to_string),
            model: self.battery.model().map(str::to_string),
            serial_number: self
                .battery
                .serial_number()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            technology: BatteryTechnology::from(self.battery.technology()),
            cycle_count: self.battery.cycle_count(),
        }
    }

    fn report(&mut self) -> Result<BatteryReport> {
        self.manager.refresh(&mut self.battery)?;
        Ok(report_from_battery(&self.battery))
    }
}

fn parse_device_index(id: &DeviceId) -> Result<usize> {
    id.0.strip_prefix(DEVICE_ID_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| eyre!("Invalid battery device id: {}", id))
}

fn report_from_battery(battery: &Battery) -> BatteryReport {
    let status = BatteryStatus::from(battery.state());
    let rate_mw = (battery.energy_rate().get::<watt>().abs() * 1000.0).round() as i32;

    BatteryReport {
        design_capacity_mwh: wh_to_mwh(battery.energy_full_design().get::<watt_hour>()),
        full_charge_capacity_mwh: wh_to_mwh(battery.energy_full().get::<watt_hour>()),
        remaining_capacity_mwh: wh_to_mwh(battery.energy().get::<watt_hour>()),
        charge_rate_mw: Some(match status {
            BatteryStatus::Discharging => -rate_mw,
            _ => rate_mw,
        }),
        status,
    }
}

/// Zero or non-finite readings mean the OS did not report the value.
fn wh_to_mwh(wh: f32) -> Option<u32> {
    if wh.is_finite() && wh > 0.0 {
        Some((wh * 1000.0).round() as u32)
    } else {
        None
    }
}

/// Combine per-battery reports into one aggregate report.
///
/// A capacity is known only if every battery reports it.
pub(crate) fn aggregate_reports(reports: &[BatteryReport]) -> BatteryReport {
    if reports.is_empty() {
        return BatteryReport::not_present();
    }

    let status = if reports.iter().any(|r| r.status == BatteryStatus::Charging) {
        BatteryStatus::Charging
    } else if reports.iter().any(|r| r.status == BatteryStatus::Discharging) {
        BatteryStatus::Discharging
    } else {
        BatteryStatus::Idle
    };

    BatteryReport {
        design_capacity_mwh: sum_known(reports.iter().map(|r| r.design_capacity_mwh)),
        full_charge_capacity_mwh: sum_known(reports.iter().map(|r| r.full_charge_capacity_mwh)),
        remaining_capacity_mwh: sum_known(reports.iter().map(|r| r.remaining_capacity_mwh)),
        charge_rate_mw: reports
            .iter()
            .map(|r| r.charge_rate_mw)
            .try_fold(0i32, |acc, rate| rate.map(|r| acc.saturating_add(r))),
        status,
    }
}

fn sum_known(mut values: impl Iterator<Item = Option<u32>>) -> Option<u32> {
    values.try_fold(0u32, |acc, v| v.map(|v| acc.saturating_add(v)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn report(status: BatteryStatus, full: Option<u32>, rate: i32) -> BatteryReport {
        BatteryReport {
            design_capacity_mwh: Some(50_000),
            full_charge_capacity_mwh: full,
            remaining_capacity_mwh: Some(20_000),
            charge_rate_mw: Some(rate),
            status,
        }
    }

    #[test]
    fn test_aggregate_empty_is_not_present() {
        assert_eq!(aggregate_reports(&[]), BatteryReport::not_present());
    }

    #[test]
    fn test_aggregate_sums_capacities() {
        let combined = aggregate_reports(&[
            report(BatteryStatus::Discharging, Some(45_000), -8_000),
            report(BatteryStatus::Idle, Some(40_000), 0),
        ]);

        assert_eq!(
            combined,
            BatteryReport {
                design_capacity_mwh: Some(100_000),
                full_charge_capacity_mwh: Some(85_000),
                remaining_capacity_mwh: Some(40_000),
                charge_rate_mw: Some(-8_000),
                status: BatteryStatus::Discharging,
            }
        );
    }

    #[test]
    fn test_aggregate_unknown_capacity_stays_unknown() {
        let combined = aggregate_reports(&[
            report(BatteryStatus::Charging, Some(45_000), 9_000),
            report(BatteryStatus::Discharging, None, -1_000),
        ]);

        assert_eq!(combined.full_charge_capacity_mwh, None);
        assert_eq!(combined.status, BatteryStatus::Charging);
    }

    #[test]
    fn test_sum_known() {
        assert_eq!(sum_known([Some(1), Some(2)].into_iter()), Some(3));
        assert_eq!(sum_known([Some(1), None].into_iter()), None);
        assert_eq!(sum_known(std::iter::empty()), Some(0));
        assert_eq!(sum_known([Some(u32::MAX), Some(1)].into_iter()), Some(u32::MAX));
    }

    #[test]
    fn test_wh_to_mwh() {
        assert_eq!(wh_to_mwh(52.6), Some(52_600));
        assert_eq!(wh_to_mwh(0.0), None);
        assert_eq!(wh_to_mwh(f32::NAN), None);
    }

    #[test]
    fn test_parse_device_index() {
        assert_eq!(parse_device_index(&DeviceId("battery-2".into())).unwrap(), 2);
        assert!(parse_device_index(&DeviceId("BAT0".into())).is_err());
    }
}
