use color_eyre::eyre::Result;
use juice_platform::{
    enumerate_batteries, BatteryDevice, BatteryReport, DeviceDetails, DeviceEnumerator, DeviceId,
    SystemBatteries,
};
use serde::Serialize;
use tracing::{debug, warn};

use super::aggregator::DerivedBatteryState;
use super::indicator::GlyphSet;

/// One enumerated battery and its latest report.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceEntry {
    pub id: DeviceId,
    pub details: DeviceDetails,
    pub report: Option<BatteryReport>,
    pub derived: Option<DerivedBatteryState>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceList {
    pub devices: Vec<DeviceEntry>,
}

impl DeviceList {
    /// Enumerate the system's batteries.
    pub fn from_system(glyphs: GlyphSet) -> Result<Self> {
        let batteries = SystemBatteries::new()?;
        Self::load(&batteries, glyphs)
    }

    /// Enumerate devices and pull one report from each.
    ///
    /// Devices that fail to resolve are skipped; a device whose report
    /// cannot be read is listed without one.
    pub fn load<E: DeviceEnumerator>(enumerator: &E, glyphs: GlyphSet) -> Result<Self> {
        let devices = enumerate_batteries(enumerator)?
            .into_iter()
            .map(|mut device| {
                let report = match device.report() {
                    Ok(report) => Some(report),
                    Err(e) => {
                        warn!(device = %device.id(), error = %e, "Failed to read device report");
                        None
                    }
                };
                DeviceEntry {
                    id: device.id().clone(),
                    details: device.details(),
                    derived: report.map(|r| DerivedBatteryState::derive(&r, glyphs)),
                    report,
                }
            })
            .collect::<Vec<_>>();

        debug!(count = devices.len(), "Loaded battery devices");
        Ok(Self { devices })
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;
    use juice_platform::BatteryStatus;

    use super::*;

    struct Fake {
        id: DeviceId,
        readable: bool,
    }

    impl BatteryDevice for Fake {
        fn id(&self) -> &DeviceId {
            &self.id
        }

        fn details(&self) -> DeviceDetails {
            DeviceDetails::default()
        }

        fn report(&mut self) -> Result<BatteryReport> {
            if !self.readable {
                return Err(eyre!("read failed"));
            }
            Ok(BatteryReport {
                design_capacity_mwh: Some(60_000),
                full_charge_capacity_mwh: Some(12_000),
                remaining_capacity_mwh: Some(6_000),
                charge_rate_mw: Some(-4_000),
                status: BatteryStatus::Discharging,
            })
        }
    }

    struct FakeEnumerator;

    impl DeviceEnumerator for FakeEnumerator {
        type Device = Fake;

        fn device_ids(&self) -> Result<Vec<DeviceId>> {
            Ok(vec![
                DeviceId("a".into()),
                DeviceId("b".into()),
                DeviceId("c".into()),
            ])
        }

        fn open(&self, id: &DeviceId) -> Result<Fake> {
            match id.0.as_str() {
                "b" => Err(eyre!("cannot open")),
                "c" => Ok(Fake {
                    id: id.clone(),
                    readable: false,
                }),
                _ => Ok(Fake {
                    id: id.clone(),
                    readable: true,
                }),
            }
        }
    }

    #[test]
    fn test_load_skips_unresolvable_devices() {
        let list = DeviceList::load(&FakeEnumerator, GlyphSet::Ascii).unwrap();

        let ids: Vec<&str> = list.devices.iter().map(|d| d.id.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_unreadable_device_has_no_report() {
        let list = DeviceList::load(&FakeEnumerator, GlyphSet::Ascii).unwrap();

        let a = &list.devices[0];
        let derived = a.derived.as_ref().unwrap();
        assert_eq!(derived.efficiency, Some(0.2));
        assert_eq!(derived.efficiency_indicator.label, "Critical");

        let c = &list.devices[1];
        assert!(c.report.is_none());
        assert!(c.derived.is_none());
    }
}
