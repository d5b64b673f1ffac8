//! Battery device enumeration.

use std::fmt;

use color_eyre::eyre::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::report::BatteryReport;
use crate::types::BatteryTechnology;

/// Opaque identifier of a battery device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Static facts about a battery device, where the OS exposes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceDetails {
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub technology: BatteryTechnology,
    pub cycle_count: Option<u32>,
}

/// A resolved battery handle whose report can be pulled on demand.
pub trait BatteryDevice {
    fn id(&self) -> &DeviceId;

    fn details(&self) -> DeviceDetails;

    fn report(&mut self) -> Result<BatteryReport>;
}

/// Lists battery devices and resolves them into handles.
pub trait DeviceEnumerator {
    type Device: BatteryDevice;

    /// List the identifiers of all battery devices.
    fn device_ids(&self) -> Result<Vec<DeviceId>>;

    /// Resolve one identifier into a device handle.
    fn open(&self, id: &DeviceId) -> Result<Self::Device>;
}

/// Enumerate every battery device, skipping the ones that fail to resolve.
///
/// Only a failure to list devices at all is returned as an error.
pub fn enumerate_batteries<E: DeviceEnumerator>(enumerator: &E) -> Result<Vec<E::Device>> {
    let ids = enumerator.device_ids()?;
    debug!(count = ids.len(), "Enumerating battery devices");

    let mut devices = Vec::with_capacity(ids.len());
    for id in ids {
        match enumerator.open(&id) {
            Ok(device) => devices.push(device),
            Err(e) => warn!(device = %id, error = %e, "Skipping battery device"),
        }
    }

    Ok(devices)
}
