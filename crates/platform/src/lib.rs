//! Battery report sources and device enumeration for juice.
//!
//! This crate provides the platform-facing half of juice: the raw
//! [`BatteryReport`] shape, the [`BatteryReportSource`] trait that stands in
//! for the OS "aggregate battery", and device enumeration that tolerates
//! individual devices failing to resolve.
//!
//! # Example
//!
//! ```ignore
//! use juice_platform::{BatteryReportSource, SystemBatteries};
//!
//! let mut source = SystemBatteries::new()?;
//! let report = source.current_report()?;
//! println!("Status: {}", report.status);
//! ```

mod device;
mod report;
mod system;
mod types;

pub use device::{enumerate_batteries, BatteryDevice, DeviceDetails, DeviceEnumerator, DeviceId};
pub use report::{BatteryReport, BatteryReportSource};
pub use system::{SystemBatteries, SystemDevice};
pub use types::{BatteryStatus, BatteryTechnology};
