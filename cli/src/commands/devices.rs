use color_eyre::eyre::Result;

use crate::data::{DeviceEntry, DeviceList, GlyphSet};
use crate::ui::utils::{format_mw, format_mwh};

pub fn run(json: bool, glyphs: GlyphSet) -> Result<()> {
    let list = DeviceList::from_system(glyphs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.is_empty() {
        println!("No batteries found");
        return Ok(());
    }

    for (i, entry) in list.devices.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", describe(entry));
    }

    Ok(())
}

fn describe(entry: &DeviceEntry) -> String {
    let mut out = format!("--- {} ---\n", entry.id);
    let details = &entry.details;

    if let Some(vendor) = &details.vendor {
        out.push_str(&format!("Vendor: {}\n", vendor));
    }
    if let Some(model) = &details.model {
        out.push_str(&format!("Model: {}\n", model));
    }
    if let Some(serial) = &details.serial_number {
        out.push_str(&format!("Serial: {}\n", serial));
    }
    out.push_str(&format!("Technology: {}\n", details.technology));
    if let Some(cycles) = details.cycle_count {
        out.push_str(&format!("Cycles: {}\n", cycles));
    }

    let (Some(report), Some(derived)) = (&entry.report, &entry.derived) else {
        out.push_str("Report: unavailable\n");
        return out;
    };

    out.push_str(&format!("Status: {}\n", derived.formatted_status));
    out.push_str(&format!(
        "Design capacity: {}\n",
        format_mwh(report.design_capacity_mwh)
    ));
    out.push_str(&format!(
        "Full charge capacity: {}\n",
        format_mwh(report.full_charge_capacity_mwh)
    ));
    out.push_str(&format!(
        "Remaining: {} {}\n",
        format_mwh(report.remaining_capacity_mwh),
        derived.formatted_percent().unwrap_or_default()
    ));
    out.push_str(&format!("Rate: {}\n", format_mw(report.charge_rate_mw)));
    out.push_str(&format!(
        "Health: {} ({})\n",
        derived.efficiency_indicator.label, derived.efficiency_status
    ));
    out
}

#[cfg(test)]
mod tests {
    use juice_platform::{BatteryReport, BatteryStatus, DeviceDetails, DeviceId};

    use super::*;
    use crate::data::DerivedBatteryState;

    #[test]
    fn test_describe_without_report() {
        let entry = DeviceEntry {
            id: DeviceId("battery-1".into()),
            details: DeviceDetails::default(),
            report: None,
            derived: None,
        };
        let text = describe(&entry);
        assert!(text.starts_with("--- battery-1 ---"));
        assert!(text.contains("Report: unavailable"));
    }

    #[test]
    fn test_describe_with_report() {
        let report = BatteryReport {
            design_capacity_mwh: Some(50_000),
            full_charge_capacity_mwh: None,
            remaining_capacity_mwh: Some(30_000),
            charge_rate_mw: Some(-6_000),
            status: BatteryStatus::Discharging,
        };
        let entry = DeviceEntry {
            id: DeviceId("battery-0".into()),
            details: DeviceDetails {
                vendor: Some("ACME".into()),
                ..Default::default()
            },
            derived: Some(DerivedBatteryState::derive(&report, GlyphSet::Ascii)),
            report: Some(report),
        };

        let text = describe(&entry);
        assert!(text.contains("Vendor: ACME"));
        assert!(text.contains("Full charge capacity: unknown"));
        assert!(text.contains("Health: Unknown"));
    }
}
