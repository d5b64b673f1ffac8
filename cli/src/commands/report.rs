use std::time::Duration;

use color_eyre::eyre::Result;
use juice_platform::{BatteryReport, BatteryReportSource, SystemBatteries};
use serde_json::{json, Value};

use crate::data::{DerivedBatteryState, GlyphSet};

pub fn run(samples: u32, interval: u64, compact: bool, glyphs: GlyphSet) -> Result<()> {
    let mut source = SystemBatteries::new()?;
    let mut counter = 0u32;

    loop {
        let report = source.current_report()?;
        let doc = report_document(&report, glyphs);

        if compact {
            println!("{}", serde_json::to_string(&doc)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }

        counter += 1;
        if samples > 0 && counter >= samples {
            break;
        }

        std::thread::sleep(Duration::from_millis(interval));
    }

    Ok(())
}

fn report_document(report: &BatteryReport, glyphs: GlyphSet) -> Value {
    let derived = DerivedBatteryState::derive(report, glyphs);

    json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "report": report,
        "derived": {
            "formatted_status": derived.formatted_status,
            "percent_remaining": derived.percent_remaining,
            "effective_percent_remaining": derived.effective_percent_remaining,
            "formatted_percent": derived.formatted_percent(),
            "efficiency": derived.efficiency,
            "health_tier": derived.health_tier,
            "efficiency_status": derived.efficiency_status,
            "efficiency_indicator": derived.efficiency_indicator,
            "battery_indicator": derived.battery_indicator,
        },
    })
}
