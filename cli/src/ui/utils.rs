use std::time::Duration;

use ratatui::layout::Rect;

/// Center a fixed-size rectangle within an area (clamped to fit).
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Format an elapsed duration at second precision (e.g., "1m 5s").
pub fn format_elapsed(elapsed: Duration) -> String {
    humantime::format_duration(Duration::from_secs(elapsed.as_secs())).to_string()
}

/// Format an energy reading in milliwatt-hours as watt-hours.
pub fn format_mwh(value: Option<u32>) -> String {
    value.map_or("unknown".to_string(), |v| {
        format!("{:.1} Wh", v as f64 / 1000.0)
    })
}

/// Format a signed rate in milliwatts as watts; negative means discharging.
pub fn format_mw(value: Option<i32>) -> String {
    value.map_or("unknown".to_string(), |v| {
        format!("{:+.1} W", v as f64 / 1000.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_units() {
        assert_eq!(format_mwh(Some(52_600)), "52.6 Wh");
        assert_eq!(format_mwh(None), "unknown");
        assert_eq!(format_mw(Some(-8_300)), "-8.3 W");
        assert_eq!(format_mw(Some(15_000)), "+15.0 W");
        assert_eq!(format_mw(None), "unknown");
    }

    #[test]
    fn test_format_elapsed_drops_subseconds() {
        assert_eq!(format_elapsed(Duration::from_millis(65_400)), "1m 5s");
        assert_eq!(format_elapsed(Duration::from_millis(300)), "0s");
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(area, 100, 100);
        assert_eq!(rect, Rect::new(2, 1, 36, 8));

        let rect = centered_rect(area, 20, 4);
        assert_eq!(rect, Rect::new(10, 3, 20, 4));
    }
}
