//! Status glyphs, health tiers, and the lookup tables that connect them.

use std::fmt;

use juice_platform::BatteryStatus;
use serde::{Deserialize, Serialize, Serializer};

/// Highest percentage bucket (100%).
pub const MAX_BUCKET: usize = 10;

/// An RGB color attached to an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl IndicatorColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for IndicatorColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

pub const CRITICAL_COLOR: IndicatorColor = IndicatorColor::new(0xFF, 0x4A, 0x4A);
pub const POOR_COLOR: IndicatorColor = IndicatorColor::new(0xFF, 0xA4, 0x4A);
pub const GOOD_COLOR: IndicatorColor = IndicatorColor::new(0x4A, 0xFF, 0x7B);
pub const UNKNOWN_COLOR: IndicatorColor = IndicatorColor::new(0x80, 0x80, 0x8C);

/// A glyph, color and label triple rendered next to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub glyph: &'static str,
    pub color: IndicatorColor,
    pub label: &'static str,
}

/// Battery health derived from the efficiency ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HealthTier {
    Critical,
    Poor,
    Fair,
    Good,
}

impl HealthTier {
    pub fn label(&self) -> &'static str {
        match self {
            HealthTier::Critical => "Critical",
            HealthTier::Poor => "Poor",
            HealthTier::Fair => "Fair",
            HealthTier::Good => "Good",
        }
    }

    pub fn color(&self) -> IndicatorColor {
        match self {
            HealthTier::Critical => CRITICAL_COLOR,
            HealthTier::Poor => POOR_COLOR,
            HealthTier::Fair | HealthTier::Good => GOOD_COLOR,
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which glyph set to draw indicators with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Nerd Font battery icons
    #[default]
    Nerd,
    /// Plain ASCII gauges for terminals without a patched font
    Ascii,
}

impl GlyphSet {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ascii" | "plain" => GlyphSet::Ascii,
            _ => GlyphSet::Nerd,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlyphSet::Nerd => "nerd",
            GlyphSet::Ascii => "ascii",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            GlyphSet::Nerd => GlyphSet::Ascii,
            GlyphSet::Ascii => GlyphSet::Nerd,
        }
    }

    fn table(&self) -> &'static GlyphTable {
        match self {
            GlyphSet::Nerd => &NERD_GLYPHS,
            GlyphSet::Ascii => &ASCII_GLYPHS,
        }
    }
}

/// One row of battery glyphs per status, plus the health glyphs.
struct GlyphTable {
    not_present: [&'static str; 1],
    discharging: [&'static str; MAX_BUCKET + 1],
    idle: [&'static str; 1],
    charging: [&'static str; MAX_BUCKET + 1],
    /// Critical, Poor, Fair, Good
    health: [&'static str; 4],
    unknown: &'static str,
}

impl GlyphTable {
    fn row(&self, status: BatteryStatus) -> &[&'static str] {
        match status {
            BatteryStatus::Discharging => &self.discharging,
            BatteryStatus::Idle => &self.idle,
            BatteryStatus::Charging => &self.charging,
            BatteryStatus::NotPresent | BatteryStatus::Unknown(_) => &self.not_present,
        }
    }

    fn health(&self, tier: HealthTier) -> &'static str {
        self.health[tier as usize]
    }
}

static NERD_GLYPHS: GlyphTable = GlyphTable {
    not_present: ["\u{f0091}"],
    discharging: [
        "\u{f008e}",
        "\u{f007a}",
        "\u{f007b}",
        "\u{f007c}",
        "\u{f007d}",
        "\u{f007e}",
        "\u{f007f}",
        "\u{f0080}",
        "\u{f0081}",
        "\u{f0082}",
        "\u{f0079}",
    ],
    idle: ["\u{f0085}"],
    charging: [
        "\u{f089f}",
        "\u{f089c}",
        "\u{f0086}",
        "\u{f0087}",
        "\u{f0088}",
        "\u{f089d}",
        "\u{f0089}",
        "\u{f089e}",
        "\u{f008a}",
        "\u{f008b}",
        "\u{f0085}",
    ],
    health: ["\u{f0083}", "\u{f0026}", "\u{f06df}", "\u{f02d1}"],
    unknown: "\u{f0091}",
};

static ASCII_GLYPHS: GlyphTable = GlyphTable {
    not_present: ["[    --    ]"],
    discharging: [
        "[          ]",
        "[#         ]",
        "[##        ]",
        "[###       ]",
        "[####      ]",
        "[#####     ]",
        "[######    ]",
        "[#######   ]",
        "[########  ]",
        "[######### ]",
        "[##########]",
    ],
    idle: ["[====ac====]"],
    charging: [
        "[          ]+",
        "[#         ]+",
        "[##        ]+",
        "[###       ]+",
        "[####      ]+",
        "[#####     ]+",
        "[######    ]+",
        "[#######   ]+",
        "[########  ]+",
        "[######### ]+",
        "[##########]+",
    ],
    health: ["[X]", "[!]", "[~]", "[+]"],
    unknown: "[?]",
};

/// Display text for a battery status.
pub fn format_status(status: BatteryStatus) -> &'static str {
    status.label()
}

/// Map an effective charge fraction to a 0..=10 bucket.
///
/// Rounds half away from zero (`f64::round`), so 0.45 lands in bucket 5.
/// An unknown or non-finite fraction is bucket 0, and idle batteries are
/// always bucket 0 because their row has a single entry.
pub fn percentage_bucket(status: BatteryStatus, effective_percent: Option<f64>) -> usize {
    if status == BatteryStatus::Idle {
        return 0;
    }

    match effective_percent {
        Some(p) if p.is_finite() => (p * 10.0).round().clamp(0.0, MAX_BUCKET as f64) as usize,
        _ => 0,
    }
}

/// Health tier for an efficiency ratio, or `None` when it is unknown.
pub fn efficiency_tier(efficiency: Option<f64>) -> Option<HealthTier> {
    let efficiency = efficiency.filter(|e| !e.is_nan())?;
    Some(if efficiency <= 0.25 {
        HealthTier::Critical
    } else if efficiency <= 0.50 {
        HealthTier::Poor
    } else if efficiency <= 0.75 {
        HealthTier::Fair
    } else {
        HealthTier::Good
    })
}

/// Glyph for a status and bucket, clamped into the status row.
pub fn battery_glyph(glyphs: GlyphSet, status: BatteryStatus, bucket: usize) -> &'static str {
    let row = glyphs.table().row(status);
    row[bucket.min(row.len() - 1)]
}

/// Indicator for the battery charge level.
pub fn battery_indicator(
    glyphs: GlyphSet,
    status: BatteryStatus,
    effective_percent: Option<f64>,
) -> Indicator {
    let bucket = percentage_bucket(status, effective_percent);
    let color = match status {
        BatteryStatus::NotPresent => CRITICAL_COLOR,
        BatteryStatus::Unknown(_) => UNKNOWN_COLOR,
        BatteryStatus::Idle | BatteryStatus::Charging => GOOD_COLOR,
        BatteryStatus::Discharging if effective_percent.is_none() => UNKNOWN_COLOR,
        BatteryStatus::Discharging => match bucket {
            0..=2 => CRITICAL_COLOR,
            3..=5 => POOR_COLOR,
            _ => GOOD_COLOR,
        },
    };

    Indicator {
        glyph: battery_glyph(glyphs, status, bucket),
        color,
        label: format_status(status),
    }
}

/// Indicator for the health tier; an unknown tier gets a muted placeholder.
pub fn efficiency_indicator(glyphs: GlyphSet, tier: Option<HealthTier>) -> Indicator {
    let table = glyphs.table();
    match tier {
        Some(tier) => Indicator {
            glyph: table.health(tier),
            color: tier.color(),
            label: tier.label(),
        },
        None => Indicator {
            glyph: table.unknown,
            color: UNKNOWN_COLOR,
            label: "Unknown",
        },
    }
}

/// Sentence describing how much of its design capacity the battery holds.
pub fn efficiency_message(efficiency: Option<f64>) -> String {
    let Some(efficiency) = efficiency else {
        return "Your battery's designed capacity is unknown.".to_string();
    };
    let percent = efficiency * 100.0;

    match efficiency_tier(Some(efficiency)) {
        Some(HealthTier::Critical) => format!(
            "Your battery can only hold {:.0}% of its designed capacity. Please replace your battery.",
            percent
        ),
        Some(HealthTier::Poor) => format!(
            "Your battery can only hold {:.0}% of its designed capacity. Consider replacing your battery.",
            percent
        ),
        _ => format!(
            "Your battery is holding {:.0}% of its designed capacity.",
            percent
        ),
    }
}
