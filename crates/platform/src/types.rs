//! Shared types for battery reporting.

use std::fmt;

use serde::{Serialize, Serializer};

/// Battery status as reported by the power subsystem.
///
/// Raw codes follow the OS enumeration (0 = not present, 1 = discharging,
/// 2 = idle, 3 = charging). Anything else is kept as [`BatteryStatus::Unknown`]
/// so that a newer OS value never turns into a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BatteryStatus {
    /// No battery is installed
    #[default]
    NotPresent,
    /// Running on battery power
    Discharging,
    /// External power connected, battery neither charging nor discharging
    Idle,
    /// Battery is actively charging
    Charging,
    /// Unrecognized raw status code
    Unknown(i32),
}

impl BatteryStatus {
    /// Build a status from its raw OS code.
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => BatteryStatus::NotPresent,
            1 => BatteryStatus::Discharging,
            2 => BatteryStatus::Idle,
            3 => BatteryStatus::Charging,
            other => BatteryStatus::Unknown(other),
        }
    }

    /// Raw OS code for this status.
    pub fn raw(&self) -> i32 {
        match self {
            BatteryStatus::NotPresent => 0,
            BatteryStatus::Discharging => 1,
            BatteryStatus::Idle => 2,
            BatteryStatus::Charging => 3,
            BatteryStatus::Unknown(code) => *code,
        }
    }

    /// Human-readable label for the status.
    pub fn label(&self) -> &'static str {
        match self {
            BatteryStatus::Charging => "Charging",
            BatteryStatus::Discharging => "Discharging",
            BatteryStatus::Idle => "Not Charging",
            BatteryStatus::NotPresent => "Not Present",
            BatteryStatus::Unknown(_) => "Unknown",
        }
    }

    /// Returns true if external power is connected.
    pub fn is_plugged_in(&self) -> bool {
        matches!(self, BatteryStatus::Charging | BatteryStatus::Idle)
    }
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for BatteryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = match self {
            BatteryStatus::NotPresent => "not_present",
            BatteryStatus::Discharging => "discharging",
            BatteryStatus::Idle => "idle",
            BatteryStatus::Charging => "charging",
            BatteryStatus::Unknown(_) => "unknown",
        };
        serializer.serialize_str(name)
    }
}

impl From<starship_battery::State> for BatteryStatus {
    fn from(state: starship_battery::State) -> Self {
        match state {
            starship_battery::State::Charging => BatteryStatus::Charging,
            starship_battery::State::Discharging => BatteryStatus::Discharging,
            starship_battery::State::Empty => BatteryStatus::Discharging,
            // Both mean "on external power but not charging" for our purposes
            starship_battery::State::Full => BatteryStatus::Idle,
            starship_battery::State::Unknown => BatteryStatus::Idle,
        }
    }
}

/// Battery technology/chemistry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryTechnology {
    LithiumIon,
    LithiumPolymer,
    NickelMetalHydride,
    NickelCadmium,
    LeadAcid,
    #[default]
    Unknown,
}

impl BatteryTechnology {
    pub fn label(&self) -> &'static str {
        match self {
            BatteryTechnology::LithiumIon => "Li-ion",
            BatteryTechnology::LithiumPolymer => "Li-poly",
            BatteryTechnology::NickelMetalHydride => "NiMH",
            BatteryTechnology::NickelCadmium => "NiCd",
            BatteryTechnology::LeadAcid => "Lead-acid",
            BatteryTechnology::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BatteryTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<starship_battery::Technology> for BatteryTechnology {
    fn from(tech: starship_battery::Technology) -> Self {
        match tech {
            starship_battery::Technology::LithiumIon => BatteryTechnology::LithiumIon,
            starship_battery::Technology::LithiumPolymer => BatteryTechnology::LithiumPolymer,
            starship_battery::Technology::NickelMetalHydride => {
                BatteryTechnology::NickelMetalHydride
            }
            starship_battery::Technology::NickelCadmium => BatteryTechnology::NickelCadmium,
            starship_battery::Technology::LeadAcid => BatteryTechnology::LeadAcid,
            _ => BatteryTechnology::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(BatteryStatus::Charging.label(), "Charging");
        assert_eq!(BatteryStatus::Discharging.label(), "Discharging");
        assert_eq!(BatteryStatus::Idle.label(), "Not Charging");
        assert_eq!(BatteryStatus::NotPresent.label(), "Not Present");
        assert_eq!(BatteryStatus::from_raw(999).label(), "Unknown");
    }

    #[test]
    fn test_status_raw_codes() {
        for code in 0..4 {
            assert_eq!(BatteryStatus::from_raw(code).raw(), code);
        }
        assert_eq!(BatteryStatus::from_raw(-7), BatteryStatus::Unknown(-7));
    }

    #[test]
    fn test_status_is_plugged_in() {
        assert!(BatteryStatus::Charging.is_plugged_in());
        assert!(BatteryStatus::Idle.is_plugged_in());
        assert!(!BatteryStatus::Discharging.is_plugged_in());
        assert!(!BatteryStatus::NotPresent.is_plugged_in());
    }

    #[test]
    fn test_starship_state_conversion() {
        assert_eq!(
            BatteryStatus::from(starship_battery::State::Charging),
            BatteryStatus::Charging
        );
        assert_eq!(
            BatteryStatus::from(starship_battery::State::Empty),
            BatteryStatus::Discharging
        );
        assert_eq!(
            BatteryStatus::from(starship_battery::State::Full),
            BatteryStatus::Idle
        );
    }
}
