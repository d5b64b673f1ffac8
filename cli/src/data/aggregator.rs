//! Derives display state from battery reports and signals what changed.

use std::fmt;

use juice_platform::{BatteryReport, BatteryStatus};
use serde::Serialize;
use tracing::{debug, trace};

use super::indicator::{
    battery_indicator, efficiency_indicator, efficiency_message, efficiency_tier, format_status,
    GlyphSet, HealthTier, Indicator,
};

/// An observable property of [`DerivedBatteryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Status,
    DesignCapacity,
    FullChargeCapacity,
    RemainingCapacity,
    ChargeRate,
    FormattedStatus,
    PercentRemaining,
    EffectivePercentRemaining,
    Efficiency,
    HealthTier,
    EfficiencyStatus,
    EfficiencyIndicator,
    BatteryIndicator,
}

impl Property {
    pub const ALL: [Property; 13] = [
        Property::Status,
        Property::DesignCapacity,
        Property::FullChargeCapacity,
        Property::RemainingCapacity,
        Property::ChargeRate,
        Property::FormattedStatus,
        Property::PercentRemaining,
        Property::EffectivePercentRemaining,
        Property::Efficiency,
        Property::HealthTier,
        Property::EfficiencyStatus,
        Property::EfficiencyIndicator,
        Property::BatteryIndicator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Property::Status => "Status",
            Property::DesignCapacity => "DesignCapacity",
            Property::FullChargeCapacity => "FullChargeCapacity",
            Property::RemainingCapacity => "RemainingCapacity",
            Property::ChargeRate => "ChargeRate",
            Property::FormattedStatus => "FormattedStatus",
            Property::PercentRemaining => "PercentRemaining",
            Property::EffectivePercentRemaining => "EffectivePercentRemaining",
            Property::Efficiency => "Efficiency",
            Property::HealthTier => "HealthTier",
            Property::EfficiencyStatus => "EfficiencyStatus",
            Property::EfficiencyIndicator => "EfficiencyIndicator",
            Property::BatteryIndicator => "BatteryIndicator",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The properties that changed during one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(Vec<Property>);

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, property: Property) -> bool {
        self.0.contains(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.iter().copied()
    }
}

/// Everything the UI shows about the aggregate battery.
///
/// Ratios are fractions (1.0 = 100%) and are `None` whenever an operand
/// is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedBatteryState {
    pub status: BatteryStatus,
    pub design_capacity_mwh: Option<u32>,
    pub full_charge_capacity_mwh: Option<u32>,
    pub remaining_capacity_mwh: Option<u32>,
    pub charge_rate_mw: Option<i32>,
    pub formatted_status: &'static str,
    pub percent_remaining: Option<f64>,
    pub effective_percent_remaining: Option<f64>,
    pub efficiency: Option<f64>,
    pub health_tier: Option<HealthTier>,
    pub efficiency_status: String,
    pub efficiency_indicator: Indicator,
    pub battery_indicator: Indicator,
}

impl DerivedBatteryState {
    pub fn derive(report: &BatteryReport, glyphs: GlyphSet) -> Self {
        let status = report.status;

        let (percent_remaining, effective_percent_remaining) = if status == BatteryStatus::Idle {
            (Some(1.0), Some(1.0))
        } else {
            (
                ratio(report.remaining_capacity_mwh, report.design_capacity_mwh),
                ratio(
                    report.remaining_capacity_mwh,
                    report.full_charge_capacity_mwh,
                ),
            )
        };

        let efficiency = ratio(report.full_charge_capacity_mwh, report.design_capacity_mwh);
        let health_tier = efficiency_tier(efficiency);

        Self {
            status,
            design_capacity_mwh: report.design_capacity_mwh,
            full_charge_capacity_mwh: report.full_charge_capacity_mwh,
            remaining_capacity_mwh: report.remaining_capacity_mwh,
            charge_rate_mw: report.charge_rate_mw,
            formatted_status: format_status(status),
            percent_remaining,
            effective_percent_remaining,
            efficiency,
            health_tier,
            efficiency_status: efficiency_message(efficiency),
            efficiency_indicator: efficiency_indicator(glyphs, health_tier),
            battery_indicator: battery_indicator(glyphs, status, effective_percent_remaining),
        }
    }

    /// The effective percentage as `"(85%)"`, when known.
    pub fn formatted_percent(&self) -> Option<String> {
        self.effective_percent_remaining
            .map(|p| format!("({:.0}%)", p * 100.0))
    }

    /// Human-readable value of one property.
    pub fn display_value(&self, property: Property) -> String {
        fn or_unknown<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
            value.map_or_else(|| "unknown".to_string(), f)
        }
        let percent = |p: f64| format!("{:.1}%", p * 100.0);

        match property {
            Property::Status => self.status.to_string(),
            Property::DesignCapacity => {
                or_unknown(self.design_capacity_mwh, |v| format!("{} mWh", v))
            }
            Property::FullChargeCapacity => {
                or_unknown(self.full_charge_capacity_mwh, |v| format!("{} mWh", v))
            }
            Property::RemainingCapacity => {
                or_unknown(self.remaining_capacity_mwh, |v| format!("{} mWh", v))
            }
            Property::ChargeRate => or_unknown(self.charge_rate_mw, |v| format!("{} mW", v)),
            Property::FormattedStatus => self.formatted_status.to_string(),
            Property::PercentRemaining => or_unknown(self.percent_remaining, percent),
            Property::EffectivePercentRemaining => {
                or_unknown(self.effective_percent_remaining, percent)
            }
            Property::Efficiency => or_unknown(self.efficiency, percent),
            Property::HealthTier => or_unknown(self.health_tier, |t| t.to_string()),
            Property::EfficiencyStatus => self.efficiency_status.clone(),
            Property::EfficiencyIndicator => format!(
                "{} {} {}",
                self.efficiency_indicator.glyph,
                self.efficiency_indicator.label,
                self.efficiency_indicator.color.to_hex()
            ),
            Property::BatteryIndicator => format!(
                "{} {} {}",
                self.battery_indicator.glyph,
                self.battery_indicator.label,
                self.battery_indicator.color.to_hex()
            ),
        }
    }

    /// Properties whose value differs between `self` and `other`.
    fn diff(&self, other: &Self) -> ChangeSet {
        let checks = [
            (Property::Status, self.status != other.status),
            (
                Property::DesignCapacity,
                self.design_capacity_mwh != other.design_capacity_mwh,
            ),
            (
                Property::FullChargeCapacity,
                self.full_charge_capacity_mwh != other.full_charge_capacity_mwh,
            ),
            (
                Property::RemainingCapacity,
                self.remaining_capacity_mwh != other.remaining_capacity_mwh,
            ),
            (
                Property::ChargeRate,
                self.charge_rate_mw != other.charge_rate_mw,
            ),
            (
                Property::FormattedStatus,
                self.formatted_status != other.formatted_status,
            ),
            (
                Property::PercentRemaining,
                self.percent_remaining != other.percent_remaining,
            ),
            (
                Property::EffectivePercentRemaining,
                self.effective_percent_remaining != other.effective_percent_remaining,
            ),
            (Property::Efficiency, self.efficiency != other.efficiency),
            (Property::HealthTier, self.health_tier != other.health_tier),
            (
                Property::EfficiencyStatus,
                self.efficiency_status != other.efficiency_status,
            ),
            (
                Property::EfficiencyIndicator,
                self.efficiency_indicator != other.efficiency_indicator,
            ),
            (
                Property::BatteryIndicator,
                self.battery_indicator != other.battery_indicator,
            ),
        ];

        ChangeSet(
            checks
                .into_iter()
                .filter_map(|(property, changed)| changed.then_some(property))
                .collect(),
        )
    }
}

/// `num / den`, or `None` if either is unknown or the denominator is zero.
fn ratio(num: Option<u32>, den: Option<u32>) -> Option<f64> {
    match (num, den) {
        (Some(num), Some(den)) if den > 0 => Some(num as f64 / den as f64),
        _ => None,
    }
}

type Observer = Box<dyn FnMut(Property, &DerivedBatteryState)>;

/// Turns battery reports into observable display state.
///
/// The aggregator is owned by a single thread; reports arriving from other
/// threads are handed over through [`super::ReportWatcher`].
pub struct BatteryStatusAggregator {
    glyphs: GlyphSet,
    last_report: Option<BatteryReport>,
    state: Option<DerivedBatteryState>,
    observers: Vec<Observer>,
}

impl BatteryStatusAggregator {
    pub fn new(glyphs: GlyphSet) -> Self {
        Self {
            glyphs,
            last_report: None,
            state: None,
            observers: Vec::new(),
        }
    }

    /// Current derived state, once a report has been ingested.
    pub fn state(&self) -> Option<&DerivedBatteryState> {
        self.state.as_ref()
    }

    pub fn last_report(&self) -> Option<&BatteryReport> {
        self.last_report.as_ref()
    }

    pub fn glyphs(&self) -> GlyphSet {
        self.glyphs
    }

    /// Register a callback invoked once per changed property.
    pub fn subscribe(&mut self, observer: impl FnMut(Property, &DerivedBatteryState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Recompute the derived state from a new report.
    ///
    /// Returns the properties whose value changed; the first report changes
    /// all of them.
    pub fn ingest_report(&mut self, report: BatteryReport) -> ChangeSet {
        trace!(?report, "Ingesting battery report");
        self.last_report = Some(report);
        let next = DerivedBatteryState::derive(&report, self.glyphs);
        self.publish(next)
    }

    /// Switch glyph sets, re-deriving the indicators.
    pub fn set_glyphs(&mut self, glyphs: GlyphSet) -> ChangeSet {
        self.glyphs = glyphs;
        match self.last_report {
            Some(report) => {
                let next = DerivedBatteryState::derive(&report, glyphs);
                self.publish(next)
            }
            None => ChangeSet::default(),
        }
    }

    fn publish(&mut self, next: DerivedBatteryState) -> ChangeSet {
        let changes = match &self.state {
            Some(current) => current.diff(&next),
            None => ChangeSet(Property::ALL.to_vec()),
        };

        if !changes.is_empty() {
            debug!(
                changed = changes.len(),
                status = %next.status,
                "Battery state changed"
            );
        }

        for property in changes.iter() {
            for observer in &mut self.observers {
                observer(property, &next);
            }
        }

        self.state = Some(next);
        changes
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    fn report(
        design: Option<u32>,
        full: Option<u32>,
        remaining: Option<u32>,
        status: BatteryStatus,
    ) -> BatteryReport {
        BatteryReport {
            design_capacity_mwh: design,
            full_charge_capacity_mwh: full,
            remaining_capacity_mwh: remaining,
            charge_rate_mw: Some(-9_000),
            status,
        }
    }

    #[test]
    fn test_derive_known_values() {
        let state = DerivedBatteryState::derive(
            &report(
                Some(50_000),
                Some(40_000),
                Some(20_000),
                BatteryStatus::Discharging,
            ),
            GlyphSet::Ascii,
        );

        assert_eq!(state.percent_remaining, Some(0.4));
        assert_eq!(state.effective_percent_remaining, Some(0.5));
        assert_eq!(state.efficiency, Some(0.8));
        assert_eq!(state.health_tier, Some(HealthTier::Good));
        assert_eq!(state.formatted_status, "Discharging");
        assert_eq!(state.battery_indicator.glyph, "[#####     ]");
        assert_eq!(state.formatted_percent().as_deref(), Some("(50%)"));
    }

    #[test]
    fn test_missing_design_capacity_is_unknown() {
        let state = DerivedBatteryState::derive(
            &report(None, Some(40_000), Some(20_000), BatteryStatus::Discharging),
            GlyphSet::Nerd,
        );

        assert_eq!(state.efficiency, None);
        assert_eq!(state.percent_remaining, None);
        assert_eq!(state.effective_percent_remaining, Some(0.5));
        assert_eq!(state.health_tier, None);
        assert!(state.efficiency_status.contains("unknown"));
        assert_eq!(state.efficiency_indicator.label, "Unknown");
    }

    #[test]
    fn test_missing_full_charge_capacity_is_unknown() {
        let state = DerivedBatteryState::derive(
            &report(Some(50_000), None, Some(20_000), BatteryStatus::Charging),
            GlyphSet::Nerd,
        );

        assert_eq!(state.efficiency, None);
        assert_eq!(state.effective_percent_remaining, None);
        assert_eq!(state.percent_remaining, Some(0.4));
        assert_eq!(state.formatted_percent(), None);
    }

    #[test]
    fn test_all_fields_missing() {
        let state = DerivedBatteryState::derive(&BatteryReport::not_present(), GlyphSet::Ascii);

        assert_eq!(state.percent_remaining, None);
        assert_eq!(state.effective_percent_remaining, None);
        assert_eq!(state.efficiency, None);
        assert_eq!(state.formatted_status, "Not Present");
        assert_eq!(state.battery_indicator.glyph, "[    --    ]");
    }

    #[test]
    fn test_zero_design_capacity_is_unknown() {
        let state = DerivedBatteryState::derive(
            &report(Some(0), Some(40_000), Some(20_000), BatteryStatus::Discharging),
            GlyphSet::Ascii,
        );
        assert_eq!(state.efficiency, None);
        assert_eq!(state.percent_remaining, None);
    }

    #[test]
    fn test_idle_forces_full_percentages() {
        for r in [
            report(Some(50_000), Some(40_000), Some(10_000), BatteryStatus::Idle),
            report(None, None, None, BatteryStatus::Idle),
        ] {
            let state = DerivedBatteryState::derive(&r, GlyphSet::Ascii);
            assert_eq!(state.percent_remaining, Some(1.0));
            assert_eq!(state.effective_percent_remaining, Some(1.0));
            assert_eq!(state.battery_indicator.glyph, "[====ac====]");
        }
    }

    #[test]
    fn test_first_ingest_changes_everything() {
        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Nerd);
        let changes = aggregator.ingest_report(report(
            Some(50_000),
            Some(40_000),
            Some(20_000),
            BatteryStatus::Discharging,
        ));
        assert_eq!(changes.len(), Property::ALL.len());
    }

    #[test]
    fn test_identical_report_changes_nothing() {
        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Nerd);
        let r = report(
            Some(50_000),
            Some(40_000),
            Some(20_000),
            BatteryStatus::Discharging,
        );
        aggregator.ingest_report(r);
        assert!(aggregator.ingest_report(r).is_empty());
    }

    #[test]
    fn test_remaining_change_only_touches_dependents() {
        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Ascii);
        aggregator.ingest_report(report(
            Some(50_000),
            Some(40_000),
            Some(20_000),
            BatteryStatus::Discharging,
        ));

        let changes = aggregator.ingest_report(report(
            Some(50_000),
            Some(40_000),
            Some(19_000),
            BatteryStatus::Discharging,
        ));

        let changed: Vec<Property> = changes.iter().collect();
        assert_eq!(
            changed,
            vec![
                Property::RemainingCapacity,
                Property::PercentRemaining,
                Property::EffectivePercentRemaining,
            ]
        );
    }

    #[test]
    fn test_bucket_crossing_changes_indicator() {
        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Ascii);
        aggregator.ingest_report(report(
            Some(50_000),
            Some(40_000),
            Some(20_000),
            BatteryStatus::Discharging,
        ));
        let changes = aggregator.ingest_report(report(
            Some(50_000),
            Some(40_000),
            Some(16_000),
            BatteryStatus::Discharging,
        ));
        assert!(changes.contains(Property::BatteryIndicator));
        assert!(!changes.contains(Property::Efficiency));
    }

    #[test]
    fn test_observers_see_each_changed_property() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Ascii);
        let sink = Rc::clone(&seen);
        aggregator.subscribe(move |property, _state| sink.borrow_mut().push(property));

        let mut r = report(
            Some(50_000),
            Some(40_000),
            Some(20_000),
            BatteryStatus::Discharging,
        );
        aggregator.ingest_report(r);
        seen.borrow_mut().clear();

        r.status = BatteryStatus::Charging;
        r.charge_rate_mw = Some(15_000);
        aggregator.ingest_report(r);

        assert_eq!(
            *seen.borrow(),
            vec![
                Property::Status,
                Property::ChargeRate,
                Property::FormattedStatus,
                Property::BatteryIndicator,
            ]
        );
    }

    #[test]
    fn test_display_value() {
        let state = DerivedBatteryState::derive(
            &report(None, Some(40_000), Some(10_000), BatteryStatus::Discharging),
            GlyphSet::Ascii,
        );

        assert_eq!(state.display_value(Property::DesignCapacity), "unknown");
        assert_eq!(state.display_value(Property::Efficiency), "unknown");
        assert_eq!(
            state.display_value(Property::EffectivePercentRemaining),
            "25.0%"
        );
        assert_eq!(state.display_value(Property::ChargeRate), "-9000 mW");
        assert_eq!(
            state.display_value(Property::BatteryIndicator),
            "[###       ] Discharging #ffa44a"
        );
    }

    #[test]
    fn test_set_glyphs_rederives_indicators() {
        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Nerd);
        assert!(aggregator.set_glyphs(GlyphSet::Ascii).is_empty());

        aggregator.ingest_report(report(
            Some(50_000),
            Some(40_000),
            Some(20_000),
            BatteryStatus::Discharging,
        ));
        let changes = aggregator.set_glyphs(GlyphSet::Nerd);
        let changed: Vec<Property> = changes.iter().collect();
        assert_eq!(
            changed,
            vec![Property::EfficiencyIndicator, Property::BatteryIndicator]
        );
    }
}
