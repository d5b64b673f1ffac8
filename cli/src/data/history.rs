use std::collections::VecDeque;

use chrono::{DateTime, Local};

pub const DEFAULT_HISTORY_POINTS: usize = 120;

/// Smallest half-height of the chart, in watts.
const MIN_RANGE_WATTS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSample {
    pub timestamp: DateTime<Local>,
    /// Charge rate in milliwatts, negative while discharging.
    pub rate_mw: i32,
}

impl RateSample {
    pub fn watts(&self) -> f64 {
        self.rate_mw as f64 / 1000.0
    }
}

/// Bounded time series of charge-rate samples.
pub struct ChargeRateHistory {
    pub points: VecDeque<RateSample>,
    capacity: usize,
}

impl ChargeRateHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a sample. Unknown rates are not recorded.
    pub fn record(&mut self, rate_mw: Option<i32>) -> bool {
        let Some(rate_mw) = rate_mw else {
            return false;
        };

        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }

        self.points.push_back(RateSample {
            timestamp: Local::now(),
            rate_mw,
        });
        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&RateSample> {
        self.points.back()
    }

    /// Chart points as (index, watts).
    pub fn values(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.watts()))
            .collect()
    }

    /// Y bounds for the chart, always including zero.
    pub fn value_range(&self) -> (f64, f64) {
        let (min, max) = self
            .points
            .iter()
            .map(RateSample::watts)
            .fold((0.0_f64, 0.0_f64), |(lo, hi), w| (lo.min(w), hi.max(w)));

        let min = (min * 1.2).min(-MIN_RANGE_WATTS);
        let max = (max * 1.2).max(MIN_RANGE_WATTS);
        (min, max)
    }

    pub fn average_watts(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        let sum: f64 = self.points.iter().map(RateSample::watts).sum();
        Some(sum / self.points.len() as f64)
    }

    /// Seconds covered by the recorded samples.
    pub fn span_secs(&self) -> i64 {
        match (self.points.front(), self.points.back()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp).num_seconds(),
            _ => 0,
        }
    }
}

impl Default for ChargeRateHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_POINTS)
    }
}
