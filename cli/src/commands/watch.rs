use std::future::Future;
use std::time::Duration;

use color_eyre::eyre::Result;
use juice_platform::{BatteryReportSource, SystemBatteries};
use tracing::{info, warn};

use crate::config::{MAX_REFRESH_MS, MIN_REFRESH_MS};
use crate::data::{BatteryStatusAggregator, GlyphSet};

/// Print each observable property as it changes until interrupted.
pub fn run(interval: u64, glyphs: GlyphSet) -> Result<()> {
    let interval = Duration::from_millis(interval.clamp(MIN_REFRESH_MS, MAX_REFRESH_MS));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut aggregator = BatteryStatusAggregator::new(glyphs);
    aggregator.subscribe(|property, state| {
        println!(
            "{} {}: {}",
            chrono::Local::now().format("%H:%M:%S"),
            property,
            state.display_value(property)
        );
    });

    let source = SystemBatteries::new()?;
    runtime.block_on(watch(source, interval, &mut aggregator, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
        }
    }))
}

/// Poll `source` every `interval`, feeding the aggregator until `shutdown`
/// completes.
async fn watch<S, F>(
    mut source: S,
    interval: Duration,
    aggregator: &mut BatteryStatusAggregator,
    shutdown: F,
) -> Result<()>
where
    S: BatteryReportSource,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    // interval() panics on a zero period
    let mut tick = tokio::time::interval(interval.max(Duration::from_millis(1)));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!(interval_ms = interval.as_millis() as u64, "Watching battery");

    loop {
        tokio::select! {
            _ = tick.tick() => {
                match source.current_report() {
                    Ok(report) => {
                        aggregator.ingest_report(report);
                    }
                    Err(e) => warn!(error = %e, "Failed to read battery report"),
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use juice_platform::{BatteryReport, BatteryStatus};
    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    use super::*;
    use crate::data::Property;

    /// Replays `script`, then repeats its last report and signals `done`.
    struct ScriptedSource {
        script: Vec<BatteryReport>,
        next: usize,
        done: Arc<Notify>,
    }

    impl BatteryReportSource for ScriptedSource {
        fn current_report(&mut self) -> Result<BatteryReport> {
            let index = self.next.min(self.script.len() - 1);
            self.next += 1;
            if self.next == self.script.len() {
                self.done.notify_one();
            }
            Ok(self.script[index])
        }
    }

    fn discharging(remaining: u32) -> BatteryReport {
        BatteryReport {
            design_capacity_mwh: Some(50_000),
            full_charge_capacity_mwh: Some(40_000),
            remaining_capacity_mwh: Some(remaining),
            charge_rate_mw: Some(-10_000),
            status: BatteryStatus::Discharging,
        }
    }

    #[tokio::test]
    async fn test_watch_publishes_only_changed_properties() {
        let done = Arc::new(Notify::new());
        let source = ScriptedSource {
            script: vec![discharging(20_000), discharging(20_000), discharging(30_000)],
            next: 0,
            done: Arc::clone(&done),
        };

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Ascii);
        let sink = Rc::clone(&seen);
        aggregator.subscribe(move |property, _| sink.borrow_mut().push(property));

        let shutdown = async move { done.notified().await };
        watch(source, Duration::from_millis(1), &mut aggregator, shutdown)
            .await
            .unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), Property::ALL.len() + 4);
        assert_eq!(&seen[..Property::ALL.len()], &Property::ALL[..]);
        assert_eq!(
            &seen[Property::ALL.len()..],
            &[
                Property::RemainingCapacity,
                Property::PercentRemaining,
                Property::EffectivePercentRemaining,
                Property::BatteryIndicator,
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_interval_does_not_panic() {
        let done = Arc::new(Notify::new());
        let source = ScriptedSource {
            script: vec![discharging(20_000)],
            next: 0,
            done: Arc::clone(&done),
        };

        let mut aggregator = BatteryStatusAggregator::new(GlyphSet::Ascii);
        let shutdown = async move { done.notified().await };
        watch(source, Duration::ZERO, &mut aggregator, shutdown)
            .await
            .unwrap();

        assert!(aggregator.state().is_some());
    }
}
