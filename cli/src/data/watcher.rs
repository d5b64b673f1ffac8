//! Background polling of a battery report source.
//!
//! The watcher thread owns the [`BatteryReportSource`] and publishes every
//! report it reads into a single-slot `tokio::sync::watch` channel. Each
//! send replaces the previous value, so the thread that owns the aggregator
//! always picks up the newest report no matter how long it stalled.

use std::sync::mpsc::{self, RecvTimeoutError, SyncSender};
use std::thread::JoinHandle;
use std::time::Duration;

use color_eyre::eyre::Result;
use juice_platform::{BatteryReport, BatteryReportSource};
use tokio::sync::watch;
use tracing::{debug, warn};

pub struct ReportWatcher {
    reports: watch::Receiver<Option<BatteryReport>>,
    stop_tx: Option<SyncSender<()>>,
    handle: Option<JoinHandle<()>>,
    connected: bool,
}

impl ReportWatcher {
    /// Start polling on a new thread.
    ///
    /// The source is built on the watcher thread, so it does not need to be
    /// `Send`. If building it fails the watcher disconnects immediately.
    pub fn spawn<S, F>(make_source: F, interval: Duration) -> Self
    where
        S: BatteryReportSource,
        F: FnOnce() -> Result<S> + Send + 'static,
    {
        let (report_tx, reports) = watch::channel(None);
        let (stop_tx, stop_rx) = mpsc::sync_channel::<()>(1);

        let handle = std::thread::Builder::new()
            .name("juice-report-watcher".to_string())
            .spawn(move || {
                let mut source = match make_source() {
                    Ok(source) => source,
                    Err(e) => {
                        warn!(error = %e, "Failed to open battery report source");
                        return;
                    }
                };
                debug!(interval_ms = interval.as_millis() as u64, "Report watcher started");

                loop {
                    match source.current_report() {
                        Ok(report) => {
                            // Fails only once the receiver is gone
                            if report_tx.send(Some(report)).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!(error = %e, "Failed to read battery report"),
                    }

                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }

                debug!("Report watcher stopped");
            })
            .ok();

        if handle.is_none() {
            warn!("Failed to spawn report watcher thread");
        }

        Self {
            reports,
            stop_tx: Some(stop_tx),
            handle,
            connected: true,
        }
    }

    /// The newest report published since the previous call, if any.
    pub fn latest(&mut self) -> Option<BatteryReport> {
        if self.connected && self.reports.has_changed().is_err() {
            debug!("Report watcher disconnected");
            self.connected = false;
        }

        let report = self.reports.borrow_and_update();
        if report.has_changed() {
            *report
        } else {
            None
        }
    }

    /// False once the watcher thread has exited.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Drop for ReportWatcher {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
