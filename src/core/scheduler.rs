//! Tick scheduler.
//!
//! Explicit owner of the refresh cadence: one ticker task sending on a
//! bounded channel. `reschedule` cancels the pending cadence and
//! starts a new one effective at the next tick boundary, never
//! retroactively. A consumer that is still refreshing delays delivery
//! of the next tick rather than overlapping with it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

pub struct RefreshScheduler {
    tx: mpsc::Sender<()>,
    interval: Duration,
    ticker: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn start(interval: Duration, tx: mpsc::Sender<()>) -> Self {
        let ticker = Self::spawn_ticker(interval, tx.clone());
        Self {
            tx,
            interval,
            ticker,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replace the cadence going forward. The first tick of the new
    /// cadence fires one full interval from now.
    pub fn reschedule(&mut self, interval: Duration) {
        if interval == self.interval {
            return;
        }
        debug!(?interval, "rescheduling refresh cadence");
        self.ticker.abort();
        self.interval = interval;
        self.ticker = Self::spawn_ticker(interval, self.tx.clone());
    }

    fn spawn_ticker(interval: Duration, tx: mpsc::Sender<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let first = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(first, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        })
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
