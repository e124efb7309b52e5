//! Periodic redraw signal so the "new" badges expire without user input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Recurring tick source owned by a view.
///
/// Ticks coalesce: if the view has not consumed the previous tick, the next
/// one is dropped. The background task ends on [`RefreshTicker::stop`] or
/// when the ticker is dropped.
pub struct RefreshTicker {
    period: Duration,
    ticks: mpsc::Receiver<()>,
    task: Option<JoinHandle<()>>,
}

impl RefreshTicker {
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if tx.is_closed() {
                    break;
                }
                let _ = tx.try_send(());
            }
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "refresh ticker started");
        Self {
            period,
            ticks,
            task: Some(task),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True once per elapsed period since the last call.
    pub fn take_tick(&mut self) -> bool {
        self.ticks.try_recv().is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("refresh ticker stopped");
        }
        self.ticks.close();
    }
}

impl Drop for RefreshTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn no_tick_before_first_period() {
        let mut ticker = RefreshTicker::start(Duration::from_secs(60));

        assert!(!ticker.take_tick());
        assert!(ticker.is_running());
    }

    #[tokio::test]
    async fn ticks_after_period_elapses() {
        let mut ticker = RefreshTicker::start(PERIOD);

        tokio::time::sleep(PERIOD * 4).await;

        assert!(ticker.take_tick());
    }

    #[tokio::test]
    async fn missed_ticks_coalesce_into_one() {
        let mut ticker = RefreshTicker::start(PERIOD);

        tokio::time::sleep(PERIOD * 6).await;

        assert!(ticker.take_tick());
        assert!(!ticker.take_tick());
    }

    #[tokio::test]
    async fn stopped_ticker_never_ticks_again() {
        let mut ticker = RefreshTicker::start(PERIOD);

        ticker.stop();
        tokio::time::sleep(PERIOD * 4).await;

        assert!(!ticker.take_tick());
        assert!(!ticker.is_running());
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let mut ticker = RefreshTicker::start(PERIOD);

        ticker.stop();
        ticker.stop();

        assert!(!ticker.is_running());
    }
}
