//! Heartbeat timer owned by a live session.
//!
//! One ticker exists per non-terminal session. Dropping it aborts the
//! underlying task, so every exit path (finish, quit mid-quiz, unwind)
//! stops the timer instead of leaking a recurring callback.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A periodic tick producer backed by a spawned task.
pub struct Ticker {
    handle: JoinHandle<()>,
    rx: mpsc::UnboundedReceiver<()>,
}

impl Ticker {
    /// Start ticking every `period`. The first tick arrives one full
    /// period after start, not immediately.
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; skip it.
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        Self { handle, rx }
    }

    /// Take every tick that has accumulated since the last call.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
