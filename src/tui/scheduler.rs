//! Simulated reply timers.
//!
//! Each scheduled reply is a tokio task that sleeps for the reply delay and
//! then sends `Action::ReplyArrived` to the event loop. The scheduler keeps
//! an abort handle for every task it started, so quitting (or dropping the
//! scheduler) cancels replies that haven't landed yet.

use log::{debug, info, warn};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::core::action::Action;

pub struct ReplyScheduler {
    delay: Duration,
    tx: UnboundedSender<Action>,
    in_flight: Vec<AbortHandle>,
}

impl ReplyScheduler {
    pub fn new(delay: Duration, tx: UnboundedSender<Action>) -> Self {
        Self {
            delay,
            tx,
            in_flight: Vec::new(),
        }
    }

    /// Start one reply timer. Must be called from within a tokio runtime.
    pub fn schedule(&mut self) {
        self.in_flight.retain(|handle| !handle.is_finished());

        let delay = self.delay;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Action::ReplyArrived).is_err() {
                warn!("Reply timer fired after the event loop went away");
            }
        });
        self.in_flight.push(handle.abort_handle());
        info!(
            "Reply scheduled in {}ms ({} in flight)",
            delay.as_millis(),
            self.in_flight.len()
        );
    }

    /// Number of timers that have not fired yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every pending reply.
    pub fn cancel_all(&mut self) {
        if !self.in_flight.is_empty() {
            debug!("Cancelling {} reply timer(s)", self.in_flight.len());
        }
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_no_earlier_than_delay() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(2000), tx);

        let start = Instant::now();
        scheduler.schedule();
        let action = rx.recv().await;

        assert_eq!(action, Some(Action::ReplyArrived));
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_arrives_before_delay() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(2000), tx);
        scheduler.schedule();

        let early = tokio::time::timeout(Duration::from_millis(1999), rx.recv()).await;
        assert!(early.is_err(), "reply must not land before the delay");
        assert_eq!(rx.recv().await, Some(Action::ReplyArrived));
    }

    #[tokio::test(start_paused = true)]
    async fn each_schedule_produces_exactly_one_reply() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(100), tx);
        scheduler.schedule();
        scheduler.schedule();

        assert_eq!(rx.recv().await, Some(Action::ReplyArrived));
        assert_eq!(rx.recv().await, Some(Action::ReplyArrived));
        let extra = tokio::time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_stops_pending_replies() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = ReplyScheduler::new(Duration::from_millis(2000), tx);
        scheduler.schedule();
        assert_eq!(scheduler.in_flight(), 1);

        scheduler.cancel_all();

        let result = tokio::time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(result.is_err(), "cancelled reply must never arrive");
        assert_eq!(scheduler.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_scheduler_cancels_replies() {
        let (tx, mut rx) = unbounded_channel();
        let scheduler_tx = tx.clone();
        {
            let mut scheduler = ReplyScheduler::new(Duration::from_millis(2000), scheduler_tx);
            scheduler.schedule();
        }

        let result = tokio::time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(result.is_err());
        drop(tx);
    }
}
