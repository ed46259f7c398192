//! Tick scheduling handles.
//!
//! The simulation owns exactly one scheduler and starts or cancels it as runs
//! begin, pause and end. Whoever drives the simulation waits on the scheduler
//! and calls `GameSimulation::tick` when it fires.

use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};

pub trait TickScheduler {
    /// Start ticking every `period`, replacing any active schedule.
    /// The first tick is due immediately.
    fn schedule(&mut self, period: Duration);

    /// Stop ticking. No-op when nothing is scheduled.
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;
}

/// Tokio-backed ticker used by the interactive front end.
///
/// Must be scheduled from inside a tokio runtime.
#[derive(Debug, Default)]
pub struct IntervalTicker {
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// Resolve on the next scheduled tick. Never resolves while cancelled.
    ///
    /// Cancel safe, so it can sit in a `tokio::select!` branch.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }
}

impl TickScheduler for IntervalTicker {
    fn schedule(&mut self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(ticker);
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }
}

/// Scheduler that only records what it was asked to do.
///
/// For tests and headless drivers that call `tick()` themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    period: Option<Duration>,
    pub scheduled_count: u32,
    pub cancelled_count: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, period: Duration) {
        self.period = Some(period);
        self.scheduled_count += 1;
    }

    fn cancel(&mut self) {
        if self.period.take().is_some() {
            self.cancelled_count += 1;
        }
    }

    fn is_scheduled(&self) -> bool {
        self.period.is_some()
    }
}
