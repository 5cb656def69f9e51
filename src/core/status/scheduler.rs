//! Fixed-period compose/publish loop with drift correction.
//!
//! The sleep between cycles can be cut short by a layout notification. The
//! line is then refreshed immediately and the loop goes back to sleep for
//! what was left of the interrupted interval minus the time the extra cycle
//! took, so publishes keep their nominal cadence on average.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::compositor::Compositor;
use super::sink::PublishSink;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Sleeping,
    Sampling,
    Publishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    Completed,
    /// Woken early with `remaining` of the requested duration left
    Interrupted { remaining: Duration },
}

/// Interruptible suspension point of the loop
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration) -> SleepOutcome;
}

/// Duration of the next sleep given how the previous one ended and what the
/// cycle after it cost.
pub fn next_sleep(
    nominal: Duration,
    outcome: SleepOutcome,
    cost: Duration,
    drift_correction: bool,
) -> Duration {
    match outcome {
        SleepOutcome::Interrupted { remaining } if drift_correction => {
            remaining.saturating_sub(cost)
        }
        _ => nominal,
    }
}

pub struct Scheduler<S: Sleeper> {
    nominal: Duration,
    next: Duration,
    drift_correction: bool,
    state: SchedulerState,
    sleeper: S,
}

impl<S: Sleeper> Scheduler<S> {
    pub fn new(period: Duration, drift_correction: bool, sleeper: S) -> Self {
        Self {
            nominal: period,
            next: period,
            drift_correction,
            state: SchedulerState::Sleeping,
            sleeper,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.nominal
    }

    /// Sleep requested at the end of the last cycle
    pub fn next_sleep(&self) -> Duration {
        self.next
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Compose and publish once, returning the time spent.
    pub fn cycle<P: PublishSink>(&mut self, compositor: &mut Compositor, sink: &mut P) -> Duration {
        let start = Instant::now();

        self.state = SchedulerState::Sampling;
        let line = compositor.compose();

        self.state = SchedulerState::Publishing;
        if let Err(e) = sink.publish(line) {
            log::warn!("Failed to publish status line: {}", e);
        }

        start.elapsed()
    }

    /// Cycle after a sleep that ended with `outcome`, then compute the next
    /// sleep duration.
    pub fn step<P: PublishSink>(
        &mut self,
        compositor: &mut Compositor,
        sink: &mut P,
        outcome: SleepOutcome,
    ) -> Duration {
        let cost = self.cycle(compositor, sink);
        self.next = next_sleep(self.nominal, outcome, cost, self.drift_correction);
        self.state = SchedulerState::Sleeping;

        log::trace!("cycle took {:?} after {:?}, sleeping {:?}", cost, outcome, self.next);

        self.next
    }

    /// Run until `shutdown` is set.
    pub fn run<P: PublishSink>(
        &mut self,
        compositor: &mut Compositor,
        sink: &mut P,
        shutdown: &AtomicBool,
    ) {
        let mut outcome = SleepOutcome::Completed;

        while !shutdown.load(Ordering::Relaxed) {
            let duration = self.step(compositor, sink, outcome);
            outcome = self.sleeper.sleep(duration);
        }

        log::info!("Scheduler stopped");
    }
}
