//! Cooperative timers.
//!
//! Everything runs on one logical thread. Timers never hold callbacks; a
//! timer carries a [`Job`] tag, and the controller asks the queue which jobs
//! are due and runs them one at a time, in due-time order. Time is a
//! virtual clock (a [`Duration`] since startup) supplied by the caller, so
//! the same code serves an interactive driver and deterministic tests.
//!
//! [`Debounce`] and [`Throttle`] are built on the same queue.

use std::collections::BTreeMap;
use std::time::Duration;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Step the carousel forward.
    AutoAdvance,
    /// A resize burst has been quiet for the debounce period.
    ResizeSettled,
    /// The scroll throttle window has closed.
    ScrollReopen,
    /// The first scroll-reveal pass after startup.
    InitialReveal,
}

/// Handle to a live timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    job: Job,
    due: Duration,
    /// `Some` for repeating timers.
    period: Option<Duration>,
}

/// Pending timers, ordered by due time then creation order.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, job: Job, due: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Timer { job, due, period });
        id
    }

    /// Fire `job` once, `delay` after `now`.
    pub fn set_timeout(&mut self, job: Job, delay: Duration, now: Duration) -> TimerId {
        self.insert(job, now + delay, None)
    }

    /// Fire `job` every `period`, first at `now + period`.
    ///
    /// A zero period would fire forever without time passing; it is raised
    /// to one millisecond.
    pub fn set_interval(&mut self, job: Job, period: Duration, now: Duration) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(job, now + period, Some(period))
    }

    /// Cancel a timer. Returns whether it was still live.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_live(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of live timers running `job`.
    pub fn count(&self, job: Job) -> usize {
        self.timers.values().filter(|t| t.job == job).count()
    }

    /// Earliest due time among live timers.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Take the earliest timer due at or before `now`.
    ///
    /// Repeating timers are rescheduled one period later; one-shot timers are
    /// removed. Returns the timer, its job, and the instant it was due.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerId, Job, Duration)> {
        let (&id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(id, t)| (t.due, **id))?;
        let timer = self.timers.get_mut(&id)?;
        let fired = (id, timer.job, timer.due);
        match timer.period {
            Some(period) => timer.due += period,
            None => {
                self.timers.remove(&id);
            }
        }
        Some(fired)
    }
}

/// Runs a handler only after calls stop arriving for `wait`.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: Duration,
    job: Job,
    pending: Option<TimerId>,
}

impl Debounce {
    pub fn new(job: Job, wait: Duration) -> Self {
        Self {
            wait,
            job,
            pending: None,
        }
    }

    /// Register a call; any earlier pending call is dropped.
    pub fn call(&mut self, timers: &mut Timers, now: Duration) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
        self.pending = Some(timers.set_timeout(self.job, self.wait, now));
    }

    /// Acknowledge that the pending timer fired.
    pub fn fired(&mut self, id: TimerId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Lets a handler run at most once per `limit`.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    job: Job,
    closed: bool,
}

impl Throttle {
    pub fn new(job: Job, limit: Duration) -> Self {
        Self {
            limit,
            job,
            closed: false,
        }
    }

    /// Returns whether the handler should run for this call.
    pub fn try_call(&mut self, timers: &mut Timers, now: Duration) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        timers.set_timeout(self.job, self.limit, now);
        true
    }

    /// The throttle window elapsed.
    pub fn reopen(&mut self) {
        self.closed = false;
    }
}
