// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-threaded callback loop with timers and a thread-safe post.
//!
//! All widget mutation and drawing happen on the thread that owns the
//! [`EventLoop`]. Callbacks receive `&mut C`, the application context (for
//! example a struct holding the [`WidgetStore`](crate::WidgetStore) and the
//! screen). Other threads never touch that context; they send closures
//! through a [`LoopProxy`], which run on the loop thread during the next
//! [`EventLoop::run_once`].
//!
//! The loop does not read a clock. The caller passes `now` to `run_once`,
//! typically from a backend's monotonic clock, and may sleep until
//! [`EventLoop::next_deadline`].

use core::fmt;
use std::collections::VecDeque;
use std::sync::mpsc;

use vellum_core::time::{Duration, HostTime};

/// A callback posted on the loop thread.
pub type Task<C> = Box<dyn FnOnce(&mut C)>;

/// A callback posted from another thread.
pub type SendTask<C> = Box<dyn FnOnce(&mut C) + Send>;

/// Identifies a timer, for [`EventLoop::cancel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Timer<C> {
    id: TimerId,
    deadline: HostTime,
    period: Option<Duration>,
    callback: Box<dyn FnMut(&mut C)>,
}

enum Posted<C> {
    Local(Task<C>),
    Remote(SendTask<C>),
}

impl<C> Posted<C> {
    fn run(self, ctx: &mut C) {
        match self {
            Self::Local(task) => task(ctx),
            Self::Remote(task) => task(ctx),
        }
    }
}

/// Returned by [`LoopProxy::post`] when the loop has been dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopClosed;

impl fmt::Display for LoopClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("event loop has been dropped")
    }
}

impl core::error::Error for LoopClosed {}

/// A handle for posting callbacks to a loop from any thread.
pub struct LoopProxy<C> {
    sender: mpsc::Sender<SendTask<C>>,
}

impl<C> Clone for LoopProxy<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<C> fmt::Debug for LoopProxy<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopProxy").finish_non_exhaustive()
    }
}

impl<C> LoopProxy<C> {
    /// Queues `task` to run on the loop thread.
    ///
    /// # Errors
    ///
    /// Returns [`LoopClosed`] if the loop no longer exists.
    pub fn post(&self, task: impl FnOnce(&mut C) + Send + 'static) -> Result<(), LoopClosed> {
        self.sender.send(Box::new(task)).map_err(|_| LoopClosed)
    }
}

/// A single-threaded reactor: posted callbacks and timers.
pub struct EventLoop<C> {
    posted: VecDeque<Posted<C>>,
    timers: Vec<Timer<C>>,
    next_timer: u64,
    sender: mpsc::Sender<SendTask<C>>,
    receiver: mpsc::Receiver<SendTask<C>>,
}

impl<C> fmt::Debug for EventLoop<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("posted", &self.posted.len())
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl<C> Default for EventLoop<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventLoop<C> {
    /// An empty loop with no timers.
    ///
    /// Posted callbacks are never dropped: every accepted post runs exactly
    /// once, on a later [`run_once`](Self::run_once).
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            posted: VecDeque::new(),
            timers: Vec::new(),
            next_timer: 0,
            sender,
            receiver,
        }
    }

    /// A handle other threads can post through.
    #[must_use]
    pub fn proxy(&self) -> LoopProxy<C> {
        LoopProxy {
            sender: self.sender.clone(),
        }
    }

    /// Queues `task` to run during the next [`run_once`](Self::run_once).
    pub fn post(&mut self, task: impl FnOnce(&mut C) + 'static) {
        self.posted.push_back(Posted::Local(Box::new(task)));
    }

    /// Runs `callback` once at `deadline`.
    pub fn add_timer(
        &mut self,
        deadline: HostTime,
        callback: impl FnMut(&mut C) + 'static,
    ) -> TimerId {
        self.insert_timer(deadline, None, Box::new(callback))
    }

    /// Runs `callback` at `first`, then every `period`.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn add_periodic(
        &mut self,
        first: HostTime,
        period: Duration,
        callback: impl FnMut(&mut C) + 'static,
    ) -> TimerId {
        assert!(!period.is_zero(), "periodic timer needs a non-zero period");
        self.insert_timer(first, Some(period), Box::new(callback))
    }

    fn insert_timer(
        &mut self,
        deadline: HostTime,
        period: Option<Duration>,
        callback: Box<dyn FnMut(&mut C)>,
    ) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(Timer {
            id,
            deadline,
            period,
            callback,
        });
        id
    }

    /// Removes a timer. Returns `false` if it already fired or was removed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// The earliest timer deadline, if any timer is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Number of posted callbacks waiting to run (local and received).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.posted.len()
    }

    /// Runs one loop iteration at time `now` and returns the number of
    /// callbacks invoked.
    ///
    /// Order: callbacks posted from other threads are moved into the queue,
    /// timers due at `now` fire in deadline order, then the queued callbacks
    /// run in FIFO order. A periodic timer fires at most once per iteration;
    /// ticks missed by a late iteration are skipped.
    pub fn run_once(&mut self, now: HostTime, ctx: &mut C) -> usize {
        while let Ok(task) = self.receiver.try_recv() {
            self.posted.push_back(Posted::Remote(task));
        }

        let mut ran = 0;
        let mut due: Vec<usize> = (0..self.timers.len())
            .filter(|&i| self.timers[i].deadline <= now)
            .collect();
        due.sort_by_key(|&i| self.timers[i].deadline);
        for &i in &due {
            let timer = &mut self.timers[i];
            (timer.callback)(ctx);
            ran += 1;
            if let Some(period) = timer.period {
                let next = timer.deadline + period;
                timer.deadline = if next > now { next } else { now + period };
            }
        }
        self.timers
            .retain(|t| t.period.is_some() || t.deadline > now);

        for _ in 0..self.posted.len() {
            let Some(task) = self.posted.pop_front() else {
                break;
            };
            task.run(ctx);
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn ms(v: u64) -> HostTime {
        HostTime(Duration::from_millis(v).nanos())
    }

    #[test]
    fn posted_callbacks_run_in_order() {
        let mut ev = EventLoop::<Vec<u32>>::new();
        let mut log = Vec::new();
        ev.post(|l| l.push(1));
        ev.post(|l| l.push(2));
        assert_eq!(ev.pending(), 2);
        assert_eq!(ev.run_once(ms(0), &mut log), 2);
        assert_eq!(log, [1, 2]);
        assert_eq!(ev.run_once(ms(1), &mut log), 0);
    }

    #[test]
    fn one_shot_timer_fires_once() {
        let mut ev = EventLoop::<u32>::new();
        let mut hits = 0;
        ev.add_timer(ms(10), |h| *h += 1);
        assert_eq!(ev.next_deadline(), Some(ms(10)));
        ev.run_once(ms(5), &mut hits);
        assert_eq!(hits, 0, "timer must not fire early");
        ev.run_once(ms(10), &mut hits);
        ev.run_once(ms(20), &mut hits);
        assert_eq!(hits, 1);
        assert_eq!(ev.next_deadline(), None);
    }

    #[test]
    fn periodic_timer_skips_missed_ticks() {
        let mut ev = EventLoop::<Vec<u64>>::new();
        let mut fired = Vec::new();
        ev.add_periodic(ms(0), Duration::from_millis(16), |_| {});
        let id = ev.add_periodic(ms(0), Duration::from_millis(10), |_| {});
        assert!(ev.cancel(id));
        assert!(!ev.cancel(id));

        for t in [0, 16, 20, 100] {
            ev.run_once(ms(t), &mut fired);
            fired.push(ev.next_deadline().map_or(0, |d| d.nanos()));
        }
        assert_eq!(
            fired,
            [ms(16), ms(32), ms(32), ms(116)].map(HostTime::nanos),
            "late iterations reschedule from now"
        );
    }

    #[test]
    fn timers_fire_before_posts_in_deadline_order() {
        let mut ev = EventLoop::<Vec<&'static str>>::new();
        let mut log = Vec::new();
        ev.post(|l| l.push("post"));
        ev.add_timer(ms(5), |l| l.push("late"));
        ev.add_timer(ms(1), |l| l.push("early"));
        ev.run_once(ms(5), &mut log);
        assert_eq!(log, ["early", "late", "post"]);
    }

    #[test]
    fn posts_from_callbacks_wait_for_next_iteration() {
        let mut ev = EventLoop::<Vec<u32>>::new();
        let proxy = ev.proxy();
        let mut log = Vec::new();
        ev.post(move |l| {
            l.push(1);
            proxy.post(|l| l.push(2)).unwrap();
        });
        ev.run_once(ms(0), &mut log);
        assert_eq!(log, [1]);
        ev.run_once(ms(0), &mut log);
        assert_eq!(log, [1, 2]);
    }

    #[test]
    fn proxy_posts_from_worker_thread() {
        let mut ev = EventLoop::<Vec<u32>>::new();
        let proxy = ev.proxy();
        let worker = thread::spawn(move || {
            for i in 0..3 {
                proxy.post(move |l| l.push(i)).unwrap();
            }
        });
        worker.join().unwrap();

        let mut log = Vec::new();
        assert_eq!(ev.run_once(ms(0), &mut log), 3);
        assert_eq!(log, [0, 1, 2]);
    }

    #[test]
    fn proxy_reports_closed_loop() {
        let ev = EventLoop::<()>::new();
        let proxy = ev.proxy();
        drop(ev);
        assert_eq!(proxy.post(|()| {}), Err(LoopClosed));
    }

    #[test]
    fn every_post_runs_under_load() {
        let mut ev = EventLoop::<Vec<u32>>::new();
        let proxy = ev.proxy();
        let worker = thread::spawn(move || {
            for i in 0..1_000 {
                proxy.post(move |l| l.push(i)).unwrap();
            }
        });
        for i in 1_000..2_000 {
            ev.post(move |l| l.push(i));
        }
        worker.join().unwrap();

        let mut log = Vec::new();
        let mut ran = 0;
        for t in 0..3 {
            ran += ev.run_once(ms(t), &mut log);
        }
        assert_eq!(ran, 2_000, "a posted callback was lost");
        assert_eq!(ev.pending(), 0);
        log.sort_unstable();
        assert!(log.iter().copied().eq(0..2_000), "every post ran exactly once");
    }
}
