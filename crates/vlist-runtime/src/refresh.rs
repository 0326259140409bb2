#![forbid(unsafe_code)]

//! Periodic background refresh.
//!
//! Live lists (traffic logs, alert feeds) poll their backend on a fixed
//! interval. A [`RefreshTask`] runs that timer on its own thread and sends a
//! message every tick over an `mpsc` channel. The host drains the channel on
//! its own thread and decides what to do; the task never touches list state.
//!
//! The task stops when [`RefreshTask::cancel`] is called, when it is dropped,
//! or when the receiving side goes away.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Signal checked by the refresh thread between ticks.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl StopSignal {
    /// Create a new (signal, trigger) pair.
    #[must_use]
    pub fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Whether the trigger has fired.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until stopped or until `duration` elapses.
    ///
    /// Returns `true` if stopped, `false` on timeout. Spurious wakeups are
    /// absorbed by re-waiting for the remaining time.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Owner side of a [`StopSignal`].
#[derive(Debug)]
pub struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    /// Fire the signal and wake any waiter.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

/// A running periodic refresh.
#[derive(Debug)]
pub struct RefreshTask<M> {
    interval: Duration,
    trigger: StopTrigger,
    receiver: mpsc::Receiver<M>,
    thread: Option<thread::JoinHandle<u64>>,
}

impl<M: Send + 'static> RefreshTask<M> {
    /// Start a task that sends `make_msg()` after every `interval`.
    pub fn spawn(interval: Duration, make_msg: impl Fn() -> M + Send + 'static) -> Self {
        Self::start(interval, false, make_msg)
    }

    /// Like [`spawn`](Self::spawn), but also sends one message right away.
    ///
    /// Matches the usual "load on open, then poll" pattern.
    pub fn spawn_immediate(interval: Duration, make_msg: impl Fn() -> M + Send + 'static) -> Self {
        Self::start(interval, true, make_msg)
    }

    fn start(interval: Duration, immediate: bool, make_msg: impl Fn() -> M + Send + 'static) -> Self {
        let (sender, receiver) = mpsc::channel();
        let (stop, trigger) = StopSignal::new();

        tracing::info!(interval_ms = interval.as_millis() as u64, immediate, "refresh task started");
        let thread = thread::spawn(move || run(interval, immediate, &make_msg, &sender, &stop));

        Self {
            interval,
            trigger,
            receiver,
            thread: Some(thread),
        }
    }
}

impl<M> RefreshTask<M> {
    /// Tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Next pending message, without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<M> {
        self.receiver.try_recv().ok()
    }

    /// All pending messages, without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }

    /// Whether the background thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(thread::JoinHandle::is_finished)
    }

    /// Stop the task and wait for its thread.
    ///
    /// Returns the number of ticks sent, or 0 if the message factory
    /// panicked. Messages still in the channel are
    /// returned by [`drain`](Self::drain) until the task is dropped.
    pub fn cancel(&mut self) -> u64 {
        self.trigger.stop();
        let ticks = match self.thread.take() {
            Some(handle) => match handle.join() {
                Ok(ticks) => ticks,
                Err(_) => {
                    tracing::warn!("refresh task panicked");
                    0
                }
            },
            None => return 0,
        };
        tracing::info!(ticks, "refresh task cancelled");
        ticks
    }
}

impl<M> Drop for RefreshTask<M> {
    fn drop(&mut self) {
        self.trigger.stop();
        // Not joined: the thread wakes on the signal and exits by itself.
    }
}

fn run<M>(
    interval: Duration,
    immediate: bool,
    make_msg: &dyn Fn() -> M,
    sender: &mpsc::Sender<M>,
    stop: &StopSignal,
) -> u64 {
    let mut ticks: u64 = 0;
    if immediate {
        if sender.send(make_msg()).is_err() {
            return ticks;
        }
        ticks += 1;
    }
    loop {
        if stop.wait_timeout(interval) {
            tracing::debug!(ticks, "refresh task stopped");
            break;
        }
        if sender.send(make_msg()).is_err() {
            tracing::debug!(ticks, "refresh channel closed");
            break;
        }
        ticks += 1;
        tracing::trace!(ticks, "refresh tick");
    }
    ticks
}
