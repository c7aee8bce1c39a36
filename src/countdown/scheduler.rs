//! Recurring tick scheduling

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Interval between two countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one recurring schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Clock service used by the countdown.
///
/// `schedule` arranges for a tick roughly every `period` until the returned
/// handle is passed to `cancel`.
pub trait Scheduler: Send {
    fn schedule(&mut self, period: Duration) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler backed by tokio interval tasks.
///
/// Each schedule is a spawned task that posts its handle into the tick
/// channel once per period. Cancelling aborts the task.
#[derive(Debug)]
pub struct TokioScheduler {
    tick_tx: mpsc::UnboundedSender<TickHandle>,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiving end of its tick channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickHandle>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tick_tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, tick_rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;

        let tick_tx = self.tick_tx.clone();
        let task = tokio::spawn(async move {
            // First tick one full period after scheduling
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tick_tx.send(handle).is_err() {
                    break;
                }
            }
        });

        debug!("Scheduled {:?} every {:?}", handle, period);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Cancelled {:?}", handle);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Scheduler that never fires on its own.
///
/// Hosts that advance time themselves (and tests) use it to track which
/// schedules are live.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Debug, Default)]
struct ManualInner {
    live: Vec<TickHandle>,
    next_id: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles that have been scheduled and not cancelled
    pub fn live_handles(&self) -> Vec<TickHandle> {
        self.inner
            .lock()
            .map(|inner| inner.live.clone())
            .unwrap_or_default()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, _period: Duration) -> TickHandle {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        let handle = TickHandle(inner.next_id);
        inner.next_id += 1;
        inner.live.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.live.retain(|h| *h != handle);
        }
    }
}
