//! Scheduler marshalling work onto a worker queue.

use std::{io, sync::Arc, time::Instant};

use takt_core_rs::{
  action::ActionRef,
  cancellation::CancellationToken,
  scheduler::{DateScheduler, RepeatPolicy, Scheduler},
};
use tracing::debug;

use super::{GlobalQueue, WorkerQueue};
use crate::timer::{TimerDispatch, TimerThread};

/// Scheduler executing actions on a caller-provided worker queue.
///
/// Ordering among submissions is guaranteed only when the backing queue is
/// serial. On a concurrent queue each action still runs exactly once, and
/// overlapping repeat firings are possible when an action outlives its
/// interval; that is accepted, not prevented. Cancellation suppresses
/// not-yet-dispatched and future recurring firings, never an action that
/// has already been handed to the queue's workers and begun.
#[derive(Clone)]
pub struct WorkerQueueScheduler {
  inner: Arc<WorkerQueueInner>,
}

struct WorkerQueueInner {
  queue: Arc<dyn WorkerQueue>,
  timer: TimerThread,
}

impl WorkerQueueScheduler {
  /// Creates a scheduler over the provided queue.
  ///
  /// # Errors
  ///
  /// Returns the underlying error when the timer thread cannot be spawned.
  pub fn new(queue: Arc<dyn WorkerQueue>) -> io::Result<Self> {
    let timer = TimerThread::spawn("worker-queue-timer")?;
    Ok(Self { inner: Arc::new(WorkerQueueInner { queue, timer }) })
  }

  /// Scheduler over the process-default concurrent queue.
  ///
  /// # Errors
  ///
  /// Returns the underlying error when the timer thread cannot be spawned.
  pub fn global() -> io::Result<Self> {
    Self::new(Arc::new(GlobalQueue::new()))
  }

  /// The backing queue.
  #[must_use]
  pub fn queue(&self) -> &Arc<dyn WorkerQueue> {
    &self.inner.queue
  }

  fn enqueue(queue: &Arc<dyn WorkerQueue>, token: &CancellationToken, action: &ActionRef) {
    let token = token.clone();
    let action = action.clone();
    queue.submit(Box::new(move || {
      if token.is_cancelled() {
        return;
      }
      action.run();
    }));
  }

  fn timer_dispatch(&self, token: &CancellationToken, action: &ActionRef) -> TimerDispatch {
    let queue = self.inner.queue.clone();
    let token = token.clone();
    let action = action.clone();
    Arc::new(move || {
      if queue.is_closed() {
        // settle the entry so a repeat is not re-armed against a dead queue
        token.cancel();
        debug!("dropping due action, worker queue closed");
        return;
      }
      Self::enqueue(&queue, &token, &action);
    })
  }
}

impl Scheduler for WorkerQueueScheduler {
  fn schedule(&self, action: ActionRef) -> CancellationToken {
    if self.inner.queue.is_closed() {
      debug!("dropping submission, worker queue closed");
      return CancellationToken::settled();
    }
    let token = CancellationToken::new();
    Self::enqueue(&self.inner.queue, &token, &action);
    token
  }

  fn executes_here(&self) -> bool {
    self.inner.queue.is_current()
  }
}

impl DateScheduler for WorkerQueueScheduler {
  type Instant = Instant;

  fn now(&self) -> Instant {
    Instant::now()
  }

  fn schedule_after(&self, at: Instant, action: ActionRef) -> Option<CancellationToken> {
    if self.inner.queue.is_closed() {
      return None;
    }
    let token = CancellationToken::new();
    let dispatch = self.timer_dispatch(&token, &action);
    match self.inner.timer.register(at, None, token.clone(), dispatch) {
      | Ok(()) => Some(token),
      | Err(_) => None,
    }
  }

  fn schedule_repeating(&self, at: Instant, policy: RepeatPolicy, action: ActionRef) -> Option<CancellationToken> {
    if self.inner.queue.is_closed() {
      return None;
    }
    let token = CancellationToken::new();
    let dispatch = self.timer_dispatch(&token, &action);
    match self.inner.timer.register(at, Some(policy), token.clone(), dispatch) {
      | Ok(()) => Some(token),
      | Err(_) => None,
    }
  }
}
