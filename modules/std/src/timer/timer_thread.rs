//! Dedicated thread firing registered entries at their due instants.

use std::{
  cmp::Reverse,
  collections::BinaryHeap,
  io,
  sync::Arc,
  thread::{self, JoinHandle},
  time::Instant,
};

use parking_lot::{Condvar, Mutex, MutexGuard};
use takt_core_rs::{cancellation::CancellationToken, scheduler::RepeatPolicy};
use tracing::trace;

use super::timer_entry::TimerEntry;
use crate::DispatchError;

/// Closure handing a due firing to the target execution context.
///
/// Must not block: it only enqueues, the action body runs on the target
/// context. Repeating entries invoke the same dispatch once per firing.
pub(crate) type TimerDispatch = Arc<dyn Fn() + Send + Sync + 'static>;

/// One timer thread per owning scheduler.
///
/// Entries are totally ordered by `(due, sequence)`; the thread sleeps
/// until the earliest due instant and fires everything due on wake, so
/// same-deadline entries batch into one wake in registration order. A
/// firing is never earlier than its due instant and never skipped; leeway
/// only bounds acceptable lateness. Repeating entries are re-armed at
/// `due + interval` until their token is cancelled.
pub(crate) struct TimerThread {
  shared: Arc<TimerShared>,
  thread: Mutex<Option<JoinHandle<()>>>,
}

struct TimerShared {
  state: Mutex<TimerState>,
  wake:  Condvar,
}

struct TimerState {
  queue:    BinaryHeap<Reverse<TimerEntry>>,
  sequence: u64,
  closed:   bool,
}

impl TimerThread {
  /// Spawns the timer thread under the given name.
  ///
  /// # Errors
  ///
  /// Returns the underlying error when the OS refuses to spawn the thread.
  pub(crate) fn spawn(name: &str) -> io::Result<Self> {
    let shared = Arc::new(TimerShared {
      state: Mutex::new(TimerState { queue: BinaryHeap::new(), sequence: 0, closed: false }),
      wake:  Condvar::new(),
    });
    let worker = shared.clone();
    let thread = thread::Builder::new().name(name.to_owned()).spawn(move || Self::run_loop(&worker))?;
    Ok(Self { shared, thread: Mutex::new(Some(thread)) })
  }

  /// Registers a firing at `due`, repeating per `policy` when present.
  pub(crate) fn register(
    &self,
    due: Instant,
    policy: Option<RepeatPolicy>,
    token: CancellationToken,
    dispatch: TimerDispatch,
  ) -> Result<(), DispatchError> {
    {
      let mut state = self.shared.state.lock();
      if state.closed {
        return Err(DispatchError::TimerStopped);
      }
      let sequence = state.sequence;
      state.sequence = state.sequence.wrapping_add(1);
      state.queue.push(Reverse(TimerEntry { due, sequence, policy, token, dispatch }));
    }
    self.shared.wake.notify_one();
    Ok(())
  }

  /// Stops the thread and discards pending entries. Idempotent.
  pub(crate) fn shutdown(&self) {
    {
      let mut state = self.shared.state.lock();
      if state.closed {
        return;
      }
      state.closed = true;
      state.queue.clear();
    }
    self.shared.wake.notify_one();
    if let Some(thread) = self.thread.lock().take() {
      let _ = thread.join();
    }
  }

  fn run_loop(shared: &TimerShared) {
    let mut state = shared.state.lock();
    loop {
      if state.closed {
        break;
      }
      let now = Instant::now();
      Self::fire_due(&mut state, now);
      match state.queue.peek().map(|Reverse(entry)| entry.due) {
        | Some(due) if due <= Instant::now() => {},
        | Some(due) => {
          let _ = shared.wake.wait_until(&mut state, due);
        },
        | None => shared.wake.wait(&mut state),
      }
    }
    trace!("timer thread stopped");
  }

  fn fire_due(state: &mut MutexGuard<'_, TimerState>, now: Instant) {
    while let Some(Reverse(entry)) = state.queue.peek() {
      if entry.due > now {
        break;
      }
      let Some(Reverse(entry)) = state.queue.pop() else {
        break;
      };
      if entry.token.is_cancelled() {
        continue;
      }
      let dispatch = entry.dispatch.clone();
      MutexGuard::unlocked(state, || dispatch());
      if let Some(policy) = entry.policy {
        // the dispatched job may have been the one cancelling the token;
        // checked again here so a cancelled repeat is not re-armed
        if policy.repeats() && !entry.token.is_cancelled() {
          let sequence = state.sequence;
          state.sequence = state.sequence.wrapping_add(1);
          state.queue.push(Reverse(TimerEntry {
            due: entry.due + policy.interval(),
            sequence,
            policy: entry.policy,
            token: entry.token,
            dispatch: entry.dispatch,
          }));
        }
      }
    }
  }
}

impl Drop for TimerThread {
  fn drop(&mut self) {
    self.shutdown();
  }
}
