//! Manually-advanced scheduler reproducing temporal ordering deterministically.

use alloc::collections::BinaryHeap;
use core::{cmp::Reverse, time::Duration};

use spin::Mutex as SpinMutex;

use super::{ScheduledEntry, VirtualInstant};
use crate::{
  action::ActionRef,
  cancellation::CancellationToken,
  scheduler::{DateScheduler, RepeatPolicy, Scheduler},
};

/// Deterministic scheduler driven by explicit clock advancement.
///
/// The clock starts at virtual zero and only moves through
/// [`advance_by`](Self::advance_by) and [`run`](Self::run); submissions
/// enter a schedule totally ordered by `(due, sequence)` and execute
/// synchronously on the advancing thread. `schedule` is modeled as
/// "scheduled for now": the action runs on the next advancement, never at
/// submission time.
///
/// All state sits behind one lock so submissions may race an advancement
/// from other threads, though ordinary use is single-threaded. The lock is
/// released around each action invocation, so actions may schedule or
/// cancel reentrantly.
pub struct VirtualTimeScheduler {
  state: SpinMutex<ScheduleState>,
}

struct ScheduleState {
  now:      VirtualInstant,
  sequence: u64,
  queue:    BinaryHeap<Reverse<ScheduledEntry>>,
}

impl VirtualTimeScheduler {
  /// Creates a scheduler with an empty schedule at virtual zero.
  #[must_use]
  pub fn new() -> Self {
    Self { state: SpinMutex::new(ScheduleState { now: VirtualInstant::ZERO, sequence: 0, queue: BinaryHeap::new() }) }
  }

  /// Current virtual clock reading.
  #[must_use]
  pub fn now(&self) -> VirtualInstant {
    self.state.lock().now
  }

  /// Advances the clock by `d`, executing every entry due on the way.
  ///
  /// Entries run in `(due, sequence)` order with the clock set to each
  /// entry's due time as it is processed; repeating entries are re-inserted
  /// at `due + interval` (clamped to the current clock) unless their token
  /// has been cancelled, including cancellation from inside the action
  /// itself. The clock lands exactly on `now + d` afterwards.
  pub fn advance_by(&self, d: Duration) {
    let target = self.state.lock().now.saturating_add(d);
    self.drain(Some(target));
    let mut state = self.state.lock();
    if state.now < target {
      state.now = target;
    }
  }

  /// Executes the entire schedule, advancing the clock to each entry's due
  /// time.
  ///
  /// Intended for finite, non-repeating scenarios: an uncancelled
  /// repeating entry makes this call non-terminating, which is the
  /// caller's contract to uphold.
  pub fn run(&self) {
    self.drain(None);
  }

  #[cfg(test)]
  pub(crate) fn pending_count_for_test(&self) -> usize {
    self.state.lock().queue.len()
  }

  fn drain(&self, target: Option<VirtualInstant>) {
    loop {
      let entry = {
        let mut state = self.state.lock();
        let due = match state.queue.peek() {
          | Some(Reverse(entry)) => entry.due,
          | None => break,
        };
        if let Some(target) = target {
          if due > target {
            break;
          }
        }
        let Some(Reverse(entry)) = state.queue.pop() else { break };
        if state.now < entry.due {
          state.now = entry.due;
        }
        entry
      };
      if entry.token.is_cancelled() {
        continue;
      }
      // popped before running, so a panicking action cannot disturb the
      // ordering of later entries
      entry.action.run();
      if let Some(policy) = entry.repeat {
        if policy.repeats() && !entry.token.is_cancelled() {
          self.insert(Some(entry.due + policy.interval()), Some(policy), entry.action, entry.token);
        }
      }
    }
  }

  fn insert(&self, due: Option<VirtualInstant>, repeat: Option<RepeatPolicy>, action: ActionRef, token: CancellationToken) {
    let mut state = self.state.lock();
    let due = match due {
      | Some(due) if due > state.now => due,
      | _ => state.now,
    };
    let sequence = state.sequence;
    state.sequence = state.sequence.wrapping_add(1);
    state.queue.push(Reverse(ScheduledEntry { due, sequence, action, repeat, token }));
  }
}

impl Default for VirtualTimeScheduler {
  fn default() -> Self {
    Self::new()
  }
}

impl Scheduler for VirtualTimeScheduler {
  fn schedule(&self, action: ActionRef) -> CancellationToken {
    let token = CancellationToken::new();
    self.insert(None, None, action, token.clone());
    token
  }

  fn executes_here(&self) -> bool {
    // cooperative: actions run on whichever thread drives the clock
    true
  }
}

impl DateScheduler for VirtualTimeScheduler {
  type Instant = VirtualInstant;

  fn now(&self) -> VirtualInstant {
    Self::now(self)
  }

  fn schedule_after(&self, at: VirtualInstant, action: ActionRef) -> Option<CancellationToken> {
    let token = CancellationToken::new();
    self.insert(Some(at), None, action, token.clone());
    Some(token)
  }

  fn schedule_repeating(
    &self,
    at: VirtualInstant,
    policy: RepeatPolicy,
    action: ActionRef,
  ) -> Option<CancellationToken> {
    let token = CancellationToken::new();
    self.insert(Some(at), Some(policy), action, token.clone());
    Some(token)
  }
}
