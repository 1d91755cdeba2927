//! Entries held by the timer thread.

use std::{cmp::Ordering, time::Instant};

use takt_core_rs::{cancellation::CancellationToken, scheduler::RepeatPolicy};

use super::TimerDispatch;

/// Pending wall-clock firing keyed by `(due, sequence)`.
///
/// The sequence breaks due-time ties so that same-deadline entries are
/// dispatched in registration order, matching the virtual scheduler's
/// total order.
pub(crate) struct TimerEntry {
  pub(crate) due:      Instant,
  pub(crate) sequence: u64,
  pub(crate) policy:   Option<RepeatPolicy>,
  pub(crate) token:    CancellationToken,
  pub(crate) dispatch: TimerDispatch,
}

impl PartialEq for TimerEntry {
  fn eq(&self, other: &Self) -> bool {
    self.due == other.due && self.sequence == other.sequence
  }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for TimerEntry {
  fn cmp(&self, other: &Self) -> Ordering {
    self.due.cmp(&other.due).then_with(|| self.sequence.cmp(&other.sequence))
  }
}
