//! Entries held in the virtual schedule.

use core::cmp::Ordering;

use super::VirtualInstant;
use crate::{action::ActionRef, cancellation::CancellationToken, scheduler::RepeatPolicy};

/// Pending unit of work keyed by `(due, sequence)`.
///
/// Equal due times are broken by insertion sequence so that same-instant
/// entries run in submission order.
pub(crate) struct ScheduledEntry {
  pub(crate) due:      VirtualInstant,
  pub(crate) sequence: u64,
  pub(crate) action:   ActionRef,
  pub(crate) repeat:   Option<RepeatPolicy>,
  pub(crate) token:    CancellationToken,
}

impl PartialEq for ScheduledEntry {
  fn eq(&self, other: &Self) -> bool {
    self.due == other.due && self.sequence == other.sequence
  }
}

impl Eq for ScheduledEntry {}

impl PartialOrd for ScheduledEntry {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for ScheduledEntry {
  fn cmp(&self, other: &Self) -> Ordering {
    self.due.cmp(&other.due).then_with(|| self.sequence.cmp(&other.sequence))
  }
}
