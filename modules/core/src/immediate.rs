//! Synchronous inline scheduler.


use crate::{
  action::ActionRef,
  cancellation::CancellationToken,
  scheduler::{DateScheduler, RepeatPolicy, Scheduler},
  virtual_time::VirtualInstant,
};

/// Scheduler executing every action synchronously on the caller's thread.
///
/// `schedule` has completed the action by the time it returns, so the
/// returned token is already settled and cancelling it has no effect. The
/// dated surface degrades to immediate synchronous execution without
/// sleeping; a repeating submission runs the action exactly once since no
/// timer exists to drive recurrence.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateScheduler;

impl ImmediateScheduler {
  /// Creates the scheduler.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Scheduler for ImmediateScheduler {
  fn schedule(&self, action: ActionRef) -> CancellationToken {
    action.run();
    CancellationToken::settled()
  }

  fn executes_here(&self) -> bool {
    true
  }
}

impl DateScheduler for ImmediateScheduler {
  type Instant = VirtualInstant;

  fn now(&self) -> VirtualInstant {
    VirtualInstant::ZERO
  }

  fn schedule_after(&self, _at: VirtualInstant, action: ActionRef) -> Option<CancellationToken> {
    Some(self.schedule(action))
  }

  fn schedule_repeating(
    &self,
    _at: VirtualInstant,
    _policy: RepeatPolicy,
    action: ActionRef,
  ) -> Option<CancellationToken> {
    Some(self.schedule(action))
  }
}
