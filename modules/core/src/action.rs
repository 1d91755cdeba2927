//! Action trait executed by scheduler-delivered work.

use alloc::sync::Arc;

/// Unit of work submitted to a scheduler.
///
/// A one-shot submission runs the action at most once; a repeating
/// submission runs it once per due firing. An action is never invoked after
/// its governing cancellation has taken effect.
pub trait ScheduledAction: Send + Sync + 'static {
  /// Executes the action.
  fn run(&self);
}

impl<F> ScheduledAction for F
where
  F: Fn() + Send + Sync + 'static,
{
  fn run(&self) {
    (self)();
  }
}

/// Shared action handle passed across the scheduler APIs.
pub type ActionRef = Arc<dyn ScheduledAction>;
