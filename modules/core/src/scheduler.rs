//! Scheduler contracts shared by every execution context.

mod repeat_policy;

#[cfg(test)]
mod tests;

pub use repeat_policy::RepeatPolicy;

use alloc::sync::Arc;

use crate::{action::ActionRef, cancellation::CancellationToken};

/// Uniform deferred-execution surface.
///
/// A caller holds a reference to *some* scheduler (chosen by component
/// wiring, not by this crate) and submits opaque actions; the scheduler
/// returns a cancellation token suppressing work that has not yet started.
/// Scheduling itself never fails and never blocks the caller beyond the
/// action bodies an inline scheduler runs synchronously.
pub trait Scheduler: Send + Sync {
  /// Submits `action` for execution on this scheduler's context.
  ///
  /// Cancelling the returned token before the context has started the
  /// action suppresses it; cancelling afterwards is a no-op.
  fn schedule(&self, action: ActionRef) -> CancellationToken;

  /// Returns `true` when the calling thread is this scheduler's execution
  /// context.
  fn executes_here(&self) -> bool;
}

/// Delayed and repeating scheduling on top of [`Scheduler`].
pub trait DateScheduler: Scheduler {
  /// Point-in-time representation used by this scheduler's clock.
  type Instant: Copy + Ord;

  /// Current reading of this scheduler's clock.
  fn now(&self) -> Self::Instant;

  /// Submits `action` to run no earlier than `at`.
  ///
  /// Returns `None` when the target context has been torn down and the
  /// submission was dropped; that is documented teardown behavior, not an
  /// error.
  fn schedule_after(&self, at: Self::Instant, action: ActionRef) -> Option<CancellationToken>;

  /// Submits `action` to run no earlier than `at` and again after each
  /// successive interval of `policy` until the returned token is
  /// cancelled.
  ///
  /// Cancellation stops future recurrences; an in-flight invocation is not
  /// interrupted. Returns `None` when the target context has been torn
  /// down.
  fn schedule_repeating(&self, at: Self::Instant, policy: RepeatPolicy, action: ActionRef)
    -> Option<CancellationToken>;
}

/// Closure conveniences over the object-safe scheduling surface.
pub trait SchedulerExt: Scheduler {
  /// Wraps `f` into a shared action and submits it.
  fn schedule_fn<F>(&self, f: F) -> CancellationToken
  where
    F: Fn() + Send + Sync + 'static, {
    self.schedule(Arc::new(f))
  }
}

impl<S: Scheduler + ?Sized> SchedulerExt for S {}
