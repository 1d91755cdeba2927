//! Shared cancellation flag handed out by scheduling calls.

use alloc::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

use super::Cancellable;

/// Cancellation handle for a single pending or repeating submission.
///
/// Cloning yields another handle to the same underlying flag. The
/// active-to-cancelled transition is one-way and idempotent.
#[derive(Clone, Debug)]
pub struct CancellationToken {
  flag: Arc<AtomicBool>,
}

impl CancellationToken {
  /// Creates an active token.
  #[must_use]
  pub fn new() -> Self {
    Self { flag: Arc::new(AtomicBool::new(false)) }
  }

  /// Creates a token that is already cancelled.
  ///
  /// Returned where there is nothing left to suppress, e.g. by the
  /// immediate scheduler after it has run the action synchronously.
  #[must_use]
  pub fn settled() -> Self {
    Self { flag: Arc::new(AtomicBool::new(true)) }
  }

  /// Requests cancellation. See [`Cancellable::cancel`].
  pub fn cancel(&self) -> bool {
    !self.flag.swap(true, Ordering::AcqRel)
  }

  /// Returns `true` once cancellation has been requested.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.flag.load(Ordering::Acquire)
  }
}

impl Default for CancellationToken {
  fn default() -> Self {
    Self::new()
  }
}

impl Cancellable for CancellationToken {
  fn cancel(&self) -> bool {
    Self::cancel(self)
  }

  fn is_cancelled(&self) -> bool {
    Self::is_cancelled(self)
  }
}
