//! Container token cancelling child tokens exactly once each.

use alloc::{sync::Arc, vec::Vec};

use portable_atomic::{AtomicBool, Ordering};
use spin::Mutex as SpinMutex;

use super::{Cancellable, CancellationToken};

/// Container cancellation handle owning child tokens.
///
/// Cancelling the container cancels every current child exactly once; a
/// child added after cancellation is cancelled immediately and not
/// retained. Concurrent `add`/`cancel` races resolve so that every child is
/// cancelled by exactly one side: `add` re-checks the container flag while
/// holding the child list lock, and `cancel` sets the flag before draining
/// under the same lock.
#[derive(Clone)]
pub struct CompositeCancellation {
  inner: Arc<CompositeInner>,
}

struct CompositeInner {
  cancelled: AtomicBool,
  children:  SpinMutex<Vec<CancellationToken>>,
}

impl CompositeCancellation {
  /// Creates an empty, active container.
  #[must_use]
  pub fn new() -> Self {
    Self { inner: Arc::new(CompositeInner { cancelled: AtomicBool::new(false), children: SpinMutex::new(Vec::new()) }) }
  }

  /// Registers `child` for cancellation alongside the container.
  ///
  /// If the container is already cancelled the child is cancelled
  /// immediately instead of being retained.
  pub fn add(&self, child: CancellationToken) {
    let mut children = self.inner.children.lock();
    if self.inner.cancelled.load(Ordering::Acquire) {
      drop(children);
      child.cancel();
      return;
    }
    children.push(child);
  }

  /// Cancels the container and every registered child.
  ///
  /// Returns `true` when this call performed the transition.
  pub fn cancel(&self) -> bool {
    if self.inner.cancelled.swap(true, Ordering::AcqRel) {
      return false;
    }
    let children = core::mem::take(&mut *self.inner.children.lock());
    for child in children {
      child.cancel();
    }
    true
  }

  /// Returns `true` once the container has been cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.inner.cancelled.load(Ordering::Acquire)
  }

  /// A plain token view of the container, registered as a child.
  ///
  /// Cancelling the container settles the view; a view taken from an
  /// already cancelled container comes back settled. Cancelling the view
  /// itself does not cancel the container.
  #[must_use]
  pub fn token(&self) -> CancellationToken {
    let view = CancellationToken::new();
    self.add(view.clone());
    view
  }

  #[cfg(test)]
  pub(crate) fn child_count_for_test(&self) -> usize {
    self.inner.children.lock().len()
  }
}

impl Default for CompositeCancellation {
  fn default() -> Self {
    Self::new()
  }
}

impl Cancellable for CompositeCancellation {
  fn cancel(&self) -> bool {
    Self::cancel(self)
  }

  fn is_cancelled(&self) -> bool {
    Self::is_cancelled(self)
  }
}
