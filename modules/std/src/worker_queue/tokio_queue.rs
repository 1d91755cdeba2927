//! Queue adapter over a tokio runtime handle.

use tokio::runtime::Handle;

use super::{QueueJob, WorkerQueue};

/// Concurrent queue running jobs as blocking tasks on a tokio runtime.
///
/// The handle is captured explicitly; [`current`](Self::current) picks up
/// the ambient runtime the way the std tick drivers detect theirs.
#[derive(Clone, Debug)]
pub struct TokioQueue {
  handle: Handle,
}

impl TokioQueue {
  /// Wraps the provided runtime handle.
  #[must_use]
  pub const fn new(handle: Handle) -> Self {
    Self { handle }
  }

  /// Captures the current runtime's handle, if called inside one.
  #[must_use]
  pub fn current() -> Option<Self> {
    Handle::try_current().ok().map(Self::new)
  }
}

impl WorkerQueue for TokioQueue {
  fn submit(&self, job: QueueJob) {
    drop(self.handle.spawn_blocking(job));
  }

  fn is_serial(&self) -> bool {
    false
  }

  fn is_current(&self) -> bool {
    // best effort: a runtime context is ambient on every worker, but
    // sibling runtimes cannot be told apart through the public API
    Handle::try_current().is_ok()
  }
}
