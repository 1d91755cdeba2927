//! Process-default concurrent queue.

use super::{QueueJob, WorkerQueue};

/// Concurrent queue delegating to the process-wide rayon thread pool.
///
/// This is the process-lifetime default execution resource for
/// [`WorkerQueueScheduler`](super::WorkerQueueScheduler): jobs may run on
/// any pool worker with no inter-job ordering guarantee.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalQueue;

impl GlobalQueue {
  /// Creates the queue handle.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl WorkerQueue for GlobalQueue {
  fn submit(&self, job: QueueJob) {
    rayon::spawn(job);
  }

  fn is_serial(&self) -> bool {
    false
  }

  fn is_current(&self) -> bool {
    rayon::current_thread_index().is_some()
  }
}
