//! Serial queue adapter preserving submission order.

use tracing::debug;

use super::{QueueJob, WorkerQueue};
use crate::serial::SerialContext;

/// Worker queue backed by a [`SerialContext`].
///
/// Submissions keep their relative order since the context drains them one
/// at a time. Jobs arriving after the context's teardown are dropped
/// silently, matching the context's own semantics.
#[derive(Clone)]
pub struct SerialQueue {
  context: SerialContext,
}

impl SerialQueue {
  /// Wraps an existing serial context.
  #[must_use]
  pub const fn new(context: SerialContext) -> Self {
    Self { context }
  }

  /// The backing serial context.
  #[must_use]
  pub const fn context(&self) -> &SerialContext {
    &self.context
  }
}

impl WorkerQueue for SerialQueue {
  fn submit(&self, job: QueueJob) {
    if self.context.submit(job).is_err() {
      debug!(context = self.context.name(), "dropping job, serial context closed");
    }
  }

  fn is_serial(&self) -> bool {
    true
  }

  fn is_current(&self) -> bool {
    self.context.is_current()
  }

  fn is_closed(&self) -> bool {
    self.context.is_closed()
  }
}
