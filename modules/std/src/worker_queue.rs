//! Scheduler targeting caller-supplied worker queues.

mod global_queue;
mod serial_queue;
mod tokio_queue;
mod worker_queue_scheduler;


pub use global_queue::GlobalQueue;
pub use serial_queue::SerialQueue;
pub use tokio_queue::TokioQueue;
pub use worker_queue_scheduler::WorkerQueueScheduler;

/// Job submitted to a worker queue.
pub type QueueJob = Box<dyn FnOnce() + Send + 'static>;

/// Execution queue backing a [`WorkerQueueScheduler`].
///
/// Implementations must not block the submitting thread; jobs run on the
/// queue's own workers. The process-wide default is [`GlobalQueue`];
/// injecting a different queue is the supported way to direct work
/// elsewhere, there is no implicit global state beyond the default.
pub trait WorkerQueue: Send + Sync + 'static {
  /// Enqueues `job` for execution.
  fn submit(&self, job: QueueJob);

  /// Returns `true` when the queue executes jobs one at a time in
  /// submission order.
  fn is_serial(&self) -> bool;

  /// Returns `true` when the calling thread belongs to the queue.
  fn is_current(&self) -> bool;

  /// Returns `true` once the queue can no longer accept jobs.
  ///
  /// Process-lifetime queues never close; the serial adapter reports its
  /// context's teardown.
  fn is_closed(&self) -> bool {
    false
  }
}
