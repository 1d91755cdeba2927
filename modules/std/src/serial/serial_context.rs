//! Dedicated thread executing submitted jobs one at a time.

use std::{
  io,
  sync::{
    Arc,
    mpsc::{Sender, channel},
  },
  thread::{self, JoinHandle, ThreadId},
};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::Job;
use crate::DispatchError;

/// Handle to one dedicated thread executing submitted jobs in FIFO order.
///
/// Cloning shares the same underlying thread, so submission order is
/// preserved across every clone. The context is torn down by
/// [`shutdown`](Self::shutdown) or when the last handle drops; already
/// queued jobs are drained first. Submissions arriving after teardown are
/// dropped silently, mirroring typical UI teardown semantics.
#[derive(Clone)]
pub struct SerialContext {
  inner: Arc<ContextInner>,
}

struct ContextInner {
  sender:    Mutex<Option<Sender<Job>>>,
  thread:    Mutex<Option<JoinHandle<()>>>,
  thread_id: ThreadId,
  name:      String,
}

impl SerialContext {
  /// Spawns a context thread with the given name.
  ///
  /// # Errors
  ///
  /// Returns the underlying error when the OS refuses to spawn the thread.
  pub fn spawn(name: &str) -> io::Result<Self> {
    let (sender, receiver) = channel::<Job>();
    let thread = thread::Builder::new().name(name.to_owned()).spawn(move || {
      while let Ok(job) = receiver.recv() {
        job();
      }
      trace!("serial context drained");
    })?;
    let thread_id = thread.thread().id();
    let inner = ContextInner {
      sender: Mutex::new(Some(sender)),
      thread: Mutex::new(Some(thread)),
      thread_id,
      name: name.to_owned(),
    };
    Ok(Self { inner: Arc::new(inner) })
  }

  /// Context name, also carried by the thread.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.inner.name
  }

  /// Returns `true` when called from the context's own thread.
  #[must_use]
  pub fn is_current(&self) -> bool {
    thread::current().id() == self.inner.thread_id
  }

  /// Returns `true` once the context has been torn down.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.inner.sender.lock().is_none()
  }

  /// Enqueues `job` without blocking. Fails once the context is closed.
  pub(crate) fn submit(&self, job: Job) -> Result<(), DispatchError> {
    match self.inner.sender.lock().as_ref() {
      | Some(sender) => sender.send(job).map_err(|_| DispatchError::ContextClosed),
      | None => Err(DispatchError::ContextClosed),
    }
  }

  /// Stops accepting submissions, drains already queued jobs, and joins
  /// the context thread. Idempotent; a call from the context thread itself
  /// skips the join.
  pub fn shutdown(&self) {
    if self.inner.sender.lock().take().is_some() {
      debug!(context = self.inner.name.as_str(), "serial context shutting down");
    }
    if self.is_current() {
      return;
    }
    if let Some(thread) = self.inner.thread.lock().take() {
      let _ = thread.join();
    }
  }
}

impl Drop for ContextInner {
  fn drop(&mut self) {
    drop(self.sender.lock().take());
    if thread::current().id() == self.thread_id {
      // the last handle died on the context thread itself; the thread
      // winds down on its own once the queue drains
      return;
    }
    if let Some(thread) = self.thread.lock().take() {
      let _ = thread.join();
    }
  }
}
