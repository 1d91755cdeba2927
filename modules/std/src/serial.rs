//! Serial execution context draining submissions in FIFO order.

mod serial_context;


pub use serial_context::SerialContext;

/// Job submitted to a serial context.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;
