//! Internal dispatch failures mapped to the drop-and-log path.

use thiserror::Error;

/// Reasons a submission could not reach its execution context.
///
/// Never surfaces through the public API: a failed dispatch is reported as
/// a dropped submission (`None` from the dated scheduling calls), matching
/// context-teardown semantics.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum DispatchError {
  /// The serial context's thread has been torn down.
  #[error("execution context closed")]
  ContextClosed,
  /// The owning timer thread has been shut down.
  #[error("timer thread stopped")]
  TimerStopped,
}
