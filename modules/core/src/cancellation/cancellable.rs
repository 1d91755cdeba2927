//! Common surface of cancellation handles.

/// Surface shared by cancellation handles returned from scheduling calls.
///
/// Cancellation is cooperative and non-preemptive: it never interrupts an
/// action that has already begun executing, only suppresses invocations
/// that have not yet started.
pub trait Cancellable: Send + Sync {
  /// Requests cancellation.
  ///
  /// Returns `true` when this call performed the active-to-cancelled
  /// transition, `false` when the handle was already cancelled. Safe to
  /// call from any thread, any number of times.
  fn cancel(&self) -> bool;

  /// Returns `true` once cancellation has been requested. Monotonic.
  fn is_cancelled(&self) -> bool;
}
