//! Repeat policy applied to recurring submissions.

use core::time::Duration;

/// Interval and leeway of a repeating submission.
///
/// Every scheduler interprets the policy identically: the first firing is
/// never earlier than the requested due time and later firings land at
/// `due + n * interval`. `leeway` bounds how far a concrete timer may delay
/// a firing for batching; a firing is never skipped, only delayed within
/// the leeway window, and the virtual-time scheduler treats leeway as a
/// no-op since it has no timer jitter to bound. A zero interval disables
/// repetition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatPolicy {
  interval: Duration,
  leeway:   Duration,
}

impl RepeatPolicy {
  /// Policy repeating at `interval` with zero leeway.
  #[must_use]
  pub const fn every(interval: Duration) -> Self {
    Self { interval, leeway: Duration::ZERO }
  }

  /// Returns the policy with `leeway` allowed for timer batching.
  #[must_use]
  pub const fn with_leeway(self, leeway: Duration) -> Self {
    Self { interval: self.interval, leeway }
  }

  /// Interval between firings.
  #[must_use]
  pub const fn interval(&self) -> Duration {
    self.interval
  }

  /// Permissible firing delay for batching.
  #[must_use]
  pub const fn leeway(&self) -> Duration {
    self.leeway
  }

  /// Returns `true` when the policy actually repeats.
  #[must_use]
  pub const fn repeats(&self) -> bool {
    !self.interval.is_zero()
  }
}
