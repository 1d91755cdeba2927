//! Instants on the virtual clock.

use core::{ops::Add, time::Duration};

/// Point on the virtual clock, measured as an offset from virtual zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualInstant(Duration);

impl VirtualInstant {
  /// Virtual zero, where every virtual clock starts.
  pub const ZERO: Self = Self(Duration::ZERO);

  /// Creates an instant at `offset` past virtual zero.
  #[must_use]
  pub const fn from_offset(offset: Duration) -> Self {
    Self(offset)
  }

  /// Offset from virtual zero.
  #[must_use]
  pub const fn offset(&self) -> Duration {
    self.0
  }

  /// Adds `d`, saturating at the maximum representable instant.
  #[must_use]
  pub fn saturating_add(self, d: Duration) -> Self {
    Self(self.0.saturating_add(d))
  }
}

impl Add<Duration> for VirtualInstant {
  type Output = Self;

  fn add(self, rhs: Duration) -> Self {
    self.saturating_add(rhs)
  }
}
