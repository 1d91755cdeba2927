use alloc::sync::Arc;
use core::time::Duration;

use portable_atomic::{AtomicUsize, Ordering};

use super::{RepeatPolicy, Scheduler, SchedulerExt};
use crate::immediate::ImmediateScheduler;

#[test]
fn repeat_policy_defaults_to_zero_leeway() {
  let policy = RepeatPolicy::every(Duration::from_millis(10));
  assert_eq!(policy.interval(), Duration::from_millis(10));
  assert_eq!(policy.leeway(), Duration::ZERO);
  assert!(policy.repeats());
}

#[test]
fn repeat_policy_with_leeway_keeps_interval() {
  let policy = RepeatPolicy::every(Duration::from_millis(10)).with_leeway(Duration::from_millis(2));
  assert_eq!(policy.interval(), Duration::from_millis(10));
  assert_eq!(policy.leeway(), Duration::from_millis(2));
}

#[test]
fn zero_interval_does_not_repeat() {
  assert!(!RepeatPolicy::every(Duration::ZERO).repeats());
}

#[test]
fn schedule_fn_reaches_trait_objects() {
  let scheduler: &dyn Scheduler = &ImmediateScheduler::new();
  let runs = Arc::new(AtomicUsize::new(0));
  let observed = runs.clone();
  scheduler.schedule_fn(move || {
    observed.fetch_add(1, Ordering::SeqCst);
  });
  assert_eq!(runs.load(Ordering::SeqCst), 1);
}
