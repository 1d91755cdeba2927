use alloc::{sync::Arc, vec::Vec};
use core::time::Duration;

use portable_atomic::{AtomicUsize, Ordering};
use spin::Mutex as SpinMutex;

use super::{VirtualInstant, VirtualTimeScheduler};
use crate::{
  cancellation::CancellationToken,
  scheduler::{DateScheduler, RepeatPolicy, Scheduler, SchedulerExt},
};

type Log = Arc<SpinMutex<Vec<&'static str>>>;

fn log() -> Log {
  Arc::new(SpinMutex::new(Vec::new()))
}

fn record(log: &Log, label: &'static str) -> Arc<dyn crate::action::ScheduledAction> {
  let log = log.clone();
  Arc::new(move || log.lock().push(label))
}

fn at(ms: u64) -> VirtualInstant {
  VirtualInstant::from_offset(Duration::from_millis(ms))
}

#[test]
fn schedule_does_not_run_at_submission() {
  let scheduler = VirtualTimeScheduler::new();
  let log = log();
  scheduler.schedule(record(&log, "now"));
  assert!(log.lock().is_empty());
  scheduler.advance_by(Duration::ZERO);
  assert_eq!(*log.lock(), ["now"]);
}

#[test]
fn advancement_runs_due_entries_with_submission_order_tie_break() {
  let scheduler = VirtualTimeScheduler::new();
  let log = log();
  scheduler.schedule_after(at(15), record(&log, "a")).unwrap();
  scheduler.schedule_after(at(5), record(&log, "b")).unwrap();
  scheduler.schedule(record(&log, "c"));

  scheduler.advance_by(Duration::from_millis(10));
  assert_eq!(*log.lock(), ["c", "b"]);
  assert_eq!(scheduler.now(), at(10));

  scheduler.advance_by(Duration::from_millis(10));
  assert_eq!(*log.lock(), ["c", "b", "a"]);
  assert_eq!(scheduler.now(), at(20));
}

#[test]
fn same_due_entries_run_in_submission_order_across_both_apis() {
  let scheduler = VirtualTimeScheduler::new();
  let log = log();
  scheduler.schedule_after(at(5), record(&log, "first")).unwrap();
  scheduler.schedule(record(&log, "second"));
  scheduler.advance_by(Duration::from_millis(5));
  // "second" was due at zero, so it still precedes the later due time;
  // entries sharing a due time keep their submission order
  assert_eq!(*log.lock(), ["second", "first"]);

  let more = log.clone();
  scheduler.schedule_after(scheduler.now(), record(&more, "x")).unwrap();
  scheduler.schedule(record(&more, "y"));
  scheduler.advance_by(Duration::ZERO);
  assert_eq!(*log.lock(), ["second", "first", "x", "y"]);
}

#[test]
fn run_executes_in_due_time_order_regardless_of_submission_order() {
  let scheduler = VirtualTimeScheduler::new();
  let log = log();
  scheduler.schedule_after(at(15), record(&log, "a")).unwrap();
  scheduler.schedule_after(at(5), record(&log, "b")).unwrap();
  scheduler.schedule(record(&log, "c"));
  scheduler.run();
  assert_eq!(*log.lock(), ["c", "b", "a"]);
  assert_eq!(scheduler.now(), at(15));
  assert_eq!(scheduler.pending_count_for_test(), 0);
}

#[test]
fn clock_lands_exactly_on_target() {
  let scheduler = VirtualTimeScheduler::new();
  scheduler.advance_by(Duration::from_millis(7));
  assert_eq!(scheduler.now(), at(7));
  scheduler.schedule_after(at(9), Arc::new(|| {})).unwrap();
  scheduler.advance_by(Duration::from_millis(10));
  assert_eq!(scheduler.now(), at(17));
}

#[test]
fn clock_reads_the_entry_due_time_during_execution() {
  let scheduler = Arc::new(VirtualTimeScheduler::new());
  let observed = Arc::new(SpinMutex::new(None));
  let inner = scheduler.clone();
  let slot = observed.clone();
  scheduler.schedule_after(at(12), Arc::new(move || *slot.lock() = Some(inner.now()))).unwrap();
  scheduler.advance_by(Duration::from_millis(30));
  assert_eq!(*observed.lock(), Some(at(12)));
}

#[test]
fn cancelled_entry_is_suppressed() {
  let scheduler = VirtualTimeScheduler::new();
  let log = log();
  let token = scheduler.schedule_after(at(5), record(&log, "doomed")).unwrap();
  token.cancel();
  scheduler.advance_by(Duration::from_millis(10));
  assert!(log.lock().is_empty());
}

#[test]
fn repeating_entry_fires_once_per_interval() {
  let scheduler = VirtualTimeScheduler::new();
  let runs = Arc::new(AtomicUsize::new(0));
  let counter = runs.clone();
  let policy = RepeatPolicy::every(Duration::from_millis(10));
  scheduler
    .schedule_repeating(VirtualInstant::ZERO, policy, Arc::new(move || {
      counter.fetch_add(1, Ordering::SeqCst);
    }))
    .unwrap();
  scheduler.advance_by(Duration::from_millis(35));
  // fires at 0, 10, 20, 30
  assert_eq!(runs.load(Ordering::SeqCst), 4);
}

#[test]
fn cancelling_a_repeating_entry_stops_future_firings() {
  let scheduler = VirtualTimeScheduler::new();
  let runs = Arc::new(AtomicUsize::new(0));
  let counter = runs.clone();
  let policy = RepeatPolicy::every(Duration::from_millis(10));
  let token = scheduler
    .schedule_repeating(at(10), policy, Arc::new(move || {
      counter.fetch_add(1, Ordering::SeqCst);
    }))
    .unwrap();
  scheduler.advance_by(Duration::from_millis(25));
  assert_eq!(runs.load(Ordering::SeqCst), 2);
  token.cancel();
  scheduler.advance_by(Duration::from_millis(100));
  assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn self_cancellation_takes_effect_immediately() {
  let scheduler = VirtualTimeScheduler::new();
  let runs = Arc::new(AtomicUsize::new(0));
  let slot: Arc<SpinMutex<Option<CancellationToken>>> = Arc::new(SpinMutex::new(None));
  let counter = runs.clone();
  let held = slot.clone();
  let policy = RepeatPolicy::every(Duration::from_millis(10));
  let token = scheduler
    .schedule_repeating(VirtualInstant::ZERO, policy, Arc::new(move || {
      counter.fetch_add(1, Ordering::SeqCst);
      if let Some(token) = held.lock().as_ref() {
        token.cancel();
      }
    }))
    .unwrap();
  *slot.lock() = Some(token);
  scheduler.advance_by(Duration::from_millis(100));
  assert_eq!(runs.load(Ordering::SeqCst), 1);
  assert_eq!(scheduler.pending_count_for_test(), 0);
}

#[test]
fn actions_may_schedule_more_work_within_the_same_advancement() {
  let scheduler = Arc::new(VirtualTimeScheduler::new());
  let log = log();
  let inner = scheduler.clone();
  let nested = log.clone();
  scheduler.schedule_fn(move || {
    nested.lock().push("outer");
    let innermost = nested.clone();
    inner.schedule_fn(move || innermost.lock().push("inner"));
  });
  scheduler.advance_by(Duration::ZERO);
  assert_eq!(*log.lock(), ["outer", "inner"]);
}

#[test]
fn leeway_never_shifts_the_due_time() {
  let scheduler = Arc::new(VirtualTimeScheduler::new());
  let observed = Arc::new(SpinMutex::new(Vec::new()));
  let inner = scheduler.clone();
  let fired = observed.clone();
  let policy = RepeatPolicy::every(Duration::from_millis(10)).with_leeway(Duration::from_millis(4));
  let token = scheduler
    .schedule_repeating(at(10), policy, Arc::new(move || fired.lock().push(inner.now())))
    .unwrap();
  scheduler.advance_by(Duration::from_millis(30));
  token.cancel();
  assert_eq!(*observed.lock(), [at(10), at(20), at(30)]);
}

#[test]
fn panicking_action_does_not_disturb_later_entries() {
  use std::panic::{AssertUnwindSafe, catch_unwind};

  let scheduler = VirtualTimeScheduler::new();
  let log = log();
  scheduler.schedule_after(at(5), Arc::new(|| panic!("boom"))).unwrap();
  scheduler.schedule_after(at(10), record(&log, "survivor")).unwrap();
  let outcome = catch_unwind(AssertUnwindSafe(|| scheduler.advance_by(Duration::from_millis(20))));
  assert!(outcome.is_err());
  scheduler.advance_by(Duration::from_millis(20));
  assert_eq!(*log.lock(), ["survivor"]);
}
