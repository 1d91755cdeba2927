//! Scheduler marshalling work onto one serial context.


use std::{io, sync::Arc, time::Instant};

use takt_core_rs::{
  action::ActionRef,
  cancellation::CancellationToken,
  scheduler::{DateScheduler, RepeatPolicy, Scheduler},
};
use tracing::debug;

use crate::{
  DispatchError,
  serial::SerialContext,
  timer::{TimerDispatch, TimerThread},
};

/// Scheduler executing every action on one designated serial context.
///
/// Relative submission order is preserved among all actions enqueued
/// through any clone of this scheduler. Scheduling against a torn-down
/// context drops the action silently, the documented teardown semantics:
/// the dated calls return `None` and the plain [`Scheduler::schedule`]
/// returns a settled token.
#[derive(Clone)]
pub struct MainContextScheduler {
  inner: Arc<MainContextInner>,
}

struct MainContextInner {
  context: SerialContext,
  timer:   TimerThread,
}

impl MainContextScheduler {
  /// Creates a scheduler over an existing serial context.
  ///
  /// # Errors
  ///
  /// Returns the underlying error when the timer thread cannot be spawned.
  pub fn new(context: SerialContext) -> io::Result<Self> {
    let timer = TimerThread::spawn(&format!("{}-timer", context.name()))?;
    Ok(Self { inner: Arc::new(MainContextInner { context, timer }) })
  }

  /// Spawns a fresh named serial context and schedules onto it.
  ///
  /// # Errors
  ///
  /// Returns the underlying error when a thread cannot be spawned.
  pub fn spawn(name: &str) -> io::Result<Self> {
    Self::new(SerialContext::spawn(name)?)
  }

  /// The underlying serial context.
  #[must_use]
  pub fn context(&self) -> &SerialContext {
    &self.inner.context
  }

  fn dispatch_job(context: &SerialContext, token: &CancellationToken, action: &ActionRef) -> Result<(), DispatchError> {
    let token = token.clone();
    let action = action.clone();
    context.submit(Box::new(move || {
      if token.is_cancelled() {
        return;
      }
      action.run();
    }))
  }

  fn timer_dispatch(&self, token: &CancellationToken, action: &ActionRef) -> TimerDispatch {
    let context = self.inner.context.clone();
    let token = token.clone();
    let action = action.clone();
    Arc::new(move || {
      if Self::dispatch_job(&context, &token, &action).is_err() {
        // settle the entry so a repeat is not re-armed against a dead context
        token.cancel();
        debug!(context = context.name(), "dropping due action, serial context closed");
      }
    })
  }
}

impl Scheduler for MainContextScheduler {
  fn schedule(&self, action: ActionRef) -> CancellationToken {
    let token = CancellationToken::new();
    if Self::dispatch_job(&self.inner.context, &token, &action).is_err() {
      debug!(context = self.inner.context.name(), "dropping submission, serial context closed");
      return CancellationToken::settled();
    }
    token
  }

  fn executes_here(&self) -> bool {
    self.inner.context.is_current()
  }
}

impl DateScheduler for MainContextScheduler {
  type Instant = Instant;

  fn now(&self) -> Instant {
    Instant::now()
  }

  fn schedule_after(&self, at: Instant, action: ActionRef) -> Option<CancellationToken> {
    if self.inner.context.is_closed() {
      return None;
    }
    let token = CancellationToken::new();
    let dispatch = self.timer_dispatch(&token, &action);
    match self.inner.timer.register(at, None, token.clone(), dispatch) {
      | Ok(()) => Some(token),
      | Err(_) => None,
    }
  }

  fn schedule_repeating(&self, at: Instant, policy: RepeatPolicy, action: ActionRef) -> Option<CancellationToken> {
    if self.inner.context.is_closed() {
      return None;
    }
    let token = CancellationToken::new();
    let dispatch = self.timer_dispatch(&token, &action);
    match self.inner.timer.register(at, Some(policy), token.clone(), dispatch) {
      | Ok(()) => Some(token),
      | Err(_) => None,
    }
  }
}
