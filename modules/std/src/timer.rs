//! Timer thread dispatching due submissions to an execution context.

mod timer_entry;
mod timer_thread;


pub(crate) use timer_thread::{TimerDispatch, TimerThread};
