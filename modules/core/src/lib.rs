#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![no_std]

//! Scheduling core shared by every takt execution context.
//!
//! Defines the cancellation model, the action and scheduler contracts, the
//! synchronous immediate scheduler, and the deterministic virtual-time
//! scheduler used for exercising temporal behavior without a wall clock.
//! Concrete wall-clock contexts (serial main context, worker queues) live in
//! the std crate and implement the same contracts.

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod action;
pub mod cancellation;
pub mod immediate;
pub mod scheduler;
pub mod virtual_time;

pub use action::{ActionRef, ScheduledAction};
pub use cancellation::{Cancellable, CancellationToken, CompositeCancellation};
pub use immediate::ImmediateScheduler;
pub use scheduler::{DateScheduler, RepeatPolicy, Scheduler, SchedulerExt};
pub use virtual_time::{VirtualInstant, VirtualTimeScheduler};
