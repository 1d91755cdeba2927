#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]

//! Wall-clock execution contexts for the takt scheduler abstraction.
//!
//! Provides the serial main-context scheduler and the worker-queue
//! scheduler, both driven by a dedicated timer thread for delayed and
//! repeating submissions. Every scheduler implements the contracts from
//! `takt-core-rs` with `std::time::Instant` as its clock.

mod dispatch_error;
mod timer;

pub mod main_context;
pub mod serial;
pub mod worker_queue;

pub(crate) use dispatch_error::DispatchError;

pub use main_context::MainContextScheduler;
pub use serial::SerialContext;
pub use worker_queue::{GlobalQueue, QueueJob, SerialQueue, TokioQueue, WorkerQueue, WorkerQueueScheduler};
