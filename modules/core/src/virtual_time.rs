//! Deterministic virtual-time scheduler for temporal testing.

mod scheduled_entry;
mod virtual_instant;
mod virtual_time_scheduler;

#[cfg(test)]
mod tests;

pub(crate) use scheduled_entry::ScheduledEntry;
pub use virtual_instant::VirtualInstant;
pub use virtual_time_scheduler::VirtualTimeScheduler;
