//! Cancellation tokens governing scheduled work.

mod cancellable;
mod cancellation_token;
mod composite_cancellation;


pub use cancellable::Cancellable;
pub use cancellation_token::CancellationToken;
pub use composite_cancellation::CompositeCancellation;
