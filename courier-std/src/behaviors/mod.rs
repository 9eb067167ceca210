//! Standard behaviors.
//!
//! - [`LoggingBehavior`]: logs each request and how it ended
//! - [`TracingBehavior`]: runs the rest of the chain inside a span (feature `tracing`)
//! - [`TimeoutBehavior`]: bounds the rest of the chain in time (feature `timeout`)
//! - [`ValidationBehavior`]: rejects requests whose [`Validate`] rules fail

#[cfg(feature = "tracing")]
mod instrument;
mod logging;
#[cfg(feature = "timeout")]
mod timeout;
mod validation;

#[cfg(feature = "tracing")]
pub use instrument::TracingBehavior;
pub use logging::LoggingBehavior;
#[cfg(feature = "timeout")]
pub use timeout::TimeoutBehavior;
pub use validation::{Validate, ValidationBehavior};
