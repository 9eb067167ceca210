//! Publish strategies for notification fan-out.

pub mod concurrent;
pub mod sequential;
pub mod traits;

pub use concurrent::ConcurrentPublish;
pub use sequential::SequentialPublish;
pub use traits::PublishStrategy;
