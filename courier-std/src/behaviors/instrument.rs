//! Span instrumentation for the rest of the chain.

use courier_core::{Behavior, CancellationToken, Next, Outcome, Request};
use tracing::Instrument;

/// A behavior that runs the rest of the chain inside an `info_span!`.
///
/// The span records the request type name and the configured label, so
/// events emitted by inner behaviors and the handler are attributed to the
/// request that caused them.
#[derive(Debug, Clone, Copy)]
pub struct TracingBehavior {
    name: &'static str,
}

impl TracingBehavior {
    /// Create a tracing behavior with a span label.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for TracingBehavior {
    fn default() -> Self {
        Self::new("request")
    }
}

impl<R: Request> Behavior<R> for TracingBehavior {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R::Output> {
        let span = tracing::info_span!(
            "request_handle",
            label = %self.name,
            request = std::any::type_name::<R>(),
        );
        next.run().instrument(span).await
    }
}
