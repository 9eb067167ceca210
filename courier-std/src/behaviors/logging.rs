//! Logging behavior for request observation.

use courier_core::{Behavior, CancellationToken, Next, Outcome, Request};
#[cfg(feature = "tracing")]
use courier_core::OutcomeRef;
use std::fmt::Debug;

/// A behavior that logs requests and their outcomes.
///
/// Successful outcomes are logged at `debug`, failures at `warn` with their
/// code and kind. Without the `tracing` feature it only passes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehavior;

impl LoggingBehavior {
    /// Create a new logging behavior.
    pub const fn new() -> Self {
        Self
    }
}

impl<R: Request + Debug> Behavior<R> for LoggingBehavior {
    async fn handle(
        &self,
        request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R::Output> {
        #[cfg(feature = "tracing")]
        {
            let name = std::any::type_name::<R>();
            let started = std::time::Instant::now();
            tracing::debug!(request = name, ?request, "Handling request");

            let outcome = next.run().await;
            let elapsed = started.elapsed();
            match outcome.as_view() {
                OutcomeRef::Success(_) => {
                    tracing::debug!(request = name, ?elapsed, "Request succeeded");
                }
                OutcomeRef::Failure(error) => {
                    tracing::warn!(
                        request = name,
                        code = error.code(),
                        kind = %error.kind(),
                        ?elapsed,
                        "Request failed"
                    );
                }
            }
            outcome
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = request;
            next.run().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, RecordingBehavior};
    use courier_core::{Chain, DynBehavior, Error, Message, RequestHandler};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Lookup(u32);
    impl Message for Lookup {}
    impl Request for Lookup {
        type Output = String;
    }

    struct Missing;
    impl RequestHandler<Lookup> for Missing {
        async fn handle(&self, request: &Lookup, _cancel: &CancellationToken) -> Outcome<String> {
            Outcome::failure(Error::not_found("Lookup.Missing", format!("no entry {}", request.0)))
        }
    }

    #[tokio::test]
    async fn passes_outcome_through_unchanged() {
        let log = CallLog::new();
        let behaviors: Vec<Arc<dyn DynBehavior<Lookup>>> = vec![
            Arc::new(LoggingBehavior::new()),
            Arc::new(RecordingBehavior::new("inner", log.clone())),
        ];

        let outcome = Chain::new(&behaviors, &Missing)
            .invoke(&Lookup(9), &CancellationToken::new())
            .await;

        assert_eq!(outcome.error().description(), "no entry 9");
        assert_eq!(log.entries(), ["inner:before", "inner:after"]);
    }
}
