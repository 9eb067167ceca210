//! Timeout behavior for time-limited handling.

use courier_core::{Behavior, CancellationToken, Error, Next, Outcome, Request};
use std::time::Duration;
use tokio::time::timeout;

/// A behavior that bounds the rest of the chain in time.
///
/// The inner chain runs under a child of the caller's token. When the
/// duration elapses the child token is cancelled, the inner chain is
/// dropped and the request fails with [`TimeoutBehavior::CODE`] as a
/// [`Problem`](courier_core::ErrorKind::Problem). The caller's own token is
/// left untouched.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutBehavior {
    duration: Duration,
}

impl TimeoutBehavior {
    /// Error code of a timed out request.
    pub const CODE: &'static str = "Request.Timeout";

    /// Create a new timeout behavior.
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The configured limit.
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl<R: Request> Behavior<R> for TimeoutBehavior {
    async fn handle(
        &self,
        _request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R::Output> {
        let child = cancel.child_token();
        match timeout(self.duration, next.run_with(&child)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                child.cancel();
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    request = std::any::type_name::<R>(),
                    duration = ?self.duration,
                    "Request timed out"
                );
                Outcome::failure(Error::problem(
                    Self::CODE,
                    format!("the request did not complete within {:?}", self.duration),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{Chain, DynBehavior, ErrorKind, Message, RequestHandler};
    use std::sync::{Arc, Mutex};

    struct Slow;
    impl Message for Slow {}
    impl Request for Slow {
        type Output = ();
    }

    struct Sleeper {
        delay: Duration,
        seen: Arc<Mutex<Option<CancellationToken>>>,
    }

    impl RequestHandler<Slow> for Sleeper {
        async fn handle(&self, _request: &Slow, cancel: &CancellationToken) -> Outcome<()> {
            *self.seen.lock().unwrap() = Some(cancel.clone());
            tokio::time::sleep(self.delay).await;
            Outcome::completed()
        }
    }

    fn chain_of(limit: Duration) -> Vec<Arc<dyn DynBehavior<Slow>>> {
        vec![Arc::new(TimeoutBehavior::new(limit))]
    }

    #[tokio::test]
    async fn fast_handler_completes() {
        let behaviors = chain_of(Duration::from_secs(5));
        let handler = Sleeper {
            delay: Duration::from_millis(1),
            seen: Arc::default(),
        };

        let outcome = Chain::new(&behaviors, &handler)
            .invoke(&Slow, &CancellationToken::new())
            .await;

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn slow_handler_times_out_and_inner_token_is_cancelled() {
        let behaviors = chain_of(Duration::from_millis(10));
        let seen = Arc::new(Mutex::new(None));
        let handler = Sleeper {
            delay: Duration::from_secs(5),
            seen: seen.clone(),
        };
        let caller = CancellationToken::new();

        let outcome = Chain::new(&behaviors, &handler).invoke(&Slow, &caller).await;

        assert_eq!(outcome.error().code(), TimeoutBehavior::CODE);
        let limit = TimeoutBehavior::new(Duration::from_millis(10)).duration();
        assert!(outcome.error().description().contains(&format!("{limit:?}")));
        assert_eq!(outcome.error().kind(), ErrorKind::Problem);
        let inner = seen.lock().unwrap().clone().expect("handler started");
        assert!(inner.is_cancelled());
        assert!(!caller.is_cancelled());
    }
}
