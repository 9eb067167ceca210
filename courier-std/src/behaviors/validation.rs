//! Validation behavior.

use courier_core::{
    Behavior, CancellationToken, Next, Outcome, Request, ValidationError,
};

/// Validation rules of a request.
///
/// Each rule yields an outcome; every failed one contributes its error, in
/// order, to the [`ValidationError`] the request is rejected with.
///
/// # Example
///
/// ```rust,ignore
/// impl Validate for CreateUser {
///     fn validate(&self) -> Vec<Outcome<()>> {
///         vec![
///             rule(!self.name.is_empty(), Error::validation("User.Name", "name is required")),
///             rule(self.age >= 18, Error::validation("User.Age", "must be an adult")),
///         ]
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be validated",
    label = "missing `Validate` implementation",
    note = "`ValidationBehavior` only wraps requests that implement `Validate`."
)]
pub trait Validate {
    /// Evaluate every rule.
    fn validate(&self) -> Vec<Outcome<()>>;
}

/// A behavior that rejects invalid requests before they reach the handler.
///
/// When any rule fails, the chain is short-circuited with the aggregate
/// [`ValidationError`] of all failed rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationBehavior;

impl<R: Request + Validate> Behavior<R> for ValidationBehavior {
    async fn handle(
        &self,
        request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R::Output> {
        let results = request.validate();
        let error = ValidationError::from_outcomes(&results);
        if error.is_empty() {
            return next.run().await;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            request = std::any::type_name::<R>(),
            failures = error.errors().len(),
            "Request rejected by validation"
        );
        Outcome::failure(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingHandler;
    use courier_core::{Chain, DynBehavior, Error, ErrorKind, Message};
    use std::sync::Arc;

    struct Register {
        name: &'static str,
        age: u8,
    }
    impl Message for Register {}
    impl Request for Register {
        type Output = u64;
    }

    fn rule(ok: bool, error: Error) -> Outcome<()> {
        if ok { Outcome::completed() } else { Outcome::failure(error) }
    }

    impl Validate for Register {
        fn validate(&self) -> Vec<Outcome<()>> {
            vec![
                rule(!self.name.is_empty(), Error::validation("Register.Name", "name is required")),
                rule(true, Error::validation("Register.Never", "unused")),
                rule(self.age >= 18, Error::validation("Register.Age", "must be an adult")),
            ]
        }
    }

    fn behaviors() -> Vec<Arc<dyn DynBehavior<Register>>> {
        vec![Arc::new(ValidationBehavior)]
    }

    #[tokio::test]
    async fn valid_request_reaches_handler() {
        let behaviors = behaviors();
        let handler = CountingHandler::new(1u64);

        let outcome = Chain::new(&behaviors, &handler)
            .invoke(&Register { name: "ada", age: 36 }, &CancellationToken::new())
            .await;

        assert_eq!(outcome, Outcome::success(1));
        assert_eq!(handler.count(), 1);
    }

    #[tokio::test]
    async fn invalid_request_collects_every_failure_in_order() {
        let behaviors = behaviors();
        let handler = CountingHandler::new(1u64);

        let outcome = Chain::new(&behaviors, &handler)
            .invoke(&Register { name: "", age: 12 }, &CancellationToken::new())
            .await;

        let error = outcome.error();
        assert_eq!(error.code(), ValidationError::CODE);
        assert_eq!(error.kind(), ErrorKind::Validation);
        let codes: Vec<_> = error
            .validation_errors()
            .expect("aggregate keeps its components")
            .iter()
            .map(Error::code)
            .collect();
        assert_eq!(codes, ["Register.Name", "Register.Age"]);
        assert_eq!(handler.count(), 0);
    }
}
