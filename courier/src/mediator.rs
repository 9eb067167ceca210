//! The mediator: routes requests to their handler and fans notifications out.

use crate::publish::{ConcurrentPublish, PublishStrategy};
use courier_core::{
    CancellationToken, Chain, DispatchError, Notification, Outcome, PublishError, Request,
    Resolver,
};
use std::any::type_name;

/// In-process mediator over a [`Resolver`].
///
/// - [`send`](Mediator::send) resolves the one handler of a request, wraps it
///   in the request's behaviors (first registered is outermost) and returns
///   the handler's [`Outcome`].
/// - [`publish`](Mediator::publish) delivers a notification to every handler
///   registered for its exact type, through the publish strategy `D`.
///
/// The mediator holds no per-call state, so a single instance can serve any
/// number of concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// let registry = RegistryBuilder::new()
///     .handler::<CreateUser, _>(CreateUserHandler::new(store))
///     .behavior::<CreateUser, _>(ValidationBehavior)
///     .notification_handler::<UserCreated, _>(SendWelcomeMail)
///     .build()?;
/// let mediator = Mediator::new(registry);
///
/// let outcome = mediator.send(CreateUser { name: "ada".into() }).await?;
/// if let OutcomeRef::Success(id) = outcome.as_view() {
///     mediator.publish(&UserCreated { id: *id }).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Mediator<P, D = ConcurrentPublish> {
    resolver: P,
    strategy: D,
}

impl<P: Resolver> Mediator<P> {
    /// Create a mediator that publishes concurrently.
    pub fn new(resolver: P) -> Self {
        Self::with_strategy(resolver, ConcurrentPublish)
    }
}

impl<P: Resolver, D: PublishStrategy> Mediator<P, D> {
    /// Create a mediator with an explicit publish strategy.
    pub fn with_strategy(resolver: P, strategy: D) -> Self {
        Self { resolver, strategy }
    }

    /// The resolver handlers are looked up through.
    pub fn resolver(&self) -> &P {
        &self.resolver
    }

    /// The publish strategy.
    pub fn strategy(&self) -> &D {
        &self.strategy
    }

    /// Send a request to its handler, with a token that is never cancelled.
    pub async fn send<R: Request>(&self, request: R) -> Result<Outcome<R::Output>, DispatchError> {
        self.send_with(request, &CancellationToken::new()).await
    }

    /// Send a request to its handler.
    ///
    /// `cancel` is handed unchanged to every behavior and to the handler;
    /// honoring it is up to them.
    ///
    /// # Errors
    ///
    /// [`DispatchError::HandlerNotFound`] when no handler is registered for
    /// `R`. Business failures are never errors: they come back as a failed
    /// [`Outcome`].
    pub async fn send_with<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<Outcome<R::Output>, DispatchError> {
        let Some(handler) = self.resolver.resolve_handler::<R>() else {
            #[cfg(feature = "tracing")]
            tracing::error!(request = type_name::<R>(), "No handler registered for request");
            return Err(DispatchError::HandlerNotFound {
                request: type_name::<R>(),
            });
        };
        let behaviors = self.resolver.resolve_behaviors::<R>();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            request = type_name::<R>(),
            handler = handler.handler_name(),
            behaviors = behaviors.len(),
            "Dispatching request"
        );

        Ok(Chain::new(behaviors, handler).invoke(&request, cancel).await)
    }

    /// Publish a notification, with a token that is never cancelled.
    pub async fn publish<N: Notification>(&self, notification: &N) -> Result<(), PublishError> {
        self.publish_with(notification, &CancellationToken::new()).await
    }

    /// Publish a notification to every handler registered for `N`.
    ///
    /// Completes once every handler has completed. Having no handler is not
    /// an error.
    ///
    /// # Errors
    ///
    /// [`PublishError`] listing every handler that returned an error or
    /// panicked. The other handlers still ran to completion.
    pub async fn publish_with<N: Notification>(
        &self,
        notification: &N,
        cancel: &CancellationToken,
    ) -> Result<(), PublishError> {
        let handlers = self.resolver.resolve_notification_handlers::<N>();
        if handlers.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::trace!(notification = type_name::<N>(), "No handlers for notification");
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            notification = type_name::<N>(),
            handlers = handlers.len(),
            "Publishing notification"
        );

        let failures = self.strategy.deliver(notification, handlers, cancel).await;
        if failures.is_empty() {
            return Ok(());
        }

        let error = PublishError {
            notification: type_name::<N>(),
            total: handlers.len(),
            failures,
        };
        #[cfg(feature = "tracing")]
        for failure in &error.failures {
            tracing::error!(
                notification = error.notification,
                handler = failure.handler,
                index = failure.index,
                error = %failure.error,
                "Notification handler failed"
            );
        }
        Err(error)
    }
}
