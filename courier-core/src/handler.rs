//! # Handlers
//!
//! The terminal endpoints of the mediator.
//!
//! - [`RequestHandler`] answers one request type with an [`Outcome`].
//! - [`NotificationHandler`] reacts to one notification type.
//!
//! [`CommandHandler`] and [`QueryHandler`] name the request handlers of
//! commands and queries. They are implemented for every matching
//! [`RequestHandler`] and never need an impl of their own.
//!
//! Both traits use native `async fn` for static dispatch. Resolvers that
//! store handlers as trait objects use the object-safe twins
//! [`DynRequestHandler`] and [`DynNotificationHandler`], implemented for
//! every handler by a blanket impl.
//!
//! Cancellation is cooperative: the token is handed to the handler, which
//! decides whether and when to observe it.

use crate::{
    BoxFuture, CancellationToken,
    error::BoxError,
    message::{Command, Notification, Query, Request},
    outcome::Outcome,
};
use std::{future::Future, sync::Arc};

/// The single handler of a request type.
///
/// # Example
///
/// ```rust,ignore
/// struct GetUserHandler { users: UserStore }
///
/// impl RequestHandler<GetUser> for GetUserHandler {
///     async fn handle(&self, request: &GetUser, _cancel: &CancellationToken) -> Outcome<User> {
///         Outcome::create(self.users.find(request.id))
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests of type `{R}`",
    label = "missing `RequestHandler<{R}>` implementation",
    note = "Request handlers must implement `handle` for the request type `{R}`."
)]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    /// Process the request.
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Outcome<R::Output>> + Send;
}

/// The handler of a [`Command`].
///
/// Use it as a bound where only command handlers are accepted.
pub trait CommandHandler<C: Command>: RequestHandler<C> {}

impl<C: Command, T: RequestHandler<C>> CommandHandler<C> for T {}

/// The handler of a [`Query`].
pub trait QueryHandler<Q: Query>: RequestHandler<Q> {}

impl<Q: Query, T: RequestHandler<Q>> QueryHandler<Q> for T {}

/// Object-safe version of [`RequestHandler`].
pub trait DynRequestHandler<R: Request>: Send + Sync + 'static {
    /// Process the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>>;

    /// Type name of the concrete handler, for diagnostics.
    fn handler_name(&self) -> &'static str;
}

impl<R: Request, T: RequestHandler<R>> DynRequestHandler<R> for T {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>> {
        Box::pin(self.handle(request, cancel))
    }

    fn handler_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<R: Request> RequestHandler<R> for Arc<dyn DynRequestHandler<R>> {
    async fn handle(&self, request: &R, cancel: &CancellationToken) -> Outcome<R::Output> {
        self.handle_dyn(request, cancel).await
    }
}

/// A handler reacting to a notification.
///
/// An `Err` is an unrecoverable failure of this handler; it is reported to
/// the publisher once every sibling handler has finished.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle notifications of type `{N}`",
    label = "missing `NotificationHandler<{N}>` implementation",
    note = "Notification handlers must implement `handle` for the notification type `{N}`."
)]
pub trait NotificationHandler<N: Notification>: Send + Sync + 'static {
    /// React to the notification.
    fn handle(
        &self,
        notification: &N,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Object-safe version of [`NotificationHandler`].
pub trait DynNotificationHandler<N: Notification>: Send + Sync + 'static {
    /// React to the notification (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>>;

    /// Type name of the concrete handler, for diagnostics.
    fn handler_name(&self) -> &'static str;
}

impl<N: Notification, T: NotificationHandler<N>> DynNotificationHandler<N> for T {
    fn handle_dyn<'a>(
        &'a self,
        notification: &'a N,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(self.handle(notification, cancel))
    }

    fn handler_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<N: Notification> NotificationHandler<N> for Arc<dyn DynNotificationHandler<N>> {
    async fn handle(&self, notification: &N, cancel: &CancellationToken) -> Result<(), BoxError> {
        self.handle_dyn(notification, cancel).await
    }
}
