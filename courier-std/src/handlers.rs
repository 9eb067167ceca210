//! Closure adapters.
//!
//! Turn plain functions into handlers without declaring a type:
//!
//! - [`handler_fn`]: async closure over an owned copy of the request
//! - [`sync_handler_fn`]: synchronous closure over a borrowed request
//! - [`notification_fn`]: async closure over an owned copy of the notification

use courier_core::{
    BoxError, CancellationToken, Notification, NotificationHandler, Outcome, Request,
    RequestHandler,
};
use std::{future::Future, marker::PhantomData};

/// A request handler backed by an async closure.
///
/// Created by [`handler_fn`].
pub struct FnHandler<F, R> {
    f: F,
    _marker: PhantomData<fn(R)>,
}

/// Handle `R` with an async closure.
///
/// The closure receives clones of the request and of the cancellation token,
/// so the returned future owns everything it uses.
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .handler::<Double, _>(handler_fn(|req: Double, _cancel| async move {
///         Outcome::success(req.0 * 2)
///     }))
///     .build()?;
/// ```
pub fn handler_fn<R, F, Fut>(f: F) -> FnHandler<F, R>
where
    R: Request + Clone,
    F: Fn(R, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome<R::Output>> + Send,
{
    FnHandler {
        f,
        _marker: PhantomData,
    }
}

impl<R, F, Fut> RequestHandler<R> for FnHandler<F, R>
where
    R: Request + Clone,
    F: Fn(R, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome<R::Output>> + Send,
{
    async fn handle(&self, request: &R, cancel: &CancellationToken) -> Outcome<R::Output> {
        (self.f)(request.clone(), cancel.clone()).await
    }
}

/// A request handler backed by a synchronous closure.
///
/// Created by [`sync_handler_fn`].
pub struct SyncFnHandler<F, R> {
    f: F,
    _marker: PhantomData<fn(R)>,
}

/// Handle `R` with a synchronous closure over the borrowed request.
pub fn sync_handler_fn<R, F>(f: F) -> SyncFnHandler<F, R>
where
    R: Request,
    F: Fn(&R) -> Outcome<R::Output> + Send + Sync + 'static,
{
    SyncFnHandler {
        f,
        _marker: PhantomData,
    }
}

impl<R, F> RequestHandler<R> for SyncFnHandler<F, R>
where
    R: Request,
    F: Fn(&R) -> Outcome<R::Output> + Send + Sync + 'static,
{
    async fn handle(&self, request: &R, _cancel: &CancellationToken) -> Outcome<R::Output> {
        (self.f)(request)
    }
}

/// A notification handler backed by an async closure.
///
/// Created by [`notification_fn`].
pub struct FnNotificationHandler<F, N> {
    f: F,
    _marker: PhantomData<fn(N)>,
}

/// Handle `N` with an async closure.
pub fn notification_fn<N, F, Fut>(f: F) -> FnNotificationHandler<F, N>
where
    N: Notification + Clone,
    F: Fn(N, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    FnNotificationHandler {
        f,
        _marker: PhantomData,
    }
}

impl<N, F, Fut> NotificationHandler<N> for FnNotificationHandler<F, N>
where
    N: Notification + Clone,
    F: Fn(N, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    async fn handle(&self, notification: &N, cancel: &CancellationToken) -> Result<(), BoxError> {
        (self.f)(notification.clone(), cancel.clone()).await
    }
}
