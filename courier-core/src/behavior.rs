//! # Pipeline behaviors
//!
//! A [`Behavior`] wraps the handling of a request. It receives the request
//! and a [`Next`] continuation, and either
//!
//! - calls [`Next::run`] to continue with the rest of the chain (possibly
//!   doing work before and after), or
//! - returns an [`Outcome`] of its own without calling `next`, which
//!   short-circuits every inner behavior and the handler.
//!
//! # Chain order
//!
//! For behaviors registered as `B1, B2` around handler `H`, execution is
//! `B1 -> B2 -> H`: the first registered behavior is the outermost wrapper.
//!
//! A `Next` is a borrowed view over the remaining chain. It doesn't
//! allocate beyond the boxed future of each link and is consumed by `run`,
//! so a behavior can continue the chain at most once.

use crate::{
    BoxFuture, CancellationToken,
    handler::DynRequestHandler,
    message::Request,
    outcome::Outcome,
};
use std::{future::Future, sync::Arc};

/// Middleware around the handling of requests of type `R`.
///
/// # Example
///
/// ```rust,ignore
/// struct Audit;
///
/// impl<R: Request + Debug> Behavior<R> for Audit {
///     async fn handle(&self, request: &R, _cancel: &CancellationToken, next: Next<'_, R>) -> Outcome<R::Output> {
///         println!("before {request:?}");
///         let outcome = next.run().await;
///         println!("after");
///         outcome
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Behavior` for requests of type `{R}`",
    label = "missing `Behavior<{R}>` implementation",
    note = "Behaviors must implement `handle` and either call `next.run()` or return their own outcome."
)]
pub trait Behavior<R: Request>: Send + Sync + 'static {
    /// Intercept the request.
    fn handle(
        &self,
        request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> impl Future<Output = Outcome<R::Output>> + Send;
}

/// Object-safe version of [`Behavior`].
pub trait DynBehavior<R: Request>: Send + Sync + 'static {
    /// Intercept the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
        next: Next<'a, R>,
    ) -> BoxFuture<'a, Outcome<R::Output>>;

    /// Type name of the concrete behavior, for diagnostics.
    fn behavior_name(&self) -> &'static str;
}

impl<R: Request, T: Behavior<R>> DynBehavior<R> for T {
    fn handle_dyn<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
        next: Next<'a, R>,
    ) -> BoxFuture<'a, Outcome<R::Output>> {
        Box::pin(self.handle(request, cancel, next))
    }

    fn behavior_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// One step of a behavior chain, as seen from the behavior before it.
///
/// Implemented by the dynamic chain below and by the static chains of
/// `courier-std`.
pub trait Link<R: Request>: Send + Sync {
    /// Run this step and everything after it.
    fn call<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>>;
}

/// The continuation handed to a [`Behavior`].
#[must_use = "dropping `Next` without calling `run` short-circuits the pipeline"]
pub struct Next<'a, R: Request> {
    link: &'a dyn Link<R>,
    request: &'a R,
    cancel: &'a CancellationToken,
}

impl<'a, R: Request> Next<'a, R> {
    /// Wrap the remaining chain.
    pub fn new(link: &'a dyn Link<R>, request: &'a R, cancel: &'a CancellationToken) -> Self {
        Self {
            link,
            request,
            cancel,
        }
    }

    /// Continue with the rest of the chain.
    pub fn run(self) -> BoxFuture<'a, Outcome<R::Output>> {
        self.link.call(self.request, self.cancel)
    }

    /// Continue with the rest of the chain under a different token.
    ///
    /// Used by behaviors that narrow cancellation for the inner chain, for
    /// instance with a child of the token they were given.
    pub fn run_with<'b>(self, cancel: &'b CancellationToken) -> BoxFuture<'b, Outcome<R::Output>>
    where
        'a: 'b,
    {
        self.link.call(self.request, cancel)
    }

    /// The token the chain was started with.
    pub fn cancel_token(&self) -> &'a CancellationToken {
        self.cancel
    }

    /// The request travelling through the chain.
    pub fn request(&self) -> &'a R {
        self.request
    }
}

/// A chain over behaviors held as trait objects, ending in a handler.
///
/// This is what the mediator builds from the behaviors a resolver returns.
pub struct Chain<'a, R: Request> {
    behaviors: &'a [Arc<dyn DynBehavior<R>>],
    handler: &'a dyn DynRequestHandler<R>,
}

impl<'a, R: Request> Chain<'a, R> {
    /// Chain `behaviors`, in order, around `handler`.
    pub fn new(
        behaviors: &'a [Arc<dyn DynBehavior<R>>],
        handler: &'a dyn DynRequestHandler<R>,
    ) -> Self {
        Self { behaviors, handler }
    }

    /// Number of behaviors still ahead of the handler.
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Whether only the handler is left.
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Run the whole chain.
    pub fn invoke(
        self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>> {
        match self.behaviors.split_first() {
            None => self.handler.handle_dyn(request, cancel),
            Some((outer, rest)) => Box::pin(async move {
                let rest = Chain::new(rest, self.handler);
                outer
                    .handle_dyn(request, cancel, Next::new(&rest, request, cancel))
                    .await
            }),
        }
    }
}

impl<R: Request> Clone for Chain<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Request> Copy for Chain<'_, R> {}

impl<R: Request> Link<R> for Chain<'_, R> {
    fn call<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>> {
        Chain::new(self.behaviors, self.handler).invoke(request, cancel)
    }
}
