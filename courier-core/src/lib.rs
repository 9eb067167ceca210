//! # courier-core
//!
//! Core contracts for the Courier in-process mediator.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that defines requests, handlers or behaviors without needing the
//! standard registry or the mediator itself.
//!
//! # Two channels
//!
//! ## Requests
//!
//! A [`Request`] is routed to exactly one [`RequestHandler`]. Zero or more
//! [`Behavior`]s wrap that call, in registration order, each deciding
//! whether to continue through [`Next`] or to answer on its own.
//!
//! ## Notifications
//!
//! A [`Notification`] fans out to every [`NotificationHandler`] registered
//! for its type. There is no answer and no behavior chain.
//!
//! [`Command`] and [`Query`] mark the two kinds of request, so that a
//! behavior can be bounded to one of them.
//!
//! # Two kinds of failure
//!
//! - **Business failures** are values: every request handler returns an
//!   [`Outcome`], whose failure side carries a structured [`Error`] with an
//!   [`ErrorKind`]. Several validation failures aggregate into a
//!   [`ValidationError`].
//! - **Wiring and programming errors** are not outcomes: an unrouted request
//!   is a [`DispatchError`], a failing notification handler surfaces in a
//!   [`PublishError`], and misuse of an outcome panics (or, through the
//!   `try_*` methods, returns an [`OutcomeError`]).
//!
//! # The resolver seam
//!
//! The mediator looks everything up through a [`Resolver`]. `courier-std`
//! provides a typed registry; tests can supply their own.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod error;
mod failure;
mod handler;
mod message;
mod outcome;
mod resolver;

use std::{future::Future, pin::Pin};

pub use tokio_util::sync::CancellationToken;

/// An owned, boxed, `Send` future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

// Re-exports
pub use behavior::{Behavior, Chain, DynBehavior, Link, Next};
pub use error::{
    BoxError, DispatchError, HandlerError, HandlerFailure, OutcomeError, PublishError,
    RegistryError,
};
pub use failure::{Error, ErrorKind, ValidationError};
pub use handler::{
    CommandHandler, DynNotificationHandler, DynRequestHandler, NotificationHandler,
    QueryHandler, RequestHandler,
};
pub use message::{Command, Message, Notification, Query, Request};
pub use outcome::{AsFailure, Outcome, OutcomeRef};
pub use resolver::Resolver;
