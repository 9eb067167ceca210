//! Error types for Courier.
//!
//! These are the *fatal* errors: wiring bugs and programming errors that are
//! never represented as a business [`Outcome`](crate::Outcome).
//!
//! - [`DispatchError`] - a request could not be routed
//! - [`PublishError`] - one or more notification handlers failed
//! - [`HandlerError`] - the failure of a single notification handler
//! - [`OutcomeError`] - an outcome was built or read illegally
//! - [`RegistryError`] - a registry was configured inconsistently

use crate::failure::Error;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that prevent a request from reaching a handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No handler is registered for the request type.
    #[error("no handler registered for request `{request}`")]
    HandlerNotFound {
        /// Type name of the request.
        request: &'static str,
    },
}

/// The failure of one notification handler.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler returned an error.
    #[error(transparent)]
    Failed(BoxError),

    /// The handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        HandlerError::Failed(err)
    }
}

/// One failed handler within a publish call.
#[derive(Error, Debug)]
#[error("handler #{index} (`{handler}`) failed: {error}")]
pub struct HandlerFailure {
    /// Position of the handler in resolution order.
    pub index: usize,
    /// Type name of the handler.
    pub handler: &'static str,
    /// What went wrong.
    #[source]
    pub error: HandlerError,
}

/// Every handler of a notification ran; at least one of them failed.
#[derive(Error, Debug)]
#[error("{} of {total} handlers failed for notification `{notification}`", .failures.len())]
pub struct PublishError {
    /// Type name of the notification.
    pub notification: &'static str,
    /// Number of handlers that were invoked.
    pub total: usize,
    /// The failed handlers, in resolution order.
    pub failures: Vec<HandlerFailure>,
}

impl PublishError {
    /// The first failure in resolution order.
    pub fn first(&self) -> Option<&HandlerFailure> {
        self.failures.first()
    }
}

/// Illegal construction or access of an [`Outcome`](crate::Outcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// A success was built with a real error attached.
    #[error("a success outcome cannot carry an error ({0})")]
    SuccessWithError(Error),

    /// A failure was built from the "no error" value.
    #[error("a failure outcome requires an error other than `Error::NONE`")]
    FailureWithoutError,

    /// A success was built without a value.
    #[error("a success outcome requires a value")]
    SuccessWithoutValue,

    /// The value of a failure was read.
    #[error("the value of a failure outcome cannot be accessed ({0})")]
    ValueOfFailure(Error),
}

/// Errors raised while building a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A second handler was registered for the same request type.
    #[error("a handler is already registered for request `{request}`")]
    DuplicateHandler {
        /// Type name of the request.
        request: &'static str,
    },

    /// A behavior was registered for a request that has no handler.
    #[error("behavior registered for request `{request}` which has no handler")]
    OrphanBehavior {
        /// Type name of the request.
        request: &'static str,
    },
}
