//! # courier - In-Process Mediator
//!
//! `courier` decouples the code that asks for something from the code that
//! does it. Callers talk to a [`Mediator`]; handlers and behaviors are found
//! through a [`Resolver`], typically a [`Registry`].
//!
//! - **Requests** go to exactly one handler, through an ordered chain of
//!   [`Behavior`]s, and answer with an [`Outcome`].
//! - **Notifications** go to every handler registered for their type.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Request)]
//! #[request(output = u64)]
//! struct CreateUser { name: String }
//!
//! struct CreateUserHandler;
//! impl RequestHandler<CreateUser> for CreateUserHandler {
//!     async fn handle(&self, req: &CreateUser, _cancel: &CancellationToken) -> Outcome<u64> {
//!         if req.name.is_empty() {
//!             return Outcome::failure(Error::validation("User.Name", "name is required"));
//!         }
//!         Outcome::success(1)
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .handler::<CreateUser, _>(CreateUserHandler)
//!     .behavior::<CreateUser, _>(LoggingBehavior::new())
//!     .build()?;
//! let mediator = Mediator::new(registry);
//!
//! let outcome = mediator.send(CreateUser { name: "ada".into() }).await?;
//! assert!(outcome.is_success());
//! ```
//!
//! ## Static pipelines
//!
//! When the behaviors of a request are known at compile time, wrap its
//! handler in a [`StaticPipeline`] built with [`behaviors!`] and register the
//! pipeline as the handler.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod mediator;
pub mod publish;

pub use mediator::Mediator;

pub use courier_core::{
    // Message
    Command,
    Message,
    Notification,
    Query,
    Request,
    // Handlers
    CommandHandler,
    DynNotificationHandler,
    DynRequestHandler,
    NotificationHandler,
    QueryHandler,
    RequestHandler,
    // Pipeline
    Behavior,
    BoxFuture,
    Chain,
    DynBehavior,
    Link,
    Next,
    // Outcome
    AsFailure,
    Error,
    ErrorKind,
    Outcome,
    OutcomeRef,
    ValidationError,
    // Errors
    BoxError,
    DispatchError,
    HandlerError,
    HandlerFailure,
    OutcomeError,
    PublishError,
    RegistryError,
    // Resolution
    Resolver,
    // Cancellation
    CancellationToken,
};

// Static Pipelines and standard behaviors (`behaviors` names both the
// module and the chain macro)
pub use courier_std::{
    behaviors,
    static_dispatch::{BehaviorChain, HCons, HListLen, HNil, StaticChainBuilder, StaticPipeline},
};

// Dynamic Resolution
pub use courier_std::registry::{Registry, RegistryBuilder};

pub use publish::{ConcurrentPublish, PublishStrategy, SequentialPublish};

/// Closure adapters.
pub mod handlers {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::handlers::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core traits
        Behavior,
        Command,
        Message,
        Next,
        Notification,
        NotificationHandler,
        Query,
        Request,
        RequestHandler,
        // Outcome
        Error,
        ErrorKind,
        Outcome,
        OutcomeRef,
        ValidationError,
        // Errors
        BoxError,
        DispatchError,
        PublishError,
        // Dispatch
        CancellationToken,
        Mediator,
        Registry,
        RegistryBuilder,
        behaviors::{LoggingBehavior, Validate, ValidationBehavior},
    };
}

#[cfg(feature = "macros")]
pub use courier_macros::{Command, Message, Notification, Query, Request};
