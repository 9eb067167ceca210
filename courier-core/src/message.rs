//! Message contracts.
//!
//! Every value that crosses the mediator is a [`Message`]. Two refinements
//! decide how it is routed:
//!
//! - [`Request`]: routed to exactly one handler, answered with an
//!   [`Outcome`](crate::Outcome) of its declared output type.
//! - [`Notification`]: broadcast to zero or more handlers, no answer.
//!
//! Requests further split into [`Command`]s, which change state, and
//! [`Query`]s, which only read it. Both route exactly like any request; the
//! markers exist so behaviors can be scoped to one side.

/// A marker trait for values that can travel through the mediator.
///
/// Messages must be `Send + Sync + 'static` to be safe for async use.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone)]
/// struct UserRegistered { email: String }
///
/// impl Message for UserRegistered {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Everything sent or published through Courier must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl Message for () {}
impl Message for String {}
impl Message for &'static str {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}

/// A message that expects exactly one handler and one typed answer.
///
/// The answer to a request is always an `Outcome<Self::Output>`. Commands
/// without a payload use `Output = ()`.
///
/// # Example
///
/// ```rust,ignore
/// struct GetUser { id: u64 }
///
/// impl Message for GetUser {}
/// impl Request for GetUser {
///     type Output = User;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Request",
    label = "missing `Request` implementation",
    note = "Implement `Request` and name the `Output` type the handler produces."
)]
pub trait Request: Message {
    /// The value carried by a successful outcome.
    type Output: Send + 'static;
}

/// A request that changes state or triggers side effects.
///
/// Bound a behavior on `R: Command` to apply it to commands only, for
/// instance a unit of work that commits after the handler succeeds.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Command)]
/// #[command(output = u64)]
/// struct CreateUser { name: String }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Command",
    label = "missing `Command` implementation",
    note = "Implement `Command` (or derive it with `#[command(output = T)]`)."
)]
pub trait Command: Request {}

/// A read-only request.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Query",
    label = "missing `Query` implementation",
    note = "Implement `Query` (or derive it with `#[query(output = T)]`)."
)]
pub trait Query: Request {}

/// A message broadcast to every handler registered for its exact type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Notification",
    label = "missing `Notification` implementation",
    note = "Implement `Notification` (or derive it) to publish `{Self}`."
)]
pub trait Notification: Message {}

impl<N: Notification> Notification for std::sync::Arc<N> {}
