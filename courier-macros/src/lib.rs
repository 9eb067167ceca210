//! Derive macros for Courier.
//!
//! - `#[derive(Message)]` - marks a type as a message
//! - `#[derive(Request)]` - a request, with `#[request(output = T)]` naming the response type
//! - `#[derive(Command)]` - a state-changing request, with `#[command(output = T)]`
//! - `#[derive(Query)]` - a read-only request, with `#[query(output = T)]`
//! - `#[derive(Notification)]` - a notification
//!
//! Every derive but `Message` also implements `Message` (and the request
//! derives `Request`), so a type only derives one of them.

use proc_macro::TokenStream;

mod message;

/// Derive macro for implementing the `Message` trait.
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    message::derive_message_impl(input)
}

/// Derive macro for implementing `Request` (and `Message`).
///
/// ```ignore
/// #[derive(Debug, Request)]
/// #[request(output = UserId)]
/// struct CreateUser {
///     name: String,
/// }
/// ```
///
/// Without the attribute the output is `()`.
#[proc_macro_derive(Request, attributes(request))]
pub fn derive_request(input: TokenStream) -> TokenStream {
    message::derive_request_impl(input)
}

/// Derive macro for implementing `Command` (with `Request` and `Message`).
///
/// ```ignore
/// #[derive(Debug, Command)]
/// #[command(output = UserId)]
/// struct CreateUser {
///     name: String,
/// }
/// ```
#[proc_macro_derive(Command, attributes(command))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    message::derive_command_impl(input)
}

/// Derive macro for implementing `Query` (with `Request` and `Message`).
#[proc_macro_derive(Query, attributes(query))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    message::derive_query_impl(input)
}

/// Derive macro for implementing `Notification` (and `Message`).
#[proc_macro_derive(Notification)]
pub fn derive_notification(input: TokenStream) -> TokenStream {
    message::derive_notification_impl(input)
}
