//! # courier-std
//!
//! Standard implementations for the Courier in-process mediator.
//!
//! This crate provides:
//! - **Dynamic resolution**: [`registry::Registry`] built by [`registry::RegistryBuilder`]
//! - **Static pipelines**: [`static_dispatch::HCons`], [`static_dispatch::HNil`],
//!   [`static_dispatch::StaticPipeline`], [`behaviors!`] macro
//! - **Standard behaviors**: Logging, Tracing, Timeout, Validation
//! - **Closure adapters**: [`handlers::handler_fn`], [`handlers::notification_fn`]
//! - **Testing utilities**: recording behaviors and handlers in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

// Modules
pub mod behaviors;
pub mod handlers;
pub mod registry;
pub mod static_dispatch;
pub mod testing;
