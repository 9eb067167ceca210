//! The resolver seam.
//!
//! A [`Resolver`] maps message types to what is registered for them. The
//! mediator only reads from it; how entries get there (builders, scanning,
//! plugin loading) is the resolver's business.

use crate::{
    behavior::DynBehavior,
    handler::{DynNotificationHandler, DynRequestHandler},
    message::{Notification, Request},
};
use std::sync::Arc;

/// A source of handlers and behaviors, keyed by message type.
///
/// Implementations must return behaviors in a stable order: the same
/// configuration yields the same sequence on every call.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Resolver",
    label = "missing `Resolver` implementation",
    note = "Implement `Resolver` to let the mediator look up handlers and behaviors."
)]
pub trait Resolver: Send + Sync {
    /// The one handler registered for `R`, if any.
    fn resolve_handler<R: Request>(&self) -> Option<&dyn DynRequestHandler<R>>;

    /// Behaviors registered for `R`, in registration order.
    fn resolve_behaviors<R: Request>(&self) -> &[Arc<dyn DynBehavior<R>>];

    /// Every handler registered for exactly `N`.
    fn resolve_notification_handlers<N: Notification>(
        &self,
    ) -> &[Arc<dyn DynNotificationHandler<N>>];
}

impl<P: Resolver> Resolver for Arc<P> {
    fn resolve_handler<R: Request>(&self) -> Option<&dyn DynRequestHandler<R>> {
        (**self).resolve_handler::<R>()
    }

    fn resolve_behaviors<R: Request>(&self) -> &[Arc<dyn DynBehavior<R>>] {
        (**self).resolve_behaviors::<R>()
    }

    fn resolve_notification_handlers<N: Notification>(
        &self,
    ) -> &[Arc<dyn DynNotificationHandler<N>>] {
        (**self).resolve_notification_handlers::<N>()
    }
}

impl<P: Resolver> Resolver for &P {
    fn resolve_handler<R: Request>(&self) -> Option<&dyn DynRequestHandler<R>> {
        (**self).resolve_handler::<R>()
    }

    fn resolve_behaviors<R: Request>(&self) -> &[Arc<dyn DynBehavior<R>>] {
        (**self).resolve_behaviors::<R>()
    }

    fn resolve_notification_handlers<N: Notification>(
        &self,
    ) -> &[Arc<dyn DynNotificationHandler<N>>] {
        (**self).resolve_notification_handlers::<N>()
    }
}
