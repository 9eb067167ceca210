//! Typed registry of handlers and behaviors.
//!
//! Entries are keyed by the `TypeId` of the message, so resolution is a
//! single map lookup followed by a downcast that cannot fail for a
//! well-formed registry.
//!
//! Use [`RegistryBuilder`] to register everything, then call `.build()` to
//! freeze an immutable, thread-safe [`Registry`].

use courier_core::{
    Behavior, DynBehavior, DynNotificationHandler, DynRequestHandler, Notification,
    NotificationHandler, RegistryError, Request, RequestHandler, Resolver,
};
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    sync::Arc,
};

type AnyEntry = Box<dyn Any + Send + Sync>;

struct RequestEntry<R: Request> {
    handler: Option<Arc<dyn DynRequestHandler<R>>>,
    behaviors: Vec<Arc<dyn DynBehavior<R>>>,
}

impl<R: Request> Default for RequestEntry<R> {
    fn default() -> Self {
        Self {
            handler: None,
            behaviors: Vec::new(),
        }
    }
}

struct NotificationEntry<N: Notification> {
    handlers: Vec<Arc<dyn DynNotificationHandler<N>>>,
}

/// Bookkeeping that doesn't need the request type.
#[derive(Debug, Clone, Copy)]
struct RequestMeta {
    name: &'static str,
    has_handler: bool,
}

// ============================================================================
// RegistryBuilder - for constructing registries
// ============================================================================

/// Builder for constructing a [`Registry`].
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .handler::<CreateUser, _>(CreateUserHandler::new(store))
///     .behavior::<CreateUser, _>(LoggingBehavior::new())
///     .behavior::<CreateUser, _>(ValidationBehavior)
///     .notification_handler::<UserCreated, _>(SendWelcomeMail)
///     .build()?;
/// ```
pub struct RegistryBuilder {
    requests: HashMap<TypeId, AnyEntry>,
    meta: HashMap<TypeId, RequestMeta>,
    notifications: HashMap<TypeId, AnyEntry>,
    errors: Vec<RegistryError>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            requests: HashMap::new(),
            meta: HashMap::new(),
            notifications: HashMap::new(),
            errors: Vec::new(),
        }
    }

    fn request_entry<R: Request>(&mut self) -> &mut RequestEntry<R> {
        let key = TypeId::of::<R>();
        self.meta.entry(key).or_insert(RequestMeta {
            name: type_name::<R>(),
            has_handler: false,
        });
        self.requests
            .entry(key)
            .or_insert_with(|| Box::new(RequestEntry::<R>::default()))
            .downcast_mut::<RequestEntry<R>>()
            .unwrap_or_else(|| unreachable!("request entry stored under a foreign TypeId"))
    }

    /// Register the handler of `R`.
    ///
    /// A second handler for the same request type is recorded as
    /// [`RegistryError::DuplicateHandler`] and reported by `build()`.
    pub fn handler<R: Request, H: RequestHandler<R>>(mut self, handler: H) -> Self {
        self.handler_mut::<R, H>(handler);
        self
    }

    /// Register the handler of `R` (mutable version).
    pub fn handler_mut<R: Request, H: RequestHandler<R>>(&mut self, handler: H) {
        self.shared_handler_mut::<R>(Arc::new(handler));
    }

    /// Register an already shared handler of `R`.
    pub fn shared_handler_mut<R: Request>(&mut self, handler: Arc<dyn DynRequestHandler<R>>) {
        let entry = self.request_entry::<R>();
        if entry.handler.is_some() {
            self.errors.push(RegistryError::DuplicateHandler {
                request: type_name::<R>(),
            });
            return;
        }
        entry.handler = Some(handler);
        if let Some(meta) = self.meta.get_mut(&TypeId::of::<R>()) {
            meta.has_handler = true;
        }
    }

    /// Append a behavior to the pipeline of `R`.
    ///
    /// Behaviors run in the order they are registered.
    pub fn behavior<R: Request, B: Behavior<R>>(mut self, behavior: B) -> Self {
        self.behavior_mut::<R, B>(behavior);
        self
    }

    /// Append a behavior to the pipeline of `R` (mutable version).
    pub fn behavior_mut<R: Request, B: Behavior<R>>(&mut self, behavior: B) {
        self.shared_behavior_mut::<R>(Arc::new(behavior));
    }

    /// Append an already shared behavior to the pipeline of `R`.
    pub fn shared_behavior_mut<R: Request>(&mut self, behavior: Arc<dyn DynBehavior<R>>) {
        self.request_entry::<R>().behaviors.push(behavior);
    }

    /// Add a handler for notifications of type `N`.
    pub fn notification_handler<N: Notification, H: NotificationHandler<N>>(
        mut self,
        handler: H,
    ) -> Self {
        self.notification_handler_mut::<N, H>(handler);
        self
    }

    /// Add a handler for notifications of type `N` (mutable version).
    pub fn notification_handler_mut<N: Notification, H: NotificationHandler<N>>(
        &mut self,
        handler: H,
    ) {
        self.shared_notification_handler_mut::<N>(Arc::new(handler));
    }

    /// Add an already shared handler for notifications of type `N`.
    pub fn shared_notification_handler_mut<N: Notification>(
        &mut self,
        handler: Arc<dyn DynNotificationHandler<N>>,
    ) {
        self.notifications
            .entry(TypeId::of::<N>())
            .or_insert_with(|| {
                Box::new(NotificationEntry::<N> {
                    handlers: Vec::new(),
                })
            })
            .downcast_mut::<NotificationEntry<N>>()
            .unwrap_or_else(|| unreachable!("notification entry stored under a foreign TypeId"))
            .handlers
            .push(handler);
    }

    /// Number of request types with a registered handler.
    pub fn request_count(&self) -> usize {
        self.meta.values().filter(|m| m.has_handler).count()
    }

    /// Number of notification types with at least one handler.
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    /// Freeze the registry.
    ///
    /// Fails with the first configuration error recorded: a duplicate
    /// handler, or behaviors registered for a request that never got a
    /// handler.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        let mut orphans: Vec<_> = self.meta.values().filter(|m| !m.has_handler).collect();
        orphans.sort_by_key(|m| m.name);
        if let Some(orphan) = orphans.first() {
            return Err(RegistryError::OrphanBehavior {
                request: orphan.name,
            });
        }

        Ok(Registry {
            requests: self.requests,
            notifications: self.notifications,
        })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Registry - immutable, thread-safe storage
// ============================================================================

/// An immutable, thread-safe registry of handlers and behaviors.
///
/// Created by [`RegistryBuilder::build`]. Share it across tasks with an
/// `Arc`; resolution only takes `&self`.
pub struct Registry {
    requests: HashMap<TypeId, AnyEntry>,
    notifications: HashMap<TypeId, AnyEntry>,
}

impl Registry {
    /// Start a new builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn request_entry<R: Request>(&self) -> Option<&RequestEntry<R>> {
        self.requests
            .get(&TypeId::of::<R>())
            .and_then(|entry| entry.downcast_ref::<RequestEntry<R>>())
    }

    /// Whether a handler is registered for `R`.
    pub fn handles<R: Request>(&self) -> bool {
        self.request_entry::<R>()
            .is_some_and(|entry| entry.handler.is_some())
    }

    /// Number of request types with a handler.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Number of notification types with at least one handler.
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }
}

impl Resolver for Registry {
    fn resolve_handler<R: Request>(&self) -> Option<&dyn DynRequestHandler<R>> {
        self.request_entry::<R>()?.handler.as_deref()
    }

    fn resolve_behaviors<R: Request>(&self) -> &[Arc<dyn DynBehavior<R>>] {
        self.request_entry::<R>()
            .map(|entry| entry.behaviors.as_slice())
            .unwrap_or(&[])
    }

    fn resolve_notification_handlers<N: Notification>(
        &self,
    ) -> &[Arc<dyn DynNotificationHandler<N>>] {
        self.notifications
            .get(&TypeId::of::<N>())
            .and_then(|entry| entry.downcast_ref::<NotificationEntry<N>>())
            .map(|entry| entry.handlers.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{BoxError, CancellationToken, Message, Next, Outcome};

    #[derive(Debug)]
    struct Add(i32, i32);
    impl Message for Add {}
    impl Request for Add {
        type Output = i32;
    }

    #[derive(Debug)]
    struct Negate(i32);
    impl Message for Negate {}
    impl Request for Negate {
        type Output = i32;
    }

    #[derive(Debug, Clone)]
    struct Added;
    impl Message for Added {}
    impl Notification for Added {}

    struct AddHandler;
    impl RequestHandler<Add> for AddHandler {
        async fn handle(&self, request: &Add, _cancel: &CancellationToken) -> Outcome<i32> {
            Outcome::success(request.0 + request.1)
        }
    }

    struct Passthrough;
    impl Behavior<Add> for Passthrough {
        async fn handle(
            &self,
            _request: &Add,
            _cancel: &CancellationToken,
            next: Next<'_, Add>,
        ) -> Outcome<i32> {
            next.run().await
        }
    }

    struct Noop;
    impl NotificationHandler<Added> for Noop {
        async fn handle(&self, _n: &Added, _cancel: &CancellationToken) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn resolves_registered_handler() {
        let registry = RegistryBuilder::new()
            .handler::<Add, _>(AddHandler)
            .build()
            .unwrap();

        let handler = registry.resolve_handler::<Add>().expect("handler registered");
        let outcome = handler.handle_dyn(&Add(2, 3), &CancellationToken::new()).await;

        assert_eq!(outcome, Outcome::success(5));
        assert!(registry.handles::<Add>());
        assert!(!registry.handles::<Negate>());
    }

    #[test]
    fn builder_shortcut_starts_empty() {
        let registry = Registry::builder().handler::<Add, _>(AddHandler).build().unwrap();

        assert!(registry.handles::<Add>());
        assert_eq!(registry.request_count(), 1);
        assert_eq!(registry.notification_count(), 0);
    }

    #[test]
    fn unknown_types_resolve_to_nothing() {
        let registry = RegistryBuilder::new().build().unwrap();

        assert!(registry.resolve_handler::<Add>().is_none());
        assert!(registry.resolve_behaviors::<Add>().is_empty());
        assert!(registry.resolve_notification_handlers::<Added>().is_empty());
    }

    #[test]
    fn keeps_behaviors_and_handlers_in_registration_order() {
        let registry = RegistryBuilder::new()
            .behavior::<Add, _>(Passthrough)
            .handler::<Add, _>(AddHandler)
            .behavior::<Add, _>(Passthrough)
            .notification_handler::<Added, _>(Noop)
            .notification_handler::<Added, _>(Noop)
            .build()
            .unwrap();

        assert_eq!(registry.resolve_behaviors::<Add>().len(), 2);
        assert_eq!(registry.resolve_notification_handlers::<Added>().len(), 2);
        assert!(registry.resolve_behaviors::<Negate>().is_empty());
    }

    #[test]
    fn rejects_duplicate_handlers() {
        let result = RegistryBuilder::new()
            .handler::<Add, _>(AddHandler)
            .handler::<Add, _>(AddHandler)
            .build();

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateHandler { request }) if request.ends_with("Add")
        ));
    }

    #[test]
    fn rejects_behaviors_without_handler() {
        let result = RegistryBuilder::new().behavior::<Add, _>(Passthrough).build();

        assert!(matches!(result, Err(RegistryError::OrphanBehavior { .. })));
    }

    #[test]
    fn counts_registrations() {
        let mut builder = RegistryBuilder::new();
        builder.handler_mut::<Add, _>(AddHandler);
        builder.notification_handler_mut::<Added, _>(Noop);
        assert_eq!(builder.request_count(), 1);
        assert_eq!(builder.notification_count(), 1);

        let registry = builder.build().unwrap();
        assert_eq!(registry.request_count(), 1);
        assert_eq!(registry.notification_count(), 1);
    }
}
