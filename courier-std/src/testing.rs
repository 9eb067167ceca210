//! Testing utilities for Courier.
//!
//! This module provides ready-made handlers and behaviors that record what
//! they see, so tests can assert on call order and counts.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of labels
//! - [`RecordingBehavior`]: A behavior that logs before and after `next`
//! - [`ShortCircuitBehavior`]: A behavior that answers without calling `next`
//! - [`CountingHandler`]: A request handler with a fixed outcome
//! - [`RecordingNotificationHandler`], [`FailingNotificationHandler`],
//!   [`PanickingNotificationHandler`]: notification handlers for fan-out tests

use courier_core::{
    Behavior, BoxError, CancellationToken, Error, Next, Notification, NotificationHandler,
    Outcome, Request, RequestHandler,
};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Call Log
// ============================================================================

/// A cloneable, thread-safe log of labels in the order they were recorded.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label.
    pub fn record(&self, label: impl Into<String>) {
        lock(&self.entries).push(label.into());
    }

    /// A snapshot of the labels recorded so far.
    pub fn entries(&self) -> Vec<String> {
        lock(&self.entries).clone()
    }

    /// Number of labels recorded.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}

// ============================================================================
// Behaviors
// ============================================================================

/// A behavior that records `"{name}:before"` and `"{name}:after"` around
/// the rest of the chain.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let registry = RegistryBuilder::new()
///     .behavior::<Ping, _>(RecordingBehavior::new("b1", log.clone()))
///     .behavior::<Ping, _>(RecordingBehavior::new("b2", log.clone()))
///     .handler::<Ping, _>(PingHandler::new(log.clone()))
///     .build()?;
/// let mediator = Mediator::new(registry);
///
/// // `PingHandler` records "handler" when it runs.
/// mediator.send(Ping).await?;
/// assert_eq!(
///     log.entries(),
///     ["b1:before", "b2:before", "handler", "b2:after", "b1:after"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RecordingBehavior {
    name: &'static str,
    log: CallLog,
}

impl RecordingBehavior {
    /// Create a recording behavior that writes to `log`.
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self { name, log }
    }
}

impl<R: Request> Behavior<R> for RecordingBehavior {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Outcome<R::Output> {
        self.log.record(format!("{}:before", self.name));
        let outcome = next.run().await;
        self.log.record(format!("{}:after", self.name));
        outcome
    }
}

/// A behavior that always fails with the same error, never calling `next`.
#[derive(Debug, Clone)]
pub struct ShortCircuitBehavior {
    error: Error,
}

impl ShortCircuitBehavior {
    /// Create a behavior that answers with `error`.
    pub fn new(error: Error) -> Self {
        Self { error }
    }
}

impl<R: Request> Behavior<R> for ShortCircuitBehavior {
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        _next: Next<'_, R>,
    ) -> Outcome<R::Output> {
        Outcome::failure(self.error.clone())
    }
}

// ============================================================================
// Request Handlers
// ============================================================================

/// A request handler that counts its calls and answers with a fixed outcome.
pub struct CountingHandler<T> {
    outcome: Outcome<T>,
    count: Arc<AtomicUsize>,
}

impl<T: Clone> CountingHandler<T> {
    /// Create a handler that always succeeds with `value`.
    pub fn new(value: T) -> Self {
        Self::with_outcome(Outcome::success(value))
    }

    /// Create a handler that always answers with `outcome`.
    pub fn with_outcome(outcome: Outcome<T>) -> Self {
        Self {
            outcome,
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times this handler was called.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the call count.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }

    /// A handle on the counter that outlives a move into a registry.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.count.clone()
    }
}

impl<R, T> RequestHandler<R> for CountingHandler<T>
where
    R: Request<Output = T>,
    T: Clone + Send + Sync + 'static,
{
    async fn handle(&self, _request: &R, _cancel: &CancellationToken) -> Outcome<T> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

// ============================================================================
// Notification Handlers
// ============================================================================

/// A notification handler that records every notification it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingNotificationHandler::<UserCreated>::new();
/// let events = recorder.clone();
///
/// // Register `recorder`, publish...
///
/// assert_eq!(events.count(), 1);
/// ```
pub struct RecordingNotificationHandler<N: Clone> {
    received: Arc<Mutex<Vec<N>>>,
    label: Option<(&'static str, CallLog)>,
}

impl<N: Clone> RecordingNotificationHandler<N> {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            label: None,
        }
    }

    /// Also write `name` to `log` on every call.
    pub fn labelled(name: &'static str, log: CallLog) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            label: Some((name, log)),
        }
    }

    /// Get a clone of the recorded notifications.
    pub fn received(&self) -> Vec<N> {
        lock(&self.received).clone()
    }

    /// Get the number of recorded notifications.
    pub fn count(&self) -> usize {
        lock(&self.received).len()
    }

    /// Clear all recorded notifications.
    pub fn clear(&self) {
        lock(&self.received).clear();
    }
}

impl<N: Clone> Default for RecordingNotificationHandler<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> Clone for RecordingNotificationHandler<N> {
    fn clone(&self) -> Self {
        Self {
            received: self.received.clone(),
            label: self.label.clone(),
        }
    }
}

impl<N: Notification + Clone> NotificationHandler<N> for RecordingNotificationHandler<N> {
    async fn handle(&self, notification: &N, _cancel: &CancellationToken) -> Result<(), BoxError> {
        if let Some((name, log)) = &self.label {
            log.record(*name);
        }
        lock(&self.received).push(notification.clone());
        Ok(())
    }
}

/// A notification handler that always fails with the same message.
#[derive(Debug, Clone)]
pub struct FailingNotificationHandler {
    message: &'static str,
    log: Option<CallLog>,
}

impl FailingNotificationHandler {
    /// Create a handler that fails with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message, log: None }
    }

    /// Also write the message to `log` before failing.
    pub fn logging_to(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }
}

impl<N: Notification> NotificationHandler<N> for FailingNotificationHandler {
    async fn handle(&self, _notification: &N, _cancel: &CancellationToken) -> Result<(), BoxError> {
        if let Some(log) = &self.log {
            log.record(self.message);
        }
        Err(self.message.into())
    }
}

/// A notification handler that panics with the same message.
#[derive(Debug, Clone)]
pub struct PanickingNotificationHandler {
    message: &'static str,
}

impl PanickingNotificationHandler {
    /// Create a handler that panics with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<N: Notification> NotificationHandler<N> for PanickingNotificationHandler {
    async fn handle(&self, _notification: &N, _cancel: &CancellationToken) -> Result<(), BoxError> {
        panic!("{}", self.message)
    }
}
