use super::traits::{PublishStrategy, run_guarded};
use courier_core::{CancellationToken, DynNotificationHandler, HandlerFailure, Notification};
use std::sync::Arc;

/// A sequential publish strategy.
///
/// Runs handlers one by one in resolution order. Unlike a hook chain it
/// never stops early: a failure is recorded and the next handler still runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialPublish;

impl PublishStrategy for SequentialPublish {
    async fn deliver<N: Notification>(
        &self,
        notification: &N,
        handlers: &[Arc<dyn DynNotificationHandler<N>>],
        cancel: &CancellationToken,
    ) -> Vec<HandlerFailure> {
        let mut failures = Vec::new();
        for (index, handler) in handlers.iter().enumerate() {
            if let Some(failure) = run_guarded(index, handler.as_ref(), notification, cancel).await {
                failures.push(failure);
            }
        }
        failures
    }
}
