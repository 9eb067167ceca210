use super::traits::{PublishStrategy, run_guarded};
use courier_core::{CancellationToken, DynNotificationHandler, HandlerFailure, Notification};
use futures::future::join_all;
use std::sync::Arc;

/// A concurrent publish strategy.
///
/// Starts every handler at once and waits for all of them. A failing or
/// panicking handler does not cancel its siblings.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcurrentPublish;

impl PublishStrategy for ConcurrentPublish {
    async fn deliver<N: Notification>(
        &self,
        notification: &N,
        handlers: &[Arc<dyn DynNotificationHandler<N>>],
        cancel: &CancellationToken,
    ) -> Vec<HandlerFailure> {
        join_all(
            handlers
                .iter()
                .enumerate()
                .map(|(index, handler)| run_guarded(index, handler.as_ref(), notification, cancel)),
        )
        .await
        .into_iter()
        .flatten()
        .collect()
    }
}
