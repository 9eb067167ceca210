use courier_core::{
    CancellationToken, DynNotificationHandler, HandlerError, HandlerFailure, Notification,
};
use futures::FutureExt;
use std::{any::Any, future::Future, panic::AssertUnwindSafe, sync::Arc};

/// Strategy for delivering a notification to its resolved handlers.
///
/// Every strategy must invoke every handler, even after one of them failed,
/// and return the failures in resolution order.
pub trait PublishStrategy: Send + Sync {
    /// Deliver the notification to the handlers.
    fn deliver<N: Notification>(
        &self,
        notification: &N,
        handlers: &[Arc<dyn DynNotificationHandler<N>>],
        cancel: &CancellationToken,
    ) -> impl Future<Output = Vec<HandlerFailure>> + Send;
}

/// Run one handler, turning an error or a panic into a [`HandlerFailure`].
pub(crate) async fn run_guarded<N: Notification>(
    index: usize,
    handler: &dyn DynNotificationHandler<N>,
    notification: &N,
    cancel: &CancellationToken,
) -> Option<HandlerFailure> {
    let result = AssertUnwindSafe(handler.handle_dyn(notification, cancel))
        .catch_unwind()
        .await;

    let error = match result {
        Ok(Ok(())) => return None,
        Ok(Err(err)) => HandlerError::Failed(err),
        Err(payload) => HandlerError::Panicked(panic_message(payload)),
    };

    Some(HandlerFailure {
        index,
        handler: handler.handler_name(),
        error,
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&'static str>()
            .map(|s| (*s).to_string())
            .unwrap_or_else(|| "non-string panic payload".to_string()),
    }
}
