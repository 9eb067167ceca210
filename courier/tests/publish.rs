//! Notification fan-out through the mediator.

mod common;

use common::{UserCreated, await_cancel, slow};
use courier::{
    CancellationToken, HandlerError, Mediator, RegistryBuilder, SequentialPublish,
    testing::{
        CallLog, FailingNotificationHandler, PanickingNotificationHandler,
        RecordingNotificationHandler,
    },
};
use std::{sync::Arc, time::Duration};

#[tokio::test]
async fn every_handler_receives_the_notification() {
    let first = RecordingNotificationHandler::<UserCreated>::new();
    let second = RecordingNotificationHandler::<UserCreated>::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(first.clone())
        .notification_handler::<UserCreated, _>(second.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    mediator.publish(&UserCreated { id: 7 }).await.unwrap();

    assert_eq!(first.received(), [UserCreated { id: 7 }]);
    assert_eq!(second.received(), [UserCreated { id: 7 }]);
}

#[tokio::test]
async fn publish_without_handlers_is_ok() {
    let mediator = Mediator::new(RegistryBuilder::new().build().unwrap());

    mediator.publish(&UserCreated { id: 1 }).await.unwrap();
}

#[tokio::test]
async fn a_failure_is_reported_only_after_every_handler_finished() {
    let log = CallLog::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(slow("h1", 30, &log))
        .notification_handler::<UserCreated, _>(
            FailingNotificationHandler::new("h2 failed").logging_to(log.clone()),
        )
        .notification_handler::<UserCreated, _>(slow("h3", 60, &log))
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let err = mediator.publish(&UserCreated { id: 1 }).await.unwrap_err();

    let mut seen = log.entries();
    seen.sort();
    assert_eq!(seen, ["h1", "h2 failed", "h3"]);

    assert_eq!(err.total, 3);
    assert_eq!(err.failures.len(), 1);
    let failure = err.first().expect("one failure");
    assert_eq!(failure.index, 1);
    assert!(failure.handler.ends_with("FailingNotificationHandler"));
    assert!(matches!(&failure.error, HandlerError::Failed(e) if e.to_string() == "h2 failed"));
    assert!(err.to_string().starts_with("1 of 3 handlers failed"));
}

#[tokio::test]
async fn concurrent_handlers_overlap() {
    let log = CallLog::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(slow("slow", 80, &log))
        .notification_handler::<UserCreated, _>(slow("fast", 5, &log))
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    mediator.publish(&UserCreated { id: 1 }).await.unwrap();

    assert_eq!(log.entries(), ["fast", "slow"]);
}

#[tokio::test]
async fn panics_are_caught_and_siblings_still_run() {
    let recorder = RecordingNotificationHandler::<UserCreated>::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(PanickingNotificationHandler::new("kaboom"))
        .notification_handler::<UserCreated, _>(recorder.clone())
        .notification_handler::<UserCreated, _>(FailingNotificationHandler::new("nope"))
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let err = mediator.publish(&UserCreated { id: 2 }).await.unwrap_err();

    assert_eq!(recorder.count(), 1);
    let indices: Vec<_> = err.failures.iter().map(|f| f.index).collect();
    assert_eq!(indices, [0, 2]);
    assert!(matches!(&err.failures[0].error, HandlerError::Panicked(msg) if msg == "kaboom"));
}

#[tokio::test]
async fn sequential_strategy_runs_in_registration_order_and_keeps_going() {
    let log = CallLog::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(slow("h1", 20, &log))
        .notification_handler::<UserCreated, _>(
            FailingNotificationHandler::new("h2").logging_to(log.clone()),
        )
        .notification_handler::<UserCreated, _>(slow("h3", 1, &log))
        .build()
        .unwrap();
    let mediator = Mediator::with_strategy(registry, SequentialPublish);

    let err = mediator.publish(&UserCreated { id: 3 }).await.unwrap_err();

    assert_eq!(log.entries(), ["h1", "h2", "h3"]);
    assert_eq!(err.failures.len(), 1);
}

#[tokio::test]
async fn only_handlers_of_the_exact_type_run() {
    #[derive(Debug, Clone)]
    struct Other;
    impl courier::Message for Other {}
    impl courier::Notification for Other {}

    let recorder = RecordingNotificationHandler::<UserCreated>::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(recorder.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    mediator.publish(&Other).await.unwrap();

    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn cancelling_publish_with_reaches_every_handler() {
    let log = CallLog::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(await_cancel("h1", &log))
        .notification_handler::<UserCreated, _>(await_cancel("h2", &log))
        .build()
        .unwrap();
    let mediator = Arc::new(Mediator::new(registry));
    let cancel = CancellationToken::new();

    let task = {
        let mediator = mediator.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { mediator.publish_with(&UserCreated { id: 4 }, &cancel).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(log.is_empty());
    cancel.cancel();

    task.await.unwrap().unwrap();
    let mut entries = log.entries();
    entries.sort();
    assert_eq!(entries, ["h1", "h2"]);
}

#[tokio::test]
async fn sequential_publish_with_hands_the_same_token_to_each_handler() {
    let log = CallLog::new();
    let registry = RegistryBuilder::new()
        .notification_handler::<UserCreated, _>(await_cancel("h1", &log))
        .notification_handler::<UserCreated, _>(await_cancel("h2", &log))
        .build()
        .unwrap();
    let mediator = Mediator::with_strategy(registry, SequentialPublish);
    let cancel = CancellationToken::new();
    cancel.cancel();

    mediator
        .publish_with(&UserCreated { id: 5 }, &cancel)
        .await
        .unwrap();

    assert_eq!(log.entries(), ["h1", "h2"]);
}
