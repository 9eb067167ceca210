//! Derive macros.

#![cfg(feature = "macros")]

use courier::{
    CancellationToken, Command, Mediator, Notification, Outcome, Query, RegistryBuilder, Request,
    RequestHandler, testing::RecordingNotificationHandler,
};

#[derive(Debug, Clone, courier::Request)]
#[request(output = u32)]
struct Count {
    upto: u32,
}

#[derive(Debug, courier::Request)]
struct Reset;

#[derive(Debug, Clone, PartialEq, courier::Notification)]
struct Counted(u32);

#[derive(courier::Message)]
struct Plain;

#[derive(Debug, courier::Command)]
#[command(output = u64)]
struct Enroll;

#[derive(Debug, courier::Command)]
struct Archive;

#[derive(Debug, courier::Query)]
#[query(output = Vec<String>)]
struct Roster;

struct Counter;

impl RequestHandler<Count> for Counter {
    async fn handle(&self, request: &Count, _cancel: &CancellationToken) -> Outcome<u32> {
        Outcome::success((1..=request.upto).sum())
    }
}

fn assert_request<R: Request<Output = O>, O>() {}
fn assert_notification<N: Notification>() {}
fn assert_message<M: courier::Message>() {}
fn assert_command<C: Command<Output = O>, O>() {}
fn assert_query<Q: Query<Output = O>, O>() {}

#[test]
fn derives_implement_the_traits() {
    assert_request::<Count, u32>();
    assert_request::<Reset, ()>();
    assert_notification::<Counted>();
    assert_message::<Plain>();
    assert_command::<Enroll, u64>();
    assert_command::<Archive, ()>();
    assert_query::<Roster, Vec<String>>();
}

#[tokio::test]
async fn derived_types_dispatch() {
    let recorder = RecordingNotificationHandler::<Counted>::new();
    let registry = RegistryBuilder::new()
        .handler::<Count, _>(Counter)
        .notification_handler::<Counted, _>(recorder.clone())
        .build()
        .unwrap();
    let mediator = Mediator::new(registry);

    let total = mediator.send(Count { upto: 4 }).await.unwrap().into_value();
    mediator.publish(&Counted(total)).await.unwrap();

    assert_eq!(total, 10);
    assert_eq!(recorder.received(), [Counted(10)]);
}
