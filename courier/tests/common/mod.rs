//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use courier::{
    BoxError, CancellationToken, Error, Message, Notification, NotificationHandler, Outcome,
    Request, RequestHandler, testing::CallLog,
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Greet {
    pub name: &'static str,
}
impl Message for Greet {}
impl Request for Greet {
    type Output = String;
}

/// Records `"handler"` and greets by name. An empty name is a validation failure.
pub struct GreetHandler {
    pub log: CallLog,
}

impl RequestHandler<Greet> for GreetHandler {
    async fn handle(&self, request: &Greet, _cancel: &CancellationToken) -> Outcome<String> {
        self.log.record("handler");
        if request.name.is_empty() {
            return Outcome::failure(Error::validation("Greet.Name", "a name is required"));
        }
        Outcome::success(format!("hello, {}", request.name))
    }
}

#[derive(Debug, Clone)]
pub struct Wait;
impl Message for Wait {}
impl Request for Wait {
    type Output = ();
}

/// Completes when its token is cancelled, reporting the cancellation.
pub struct WaitForCancel;

impl RequestHandler<Wait> for WaitForCancel {
    async fn handle(&self, _request: &Wait, cancel: &CancellationToken) -> Outcome<()> {
        cancel.cancelled().await;
        Outcome::failure(Error::problem("Wait.Cancelled", "the caller gave up"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserCreated {
    pub id: u64,
}
impl Message for UserCreated {}
impl Notification for UserCreated {}

/// Sleeps, then records its label.
pub struct SlowHandler {
    pub label: &'static str,
    pub delay: Duration,
    pub log: CallLog,
}

impl NotificationHandler<UserCreated> for SlowHandler {
    async fn handle(&self, _n: &UserCreated, _cancel: &CancellationToken) -> Result<(), BoxError> {
        tokio::time::sleep(self.delay).await;
        self.log.record(self.label);
        Ok(())
    }
}

pub fn slow(label: &'static str, millis: u64, log: &CallLog) -> SlowHandler {
    SlowHandler {
        label,
        delay: Duration::from_millis(millis),
        log: log.clone(),
    }
}

/// Waits for its token to be cancelled, then records its label.
pub struct AwaitCancel {
    pub label: &'static str,
    pub log: CallLog,
}

impl NotificationHandler<UserCreated> for AwaitCancel {
    async fn handle(&self, _n: &UserCreated, cancel: &CancellationToken) -> Result<(), BoxError> {
        cancel.cancelled().await;
        self.log.record(self.label);
        Ok(())
    }
}

pub fn await_cancel(label: &'static str, log: &CallLog) -> AwaitCancel {
    AwaitCancel {
        label,
        log: log.clone(),
    }
}
