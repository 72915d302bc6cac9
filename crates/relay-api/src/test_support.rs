//! Fakes shared by the unit tests.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::mpsc;

use crate::config::{Destination, ServerConfig};
use crate::format::Notification;
use crate::notify::{DispatchError, Notifier};
use crate::state::AppState;

pub(crate) const BOT_CHAT: i64 = -1001234567890;

pub(crate) type Sent = (Destination, Notification);

/// Forwards every send to a channel the test can await on.
pub(crate) struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Sent>,
}

impl ChannelNotifier {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Sent>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn send(
        &self,
        destination: &Destination,
        notification: &Notification,
    ) -> BoxFuture<'static, Result<(), DispatchError>> {
        let _ = self.tx.send((destination.clone(), notification.clone()));
        async { Ok(()) }.boxed()
    }
}

/// Rejects every send, like a chat API refusing the markup.
pub(crate) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(
        &self,
        destination: &Destination,
        _notification: &Notification,
    ) -> BoxFuture<'static, Result<(), DispatchError>> {
        let err = DispatchError::SendFailed {
            destination: destination.clone(),
            reason: "Bad Request: can't parse entities".to_string(),
        };
        async move { Err(err) }.boxed()
    }
}

pub(crate) fn test_config() -> ServerConfig {
    ServerConfig::new("127.0.0.1", 0, Destination::Id(BOT_CHAT))
}

pub(crate) fn make_test_state() -> (AppState, mpsc::UnboundedReceiver<Sent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = AppState::new(test_config(), Arc::new(ChannelNotifier::new(tx)));
    (state, rx)
}

pub(crate) fn make_failing_state() -> AppState {
    AppState::new(test_config(), Arc::new(FailingNotifier))
}

/// Waits for the next dispatched notification.
pub(crate) async fn next_sent(rx: &mut mpsc::UnboundedReceiver<Sent>) -> Sent {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a dispatched notification")
        .expect("notifier channel closed")
}
