//! Outbound notification dispatch.

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::config::Destination;
use crate::format::Notification;

/// A send that failed after the HTTP caller was already acknowledged.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("failed to send to {destination}: {reason}")]
    SendFailed {
        destination: Destination,
        reason: String,
    },
}

/// The chat transport's send capability.
///
/// Implementations must be safe to call from many requests at once.
pub trait Notifier: Send + Sync + 'static {
    /// Sends one rendered message to `destination`.
    fn send(
        &self,
        destination: &Destination,
        notification: &Notification,
    ) -> BoxFuture<'static, Result<(), DispatchError>>;
}

/// Sends a notification on a detached task.
///
/// The caller does not wait for the outcome. Failures end up in the log and
/// nowhere else.
pub fn dispatch(
    notifier: &Arc<dyn Notifier>,
    destination: Destination,
    notification: Notification,
) -> JoinHandle<()> {
    let send = notifier.send(&destination, &notification);
    tokio::spawn(async move {
        match send.await {
            Ok(()) => debug!(destination = %destination, "Notification sent"),
            Err(e) => error!(destination = %destination, error = %e, "Failed to send notification"),
        }
    })
}
