//! Order handler.

use axum::{extract::State, Json};
use tracing::info;

use crate::error::Result;
use crate::format::{format, NotificationKind};
use crate::notify::dispatch;
use crate::state::AppState;
use crate::types::Submission;

/// POST /order - Order rendered as HTML to the configured chat.
///
/// Responds with the parsed body.
pub async fn order(
    State(state): State<AppState>,
    submission: Submission,
) -> Result<Json<Submission>> {
    let notification = format(NotificationKind::Order, &submission)?;
    let destination = state.config.bot_chat.clone();
    info!(destination = %destination, "Order relayed");
    dispatch(&state.notifier, destination, notification);
    Ok(Json(submission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Destination;
    use crate::error::RelayError;
    use crate::test_support::{make_test_state, next_sent, BOT_CHAT};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_order_handler_echoes_body() {
        let (state, mut rx) = make_test_state();
        let body = json!({
            "name": "Ann",
            "phone": "555",
            "items": { "a": { "product": { "name": "X" }, "quantity": 2 } },
            "amount": 100
        });

        let response = order(State(state), Submission::new(body.clone()))
            .await
            .unwrap();
        assert_eq!(response.as_value(), &body);

        let (destination, notification) = next_sent(&mut rx).await;
        assert_eq!(destination, Destination::Id(BOT_CHAT));
        assert!(notification.text.contains("X   X   2"));
    }

    #[tokio::test]
    async fn test_order_handler_without_items() {
        let (state, mut rx) = make_test_state();
        let body = Submission::new(json!({ "name": "Ann", "phone": "555" }));

        let err = order(State(state), body).await.unwrap_err();
        assert!(matches!(err, RelayError::Unexpected(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(rx.try_recv().is_err());
    }
}
