//! Delivery request handlers.

use axum::{extract::State, Json};
use tracing::info;

use crate::config::Destination;
use crate::error::Result;
use crate::format::{format, NotificationKind};
use crate::notify::dispatch;
use crate::state::AppState;
use crate::types::{AckResponse, Submission};

/// Chat that receives `/test` submissions.
pub const TEST_CHAT: Destination = Destination::Id(6773775244);

/// POST /test - Delivery request rendered as MarkdownV2 to the test chat.
pub async fn test_delivery(
    State(state): State<AppState>,
    submission: Submission,
) -> Result<Json<AckResponse>> {
    let notification = format(NotificationKind::DeliveryPlain, &submission)?;
    info!(destination = %TEST_CHAT, "Test delivery request relayed");
    dispatch(&state.notifier, TEST_CHAT, notification);
    Ok(Json(AckResponse::success()))
}

/// POST /delivery - Delivery request rendered as HTML to the configured chat.
pub async fn delivery(
    State(state): State<AppState>,
    submission: Submission,
) -> Result<Json<AckResponse>> {
    let notification = format(NotificationKind::DeliveryHtml, &submission)?;
    let destination = state.config.bot_chat.clone();
    info!(destination = %destination, "Delivery request relayed");
    dispatch(&state.notifier, destination, notification);
    Ok(Json(AckResponse::success()))
}
