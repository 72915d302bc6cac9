//! Liveness handler.

use axum::Json;

use crate::types::HealthResponse;

/// GET / - Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_handler() {
        let response = health().await;
        assert!(response.status);
    }
}
