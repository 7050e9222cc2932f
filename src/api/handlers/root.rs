use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Innkeep API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Hotel booking backend: room catalog, carts and Mollie-backed checkout",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "auth": "/auth/login",
            "rooms": "/api/rooms",
            "cart": "/api/cart",
            "bookings": "/api/bookings"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
