pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    payments::MollieClient,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    mollie_client: Option<Arc<MollieClient>>,
    settings: Arc<Settings>,
) -> Router {
    let app_state = AppState::new(service_context, mollie_client, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Auth routes
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .merge(
            Router::new()
                .route("/auth/me", get(handlers::auth::me))
                .route_layer(axum::middleware::from_fn_with_state(
                    app_state.clone(),
                    middleware::auth::require_auth,
                )),
        )

        // API routes
        .nest("/api", api_routes(app_state.clone()))

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/rooms", room_routes())
        .nest("/cart", cart_routes(state.clone()))
        .nest("/bookings", booking_routes(state.clone()))
        .nest("/payments", payment_routes(state))
}

fn room_routes() -> Router<AppState> {
    // Catalog browsing is public
    Router::new()
        .route("/", get(handlers::rooms::list))
        .route("/:id", get(handlers::rooms::get))
        .route("/:id/availability", get(handlers::rooms::availability))
}

fn cart_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::cart::get_cart))
        .route("/", delete(handlers::cart::clear))
        .route("/items", post(handlers::cart::add_item))
        .route("/items/:id", delete(handlers::cart::remove_item))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

fn booking_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::bookings::list))
        .route("/:id", get(handlers::bookings::get))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

fn payment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public webhook endpoint (no auth)
        .route("/webhook/mollie", post(handlers::payments::mollie_webhook))
        // Protected checkout endpoint
        .nest(
            "/",
            Router::new()
                .route("/checkout", post(handlers::payments::checkout))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_auth,
                )),
        )
}
