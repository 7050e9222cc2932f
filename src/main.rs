use std::sync::Arc;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use innkeep::{
    api,
    auth::AuthService,
    config::Settings,
    payments::MollieClient,
    repository::{SqliteBookingRepository, SqliteCartRepository, SqliteGuestRepository},
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innkeep=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!("Starting Innkeep server on {}:{}", settings.server.host, settings.server.port);

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(db_pool.clone()));

    // Initialize repositories
    let guest_repo = Arc::new(SqliteGuestRepository::new(db_pool.clone()));
    let cart_repo = Arc::new(SqliteCartRepository::new(db_pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepository::new(db_pool.clone()));

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        guest_repo,
        cart_repo,
        booking_repo.clone(),
        auth_service,
        db_pool.clone(),
    ));

    // Initialize Mollie client if configured
    let mollie_client = if settings.mollie.enabled {
        if let Some(api_key) = settings.mollie.api_key.clone() {
            let webhook_base = settings
                .mollie
                .webhook_base_url
                .clone()
                .unwrap_or_else(|| settings.server.base_url.clone());
            let webhook_url = format!("{}/api/payments/webhook/mollie", webhook_base);

            tracing::info!("Mollie payment processing enabled");
            Some(Arc::new(MollieClient::new(api_key, webhook_url, booking_repo)))
        } else {
            tracing::warn!("Mollie enabled but missing API key");
            None
        }
    } else {
        tracing::info!("Mollie payment processing disabled");
        None
    };

    // Create the app
    let app = api::create_app(service_context, mollie_client, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
