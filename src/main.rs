use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bms_backend::config::AppConfig;
use bms_backend::services::email::HttpEmailSender;
use bms_backend::services::payments::StripeGateway;
use bms_backend::services::screening::LiveScreeningService;
use bms_backend::{app, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bms_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        db: Arc::new(db),
        screening: Arc::new(LiveScreeningService::new(&config.screening)),
        email: Arc::new(HttpEmailSender::new(&config.email)),
        payments: Arc::new(StripeGateway::new(&config.payments)),
        config: Arc::new(config),
    };

    let bind_addr = state.config.bind_addr.clone();
    let router = app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(
        "Server listening on {}",
        listener.local_addr().expect("listener has no local addr")
    );

    axum::serve(listener, router).await.expect("server error");
}
