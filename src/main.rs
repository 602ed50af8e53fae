//! Booking Service Development Server
//!
//! This is a development server for the booking service library. It provides
//! a complete HTTP server with all API endpoints enabled for local development
//! and testing purposes.
//!
//! For production deployments with custom router configurations, use the
//! RouterBuilder in your own application.

use std::{path::PathBuf, sync::Arc};

use axum::extract::DefaultBodyLimit;
use dotenv::dotenv;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use booking_service::{
    api::{AppState, RouterBuilder},
    config::AppConfig,
    service::{BookingService, JwtService, LocalObjectStore, ObjectStore, UserService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Initialize structured logging for development
    env_logger::init();

    log::info!("🚀 Starting Booking Service v{}", booking_service::VERSION);

    // Load configuration from environment
    let config = AppConfig::from_env()?;
    config.validate()?;

    log::info!("✅ Configuration loaded and validated");

    // Database connection
    let database_pool = config.database.create_pool().await?;

    // Run database migrations
    log::info!("🔄 Running database migrations...");
    sqlx::migrate!("./migrations").run(&database_pool).await?;

    log::info!("✅ Database migrations completed");

    // Attachment storage
    let object_store = LocalObjectStore::new(
        PathBuf::from(&config.storage.upload_dir),
        config.storage.public_base_url.clone(),
    );
    object_store.ensure_root().await?;
    let object_store: Arc<dyn ObjectStore> = Arc::new(object_store);

    log::info!(
        "✅ Attachment storage ready at {} (served from {})",
        config.storage.upload_dir,
        config.storage.public_base_url
    );

    // Initialize core services
    let jwt_service = Arc::new(JwtService::with_expiration(
        config.jwt.secret.clone(),
        chrono::Duration::days(config.jwt.expires_days),
    ));
    let user_service = Arc::new(UserService::new(database_pool.clone(), jwt_service.clone()));
    let booking_service = Arc::new(BookingService::new(database_pool, object_store));

    log::info!("✅ Core services initialized");
    log::info!("   - User service");
    log::info!("   - Booking service");
    log::info!("   - JWT service ({}-day tokens)", config.jwt.expires_days);

    // Create application state
    let app_state = AppState {
        user_service,
        booking_service,
        jwt_service: jwt_service.clone(),
    };

    // Build the application with all routes and bearer auth enabled
    let router = RouterBuilder::with_all_routes()
        .with_auth(jwt_service)
        .build();

    let app = router
        .with_state(app_state)
        .nest_service(
            &config.storage.public_base_url,
            ServeDir::new(&config.storage.upload_dir),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any) // Permissive CORS for development
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .into_inner(),
        )
        .layer(DefaultBodyLimit::max(config.server.max_request_size));

    // Server configuration
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    log::info!("🌐 Starting server on {}", bind_addr);

    log::info!("📋 API Endpoints:");
    log::info!("   GET  /health - Health check");
    log::info!("   POST /auth/register - Create an account (email or phone)");
    log::info!("   POST /auth/login - Log in and receive a bearer token");
    log::info!("   POST /bookings - Create a booking");
    log::info!("   GET  /bookings - List your bookings");
    log::info!("   GET  /bookings/{{id}} - Fetch one booking");
    log::info!("   POST /bookings/{{id}}/attachments - Upload an attachment");
    log::info!("   POST /bookings/{{id}}/messages - Post a message");
    log::info!("   GET  /bookings/{{id}}/messages - Read the thread");
    log::info!(
        "   GET  {}/* - Uploaded files",
        config.storage.public_base_url
    );

    // Start the server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("✅ Server listening and ready for requests");
    axum::serve(listener, app).await?;

    Ok(())
}
