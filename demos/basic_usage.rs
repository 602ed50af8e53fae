//! Basic Usage Example
//!
//! This example demonstrates how to use the booking service as a library
//! in your own applications.

use std::{path::PathBuf, sync::Arc};

use booking_service::{
    database::DatabaseConfig,
    models::{CreateBookingRequest, LoginRequest, PostMessageRequest, RegisterRequest},
    service::{BookingService, JwtService, LocalObjectStore, ObjectStore, UserService},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Set up database connection
    let pool = DatabaseConfig::from_env().create_pool().await?;

    // Initialize services
    let jwt_service = Arc::new(JwtService::new("example-secret".to_string()));
    let user_service = UserService::new(pool.clone(), jwt_service);

    let store = LocalObjectStore::new(PathBuf::from("uploads"), "/uploads".to_string());
    store.ensure_root().await?;
    let object_store: Arc<dyn ObjectStore> = Arc::new(store);
    let booking_service = BookingService::new(pool, object_store);

    // Register an account
    println!("Registering account...");
    let user = user_service
        .register(RegisterRequest {
            email: Some("alice@example.com".to_string()),
            phone: None,
            password: "SecurePassword123!".to_string(),
        })
        .await?;
    println!(
        "Registered user {} <{}>",
        user.id,
        user.email.as_deref().unwrap_or("-")
    );

    // Log in and receive a bearer token
    println!("Logging in...");
    let token = user_service
        .login(LoginRequest {
            email: Some("alice@example.com".to_string()),
            phone: None,
            password: "SecurePassword123!".to_string(),
        })
        .await?;
    println!(
        "Received {} token (expires in {}s)",
        token.token_type, token.expires_in
    );

    // Create a booking with an opening message
    println!("Creating booking...");
    let booking = booking_service
        .create_booking(
            user.id,
            CreateBookingRequest {
                service: "Deep tissue massage".to_string(),
                date: chrono::Utc::now() + chrono::Duration::days(3),
                messages: Some("[\"Please confirm availability\"]".to_string()),
            },
        )
        .await?;
    println!(
        "Created booking {} ({:?}) with {} message(s)",
        booking.id,
        booking.status,
        booking.messages.len()
    );

    // Post a follow-up message
    println!("Posting a follow-up message...");
    booking_service
        .add_message(
            user.id,
            booking.id,
            PostMessageRequest {
                content: "Running 10 minutes late".to_string(),
            },
        )
        .await?;

    // Read the thread back with sender identities
    let thread = booking_service.list_messages(user.id, booking.id).await?;
    for entry in &thread {
        println!(
            "[{}] {}: {}",
            entry.created_at,
            entry.sender.email.as_deref().unwrap_or("unknown"),
            entry.content
        );
    }

    println!("Example completed successfully!");

    Ok(())
}
