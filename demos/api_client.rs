//! API Client Example
//!
//! This example shows how to interact with the booking service HTTP API
//! using a simple HTTP client. Start the server first, then run this
//! against it.

use reqwest::{multipart, Client};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = "http://localhost:5000";

    // Health check
    println!("Checking service health...");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;

    if health_response.status().is_success() {
        let health_data: serde_json::Value = health_response.json().await?;
        println!("Service is healthy: {}", health_data);
    } else {
        println!("Service health check failed: {}", health_response.status());
        return Ok(());
    }

    // Register an account
    println!("\nRegistering an account...");
    let register_data = json!({
        "email": "bob@example.com",
        "password": "MySecurePassword123!"
    });

    let register_response = client
        .post(format!("{}/auth/register", base_url))
        .json(&register_data)
        .send()
        .await?;

    if !register_response.status().is_success() {
        println!("Failed to register: {}", register_response.status());
        let error_text = register_response.text().await?;
        println!("Error: {}", error_text);
        return Ok(());
    }

    let register_result: serde_json::Value = register_response.json().await?;
    println!("Registered user with ID: {}", register_result["data"]["id"]);

    // Log in for a bearer token
    println!("\nLogging in...");
    let login_response = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({
            "email": "bob@example.com",
            "password": "MySecurePassword123!"
        }))
        .send()
        .await?;

    let login_result: serde_json::Value = login_response.json().await?;
    let token = login_result["data"]["token"]
        .as_str()
        .ok_or("login response carried no token")?
        .to_string();
    println!("Received bearer token");

    // Create a booking with an opening message
    println!("\nCreating a booking...");
    let booking_response = client
        .post(format!("{}/bookings", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "service": "Boiler inspection",
            "date": "2026-09-12T09:30:00Z",
            "messages": "[\"Gate code is 4417\"]"
        }))
        .send()
        .await?;

    let booking_result: serde_json::Value = booking_response.json().await?;
    let booking_id = booking_result["data"]["id"]
        .as_str()
        .ok_or("booking response carried no id")?
        .to_string();
    println!("Created booking {}", booking_id);

    // Upload an attachment
    println!("\nUploading an attachment...");
    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(b"meter readings: 0241, 0244".to_vec())
            .file_name("readings.txt")
            .mime_str("text/plain")?,
    );

    let attachment_response = client
        .post(format!("{}/bookings/{}/attachments", base_url, booking_id))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await?;

    let attachment_result: serde_json::Value = attachment_response.json().await?;
    println!("Uploaded attachment: {}", attachment_result["data"]["url"]);

    // Post a message to the thread
    println!("\nPosting a message...");
    client
        .post(format!("{}/bookings/{}/messages", base_url, booking_id))
        .bearer_auth(&token)
        .json(&json!({ "content": "See attached meter readings" }))
        .send()
        .await?;

    // Read the thread back
    let thread_response = client
        .get(format!("{}/bookings/{}/messages", base_url, booking_id))
        .bearer_auth(&token)
        .send()
        .await?;

    let thread: serde_json::Value = thread_response.json().await?;
    println!("Message thread: {}", serde_json::to_string_pretty(&thread)?);

    println!("\nExample completed successfully!");

    Ok(())
}
