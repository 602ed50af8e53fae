//! HTTP Request Handlers
//!
//! Axum handlers for processing HTTP requests and responses.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::JsonRejection, FromRequest, FromRequestParts, Multipart, Path, Request, State,
    },
    http::{request::Parts, StatusCode},
    Extension, Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::middleware::AuthUser,
    models::{
        auth::AuthToken,
        booking::{Attachment, Booking, Message, MessageWithSender},
        requests::*,
        user::User,
    },
    service::{BookingService, JwtService, UserService},
    utils::error::{AppError, AppResult},
    VERSION,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub booking_service: Arc<BookingService>,
    pub jwt_service: Arc<JwtService>,
}

/// Standard success response wrapper
#[derive(serde::Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// JSON extractor whose rejection is our validation error
///
/// The stock `Json` extractor answers malformed bodies with 422; the API
/// contract wants every input problem reported as a 400 validation error.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Path extractor whose rejection is our validation error
///
/// Keeps malformed booking IDs inside the same error envelope as every
/// other bad input.
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(AppPath(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SuccessResponse<User>>)> {
    // Validate request
    request
        .validate()
        .map_err(|e| AppError::Validation(format!("Invalid registration data: {}", e)))?;

    let user = state.user_service.register(request).await?;

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(user))))
}

/// Log in with email or phone and receive a bearer token
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<SuccessResponse<AuthToken>>> {
    // Validate request
    request
        .validate()
        .map_err(|e| AppError::Validation(format!("Invalid login data: {}", e)))?;

    let token = state.user_service.login(request).await?;

    Ok(Json(SuccessResponse::new(token)))
}

/// Create a new booking for the authenticated user
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppJson(request): AppJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<SuccessResponse<Booking>>)> {
    // Validate request
    request
        .validate()
        .map_err(|e| AppError::Validation(format!("Invalid booking data: {}", e)))?;

    let booking = state
        .booking_service
        .create_booking(user.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(booking))))
}

/// List the authenticated user's bookings, soonest first
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> AppResult<Json<SuccessResponse<Vec<Booking>>>> {
    let bookings = state.booking_service.list_bookings(user.user_id).await?;
    Ok(Json(SuccessResponse::new(bookings)))
}

/// Get one booking with its attachments and thread
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(booking_id): AppPath<Uuid>,
) -> AppResult<Json<SuccessResponse<Booking>>> {
    let booking = state
        .booking_service
        .get_booking(user.user_id, booking_id)
        .await?;
    Ok(Json(SuccessResponse::new(booking)))
}

/// Attach an uploaded file to a booking
///
/// Expects a multipart form with the file under the `file` field.
pub async fn upload_attachment(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(booking_id): AppPath<Uuid>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<SuccessResponse<Attachment>>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("file").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?;

        let attachment = state
            .booking_service
            .add_attachment(user.user_id, booking_id, &filename, &bytes, &content_type)
            .await?;

        return Ok((StatusCode::CREATED, Json(SuccessResponse::new(attachment))));
    }

    Err(AppError::Validation(
        "Missing file field in upload".to_string(),
    ))
}

/// Post a message to a booking's thread
pub async fn post_message(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(booking_id): AppPath<Uuid>,
    AppJson(request): AppJson<PostMessageRequest>,
) -> AppResult<(StatusCode, Json<SuccessResponse<Message>>)> {
    let message = state
        .booking_service
        .add_message(user.user_id, booking_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(message))))
}

/// List a booking's thread with sender identities
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    AppPath(booking_id): AppPath<Uuid>,
) -> AppResult<Json<SuccessResponse<Vec<MessageWithSender>>>> {
    let messages = state
        .booking_service
        .list_messages(user.user_id, booking_id)
        .await?;
    Ok(Json(SuccessResponse::new(messages)))
}

/// Health check endpoint
pub async fn health_check(
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse<HealthCheckResponse>>> {
    // Check database connectivity
    state.user_service.health_check().await?;

    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
    };

    Ok(Json(SuccessResponse::new(response)))
}
