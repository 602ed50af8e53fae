//! Authentication Middleware
//!
//! Middleware for JWT authentication and authorization in API endpoints.

use crate::service::JwtService;
use crate::utils::error::AppError;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::models::UserContext;

/// Extension type for storing authenticated user context in request extensions
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserContext);

/// Authentication middleware that validates JWT tokens and extracts user context
///
/// This middleware:
/// 1. Extracts the Authorization header from the request
/// 2. Validates the Bearer token format
/// 3. Verifies the JWT token using the JWT service
/// 4. Adds the user context to request extensions for use in handlers
///
/// A missing or non-Bearer header and a bad token both produce 401, but
/// with distinct error codes so clients can tell them apart.
pub async fn auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Missing Authorization header".into()))?;

    // Check for Bearer token format
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthenticated(
            "Invalid Authorization header format".into(),
        ));
    }

    // Extract token (remove "Bearer " prefix)
    let token = &auth_header[7..];

    // Validate token and extract user context
    let user_context = jwt_service.verify_token(token)?;

    // Add user context to request extensions
    request.extensions_mut().insert(AuthUser(user_context));

    // Continue to the next middleware/handler
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use chrono::Duration;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    fn create_test_jwt_service() -> Arc<JwtService> {
        Arc::new(JwtService::new("test_secret_key".to_string()))
    }

    fn protected_app(jwt_service: Arc<JwtService>) -> Router {
        Router::new()
            .route("/test", get(auth_test_handler))
            .layer(from_fn_with_state(jwt_service, auth_middleware))
    }

    async fn auth_test_handler(Extension(AuthUser(user)): Extension<AuthUser>) -> String {
        user.user_id.to_string()
    }

    #[tokio::test]
    async fn test_auth_middleware_missing_header() {
        let app = protected_app(create_test_jwt_service());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_invalid_format() {
        let app = protected_app(create_test_jwt_service());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/test")
            .header(AUTHORIZATION, "Invalid token")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_garbage_token() {
        let app = protected_app(create_test_jwt_service());

        let request = Request::builder()
            .method(Method::GET)
            .uri("/test")
            .header(AUTHORIZATION, "Bearer not.a.token")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_expired_token() {
        let jwt_service = Arc::new(JwtService::with_expiration(
            "test_secret_key".to_string(),
            Duration::days(-1),
        ));
        let token = jwt_service.issue_token(Uuid::new_v4()).unwrap();
        let app = protected_app(jwt_service);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/test")
            .header(AUTHORIZATION, format!("Bearer {}", token.token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_valid_token() {
        let jwt_service = create_test_jwt_service();
        let user_id = Uuid::new_v4();
        let token = jwt_service.issue_token(user_id).unwrap();
        let app = protected_app(jwt_service);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/test")
            .header(AUTHORIZATION, format!("Bearer {}", token.token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The handler must see the authenticated user's ID.
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, user_id.to_string().as_bytes());
    }
}
