//! Booking Service Implementation
//!
//! Core business logic for bookings, their attachments, and their message
//! threads. Every booking-scoped operation checks ownership before touching
//! the aggregate.

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    booking::{Attachment, Booking, BookingRow, Message, MessageSenderRow, MessageWithSender},
    requests::{CreateBookingRequest, PostMessageRequest},
};
use crate::service::storage::{object_name, ObjectStore, ObjectStoreError};
use crate::utils::error::AppError;

/// Custom error types for the booking service
#[derive(Error, Debug)]
pub enum BookingServiceError {
    /// No booking exists with the requested ID
    #[error("Booking not found")]
    BookingNotFound,

    /// The booking exists but belongs to another user
    #[error("Booking belongs to another user")]
    NotOwner,

    /// Input validation failed with detailed error message
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Attachment upload failed in the object store
    #[error("Storage error: {0}")]
    Storage(#[from] ObjectStoreError),

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<BookingServiceError> for AppError {
    fn from(err: BookingServiceError) -> Self {
        match err {
            BookingServiceError::BookingNotFound => {
                AppError::NotFound("Booking not found".to_string())
            }
            BookingServiceError::NotOwner => {
                AppError::Forbidden("Booking belongs to another user".to_string())
            }
            BookingServiceError::ValidationError(msg) => AppError::Validation(msg),
            BookingServiceError::Storage(e) => AppError::Storage(e.to_string()),
            BookingServiceError::DatabaseError(e) => AppError::Database(e),
        }
    }
}

/// Result type for booking service operations
pub type BookingServiceResult<T> = Result<T, BookingServiceError>;

/// Core booking service providing the booking lifecycle and its threads
#[derive(Clone)]
pub struct BookingService {
    /// Database connection pool for efficient connection management
    db_pool: PgPool,

    /// Storage backend for uploaded attachments
    object_store: Arc<dyn ObjectStore>,
}

impl BookingService {
    /// Creates a new BookingService with the given pool and object store
    pub fn new(db_pool: PgPool, object_store: Arc<dyn ObjectStore>) -> Self {
        Self {
            db_pool,
            object_store,
        }
    }

    /// Creates a new booking for a user, optionally seeding its thread
    ///
    /// New bookings always start in pending status. The booking row and its
    /// seed messages are written in one transaction, so a half-created
    /// booking never becomes visible. A malformed initial messages payload
    /// never fails the creation; the bad batch is logged and skipped.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        request: CreateBookingRequest,
    ) -> BookingServiceResult<Booking> {
        // Validate the request
        request.validate().map_err(|e| {
            BookingServiceError::ValidationError(format!("Invalid booking data: {}", e))
        })?;

        let mut tx = self.db_pool.begin().await?;

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (user_id, service, date)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, service, date, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(&request.service)
        .bind(request.date)
        .fetch_one(&mut *tx)
        .await?;

        // Seed the thread with any initial messages
        let seeds = parse_initial_messages(request.messages.as_deref());
        let mut messages = Vec::with_capacity(seeds.len());
        for content in seeds {
            let message = sqlx::query_as::<_, Message>(
                r#"
                INSERT INTO booking_messages (booking_id, sender, content)
                VALUES ($1, $2, $3)
                RETURNING sender, content, created_at
                "#,
            )
            .bind(row.id)
            .bind(user_id)
            .bind(content)
            .fetch_one(&mut *tx)
            .await?;
            messages.push(message);
        }

        tx.commit().await?;
        Ok(row.into_booking(Vec::new(), messages))
    }

    /// Fetches a single booking with its attachments and thread
    pub async fn get_booking(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> BookingServiceResult<Booking> {
        let row = self.load_booking(booking_id).await?;
        authorize(&row, user_id)?;

        let attachments = self.fetch_attachments(booking_id).await?;
        let messages = self.fetch_messages(booking_id).await?;
        Ok(row.into_booking(attachments, messages))
    }

    /// Lists all of a user's bookings, soonest appointment first
    pub async fn list_bookings(&self, user_id: Uuid) -> BookingServiceResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, service, date, status, created_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let attachments = self.fetch_attachments(row.id).await?;
            let messages = self.fetch_messages(row.id).await?;
            bookings.push(row.into_booking(attachments, messages));
        }

        Ok(bookings)
    }

    /// Stores an uploaded file and appends it to the booking's attachments
    ///
    /// The file only becomes part of the booking after the object store has
    /// accepted it, so a failed upload leaves the aggregate untouched.
    pub async fn add_attachment(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
        filename: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> BookingServiceResult<Attachment> {
        let row = self.load_booking(booking_id).await?;
        authorize(&row, user_id)?;

        if bytes.is_empty() {
            return Err(BookingServiceError::ValidationError(
                "Attachment file is empty".to_string(),
            ));
        }

        let name = object_name(filename, Utc::now());
        let url = self.object_store.put(&name, bytes, content_type).await?;

        let attachment = sqlx::query_as::<_, Attachment>(
            r#"
            INSERT INTO booking_attachments (booking_id, filename, url)
            VALUES ($1, $2, $3)
            RETURNING filename, url, uploaded_at
            "#,
        )
        .bind(booking_id)
        .bind(filename)
        .bind(&url)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(attachment)
    }

    /// Appends a message to the booking's thread
    pub async fn add_message(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
        request: PostMessageRequest,
    ) -> BookingServiceResult<Message> {
        // Content is checked before the booking is even looked up
        request.validate().map_err(|e| {
            BookingServiceError::ValidationError(format!("Invalid message data: {}", e))
        })?;

        let row = self.load_booking(booking_id).await?;
        authorize(&row, user_id)?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO booking_messages (booking_id, sender, content)
            VALUES ($1, $2, $3)
            RETURNING sender, content, created_at
            "#,
        )
        .bind(booking_id)
        .bind(user_id)
        .bind(&request.content)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(message)
    }

    /// Lists the booking's thread with sender identities, oldest first
    pub async fn list_messages(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> BookingServiceResult<Vec<MessageWithSender>> {
        let row = self.load_booking(booking_id).await?;
        authorize(&row, user_id)?;

        let rows = sqlx::query_as::<_, MessageSenderRow>(
            r#"
            SELECT m.sender AS sender_id, u.email AS sender_email, u.phone AS sender_phone,
                   m.content, m.created_at
            FROM booking_messages m
            JOIN users u ON u.id = m.sender
            WHERE m.booking_id = $1
            ORDER BY m.seq
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows.into_iter().map(MessageWithSender::from).collect())
    }

    /// Loads the bare booking row or fails with not-found
    async fn load_booking(&self, booking_id: Uuid) -> BookingServiceResult<BookingRow> {
        sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, service, date, status, created_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(BookingServiceError::BookingNotFound)
    }

    /// Fetches a booking's attachments in upload order
    async fn fetch_attachments(&self, booking_id: Uuid) -> BookingServiceResult<Vec<Attachment>> {
        let attachments = sqlx::query_as::<_, Attachment>(
            r#"
            SELECT filename, url, uploaded_at
            FROM booking_attachments
            WHERE booking_id = $1
            ORDER BY seq
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(attachments)
    }

    /// Fetches a booking's thread in insertion order
    async fn fetch_messages(&self, booking_id: Uuid) -> BookingServiceResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT sender, content, created_at
            FROM booking_messages
            WHERE booking_id = $1
            ORDER BY seq
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(messages)
    }
}

/// Rejects callers that do not own the booking
fn authorize(booking: &BookingRow, user_id: Uuid) -> BookingServiceResult<()> {
    if booking.user_id != user_id {
        return Err(BookingServiceError::NotOwner);
    }
    Ok(())
}

/// Parses the optional initial-messages payload leniently
///
/// The payload is a JSON array of strings. A malformed payload is logged
/// and treated as empty; blank entries are skipped.
fn parse_initial_messages(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(entries) => entries
            .into_iter()
            .filter(|content| !content.trim().is_empty())
            .collect(),
        Err(e) => {
            log::warn!("Ignoring malformed initial messages payload: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingStatus;
    use crate::service::storage::LocalObjectStore;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    async fn create_test_service(pool: PgPool) -> BookingService {
        let root = std::env::temp_dir().join(format!("booking-test-{}", Uuid::new_v4()));
        let store = LocalObjectStore::new(root, "/uploads".to_string());
        store.ensure_root().await.unwrap();
        BookingService::new(pool, Arc::new(store))
    }

    async fn create_user(pool: &PgPool, email: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (email, password_hash) VALUES ($1, 'test-hash') RETURNING id",
        )
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn booking_request(service: &str, date: DateTime<Utc>) -> CreateBookingRequest {
        CreateBookingRequest {
            service: service.to_string(),
            date,
            messages: None,
        }
    }

    #[test]
    fn test_authorize_checks_ownership() {
        let owner = Uuid::new_v4();
        let row = BookingRow {
            id: Uuid::new_v4(),
            user_id: owner,
            service: "haircut".to_string(),
            date: Utc::now(),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };

        assert!(authorize(&row, owner).is_ok());
        assert!(matches!(
            authorize(&row, Uuid::new_v4()),
            Err(BookingServiceError::NotOwner)
        ));
    }

    #[test]
    fn test_parse_initial_messages() {
        assert!(parse_initial_messages(None).is_empty());
        assert_eq!(
            parse_initial_messages(Some("[\"first\", \"second\"]")),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_parse_initial_messages_skips_blanks() {
        assert_eq!(
            parse_initial_messages(Some("[\"  \", \"real\", \"\"]")),
            vec!["real".to_string()]
        );
    }

    #[test]
    fn test_parse_initial_messages_tolerates_garbage() {
        assert!(parse_initial_messages(Some("not json")).is_empty());
        assert!(parse_initial_messages(Some("{\"a\": 1}")).is_empty());
    }

    #[sqlx::test]
    async fn test_create_booking_starts_pending(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(user_id, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        assert_eq!(booking.user_id, user_id);
        assert_eq!(booking.service, "haircut");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.attachments.is_empty());
        assert!(booking.messages.is_empty());
    }

    #[sqlx::test]
    async fn test_create_booking_seeds_thread(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(
                user_id,
                CreateBookingRequest {
                    service: "massage".to_string(),
                    date: Utc::now(),
                    messages: Some("[\"please confirm\", \"payment on arrival\"]".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.messages.len(), 2);
        assert_eq!(booking.messages[0].content, "please confirm");
        assert_eq!(booking.messages[1].content, "payment on arrival");
        assert_eq!(booking.messages[0].sender, user_id);
    }

    #[sqlx::test]
    async fn test_create_booking_survives_malformed_messages(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(
                user_id,
                CreateBookingRequest {
                    service: "massage".to_string(),
                    date: Utc::now(),
                    messages: Some("definitely not json".to_string()),
                },
            )
            .await
            .unwrap();

        assert!(booking.messages.is_empty());
    }

    #[sqlx::test]
    async fn test_create_booking_rolls_back_failed_seed(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        // Postgres rejects NUL bytes in text, so the second seed insert fails.
        let result = service
            .create_booking(
                user_id,
                CreateBookingRequest {
                    service: "massage".to_string(),
                    date: Utc::now(),
                    messages: Some(r#"["please confirm", "bad\u0000seed"]"#.to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(BookingServiceError::DatabaseError(_))));

        // Neither the booking nor the first seed message may survive.
        let bookings = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(bookings, 0);
        let messages = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM booking_messages")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(messages, 0);
    }

    #[sqlx::test]
    async fn test_create_booking_rejects_empty_service(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let result = service
            .create_booking(user_id, booking_request("", Utc::now()))
            .await;
        assert!(matches!(
            result,
            Err(BookingServiceError::ValidationError(_))
        ));

        // Whitespace-only is just as empty.
        let result = service
            .create_booking(user_id, booking_request("   ", Utc::now()))
            .await;
        assert!(matches!(
            result,
            Err(BookingServiceError::ValidationError(_))
        ));
    }

    #[sqlx::test]
    async fn test_get_booking_enforces_ownership(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let owner = create_user(&pool, "owner@example.com").await;
        let other = create_user(&pool, "other@example.com").await;

        let booking = service
            .create_booking(owner, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        let fetched = service.get_booking(owner, booking.id).await.unwrap();
        assert_eq!(fetched.status, BookingStatus::Pending);

        let result = service.get_booking(other, booking.id).await;
        assert!(matches!(result, Err(BookingServiceError::NotOwner)));

        let result = service.get_booking(owner, Uuid::new_v4()).await;
        assert!(matches!(result, Err(BookingServiceError::BookingNotFound)));
    }

    #[sqlx::test]
    async fn test_list_bookings_sorted_by_date(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;
        let other = create_user(&pool, "other@example.com").await;

        let base = Utc::now();
        // Created out of order on purpose.
        service
            .create_booking(user_id, booking_request("second", base + Duration::days(2)))
            .await
            .unwrap();
        service
            .create_booking(user_id, booking_request("first", base + Duration::days(1)))
            .await
            .unwrap();
        service
            .create_booking(user_id, booking_request("third", base + Duration::days(3)))
            .await
            .unwrap();
        service
            .create_booking(other, booking_request("not mine", base))
            .await
            .unwrap();

        let bookings = service.list_bookings(user_id).await.unwrap();
        let services: Vec<&str> = bookings.iter().map(|b| b.service.as_str()).collect();
        assert_eq!(services, vec!["first", "second", "third"]);
    }

    #[sqlx::test]
    async fn test_list_bookings_empty_for_new_user(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        assert!(service.list_bookings(user_id).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn test_add_attachment_appends_in_order(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(user_id, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        let first = service
            .add_attachment(user_id, booking.id, "style.jpg", b"jpeg", "image/jpeg")
            .await
            .unwrap();
        service
            .add_attachment(user_id, booking.id, "notes.pdf", b"pdf", "application/pdf")
            .await
            .unwrap();

        assert_eq!(first.filename, "style.jpg");
        assert!(first.url.starts_with("/uploads/"));

        let fetched = service.get_booking(user_id, booking.id).await.unwrap();
        assert_eq!(fetched.attachments.len(), 2);
        assert_eq!(fetched.attachments[0].filename, "style.jpg");
        assert_eq!(fetched.attachments[1].filename, "notes.pdf");
    }

    #[sqlx::test]
    async fn test_add_attachment_rejects_empty_file(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(user_id, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        let result = service
            .add_attachment(user_id, booking.id, "empty.jpg", b"", "image/jpeg")
            .await;
        assert!(matches!(
            result,
            Err(BookingServiceError::ValidationError(_))
        ));
    }

    #[sqlx::test]
    async fn test_add_attachment_checks_owner_before_content(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let owner = create_user(&pool, "owner@example.com").await;
        let other = create_user(&pool, "other@example.com").await;

        let booking = service
            .create_booking(owner, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        // A non-owner with an empty file hits the ownership wall first.
        let result = service
            .add_attachment(other, booking.id, "empty.jpg", b"", "image/jpeg")
            .await;
        assert!(matches!(result, Err(BookingServiceError::NotOwner)));
    }

    struct FailingStore;

    #[async_trait]
    impl ObjectStore for FailingStore {
        async fn put(&self, _: &str, _: &[u8], _: &str) -> Result<String, ObjectStoreError> {
            Err(ObjectStoreError::Io(std::io::Error::other(
                "disk unplugged",
            )))
        }
    }

    #[sqlx::test]
    async fn test_failed_upload_leaves_booking_untouched(pool: PgPool) {
        let service = BookingService::new(pool.clone(), Arc::new(FailingStore));
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(user_id, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        let result = service
            .add_attachment(user_id, booking.id, "style.jpg", b"jpeg", "image/jpeg")
            .await;
        assert!(matches!(result, Err(BookingServiceError::Storage(_))));

        // No half-recorded attachment may survive the failure.
        let fetched = service.get_booking(user_id, booking.id).await.unwrap();
        assert!(fetched.attachments.is_empty());
    }

    #[sqlx::test]
    async fn test_add_message_and_list_thread(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(user_id, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        service
            .add_message(
                user_id,
                booking.id,
                PostMessageRequest {
                    content: "running late".to_string(),
                },
            )
            .await
            .unwrap();
        service
            .add_message(
                user_id,
                booking.id,
                PostMessageRequest {
                    content: "here now".to_string(),
                },
            )
            .await
            .unwrap();

        let thread = service.list_messages(user_id, booking.id).await.unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].content, "running late");
        assert_eq!(thread[1].content, "here now");
        assert_eq!(thread[0].sender.id, user_id);
        assert_eq!(thread[0].sender.email.as_deref(), Some("owner@example.com"));
    }

    #[sqlx::test]
    async fn test_add_message_checks_content_before_owner(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let owner = create_user(&pool, "owner@example.com").await;
        let other = create_user(&pool, "other@example.com").await;

        let booking = service
            .create_booking(owner, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        // Blank content fails validation before ownership is consulted.
        let result = service
            .add_message(
                other,
                booking.id,
                PostMessageRequest {
                    content: String::new(),
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(BookingServiceError::ValidationError(_))
        ));

        let result = service
            .add_message(
                other,
                booking.id,
                PostMessageRequest {
                    content: "hello".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(BookingServiceError::NotOwner)));
    }

    #[sqlx::test]
    async fn test_concurrent_message_appends_both_persist(pool: PgPool) {
        let service = create_test_service(pool.clone()).await;
        let user_id = create_user(&pool, "owner@example.com").await;

        let booking = service
            .create_booking(user_id, booking_request("haircut", Utc::now()))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            service.add_message(
                user_id,
                booking.id,
                PostMessageRequest {
                    content: "from one side".to_string(),
                },
            ),
            service.add_message(
                user_id,
                booking.id,
                PostMessageRequest {
                    content: "from the other".to_string(),
                },
            ),
        );
        a.unwrap();
        b.unwrap();

        let thread = service.list_messages(user_id, booking.id).await.unwrap();
        let contents: Vec<&str> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(thread.len(), 2);
        assert!(contents.contains(&"from one side"));
        assert!(contents.contains(&"from the other"));
    }
}
