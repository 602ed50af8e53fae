//! Booking Models
//!
//! Booking aggregate data structures, including attachments and the
//! per-booking message thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a booking
///
/// New bookings always start out as `Pending`. The service never moves a
/// booking between statuses on its own; changes only happen through
/// explicit writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting confirmation
    #[default]
    Pending,

    /// Confirmed by the provider
    Confirmed,

    /// Appointment took place
    Completed,

    /// Cancelled before taking place
    Cancelled,
}

/// File attached to a booking
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attachment {
    /// Original filename as uploaded
    pub filename: String,

    /// Public URL where the stored file can be fetched
    pub url: String,

    /// Timestamp when the file was attached
    pub uploaded_at: DateTime<Utc>,
}

/// Message in a booking's conversation thread
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    /// ID of the user who sent the message
    pub sender: Uuid,

    /// Message body
    pub content: String,

    /// Timestamp when the message was sent
    pub created_at: DateTime<Utc>,
}

/// Booking representation for external API responses
///
/// Carries the full aggregate: the booking fields plus its attachments and
/// message thread, both in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: Uuid,

    /// ID of the user who owns the booking
    pub user_id: Uuid,

    /// Name of the booked service
    pub service: String,

    /// Scheduled date and time of the appointment
    pub date: DateTime<Utc>,

    /// Current lifecycle status
    pub status: BookingStatus,

    /// Timestamp when the booking was created
    pub created_at: DateTime<Utc>,

    /// Files attached to the booking, oldest first
    pub attachments: Vec<Attachment>,

    /// Conversation thread, oldest first
    pub messages: Vec<Message>,
}

/// Bare booking row as stored in the bookings table
///
/// The aggregate's child collections live in their own tables, so database
/// reads produce this row first and the service layer assembles the full
/// [`Booking`] from it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service: String,
    pub date: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingRow {
    /// Assemble the full booking aggregate from this row and its children
    pub(crate) fn into_booking(
        self,
        attachments: Vec<Attachment>,
        messages: Vec<Message>,
    ) -> Booking {
        Booking {
            id: self.id,
            user_id: self.user_id,
            service: self.service,
            date: self.date,
            status: self.status,
            created_at: self.created_at,
            attachments,
            messages,
        }
    }
}

/// Sender identity attached to a message in thread listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderProfile {
    /// The sender's user ID
    pub id: Uuid,

    /// The sender's email, if they registered with one
    pub email: Option<String>,

    /// The sender's phone, if they registered with one
    pub phone: Option<String>,
}

/// Message enriched with the sender's profile for thread listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageWithSender {
    /// Who sent the message
    pub sender: SenderProfile,

    /// Message body
    pub content: String,

    /// Timestamp when the message was sent
    pub created_at: DateTime<Utc>,
}

/// Flat join row used when listing a thread with sender identities
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MessageSenderRow {
    pub sender_id: Uuid,
    pub sender_email: Option<String>,
    pub sender_phone: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageSenderRow> for MessageWithSender {
    fn from(row: MessageSenderRow) -> Self {
        MessageWithSender {
            sender: SenderProfile {
                id: row.sender_id,
                email: row.sender_email,
                phone: row.sender_phone,
            },
            content: row.content,
            created_at: row.created_at,
        }
    }
}
