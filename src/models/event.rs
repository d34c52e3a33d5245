//! Event and guest models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub status: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub budget: Option<f64>,
    pub attendees_count: i32,
    pub organizer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventGuest {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub rsvp_status: String,
    pub created_at: DateTime<Utc>,
}

/// Event as served over the API: the row plus its guest list.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub guests: Vec<EventGuest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub status: Option<String>,
    pub date: DateTime<Utc>,
    pub location: String,
    pub budget: Option<f64>,
    pub attendees_count: Option<i32>,
    pub organizer_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub budget: Option<f64>,
    pub attendees_count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuestRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub rsvp_status: Option<String>,
}

/// Allowed `event_type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Wedding,
    Birthday,
    Corporate,
    Anniversary,
    Festival,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Wedding,
        EventType::Birthday,
        EventType::Corporate,
        EventType::Anniversary,
        EventType::Festival,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "wedding",
            EventType::Birthday => "birthday",
            EventType::Corporate => "corporate",
            EventType::Anniversary => "anniversary",
            EventType::Festival => "festival",
            EventType::Other => "other",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wedding" => Ok(EventType::Wedding),
            "birthday" => Ok(EventType::Birthday),
            "corporate" => Ok(EventType::Corporate),
            "anniversary" => Ok(EventType::Anniversary),
            "festival" => Ok(EventType::Festival),
            "other" => Ok(EventType::Other),
            _ => Err(format!("\"{s}\" is not a valid event type")),
        }
    }
}

/// Allowed event `status` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Planning,
    Confirmed,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planning => "planning",
            EventStatus::Confirmed => "confirmed",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(EventStatus::Planning),
            "confirmed" => Ok(EventStatus::Confirmed),
            "ongoing" => Ok(EventStatus::Ongoing),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            _ => Err(format!("\"{s}\" is not a valid event status")),
        }
    }
}

/// Allowed guest `rsvp_status` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpStatus {
    Pending,
    Accepted,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Accepted => "accepted",
            RsvpStatus::Declined => "declined",
        }
    }
}

impl FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RsvpStatus::Pending),
            "accepted" => Ok(RsvpStatus::Accepted),
            "declined" => Ok(RsvpStatus::Declined),
            _ => Err(format!("\"{s}\" is not a valid RSVP status")),
        }
    }
}
