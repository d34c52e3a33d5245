//! Event and guest endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use crate::handlers::AppState;
use crate::models::event::{
    CreateEventRequest, CreateGuestRequest, Event, EventGuest, EventResponse, EventStatus,
    EventType, RsvpStatus, UpdateEventRequest,
};
use crate::utils::errors::{AppError, Result, ValidationErrors};
use crate::utils::helpers::is_valid_email;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/events/", get(list_events).post(create_event))
        .route(
            "/api/events/:id/",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/api/events/:id/guests/", get(list_guests).post(create_guest))
        .route("/api/events/:id/guests/:guest_id/", delete(delete_guest))
}

/// Incoming event payload. Presence is checked here so a missing field
/// turns into a field error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub budget: Option<f64>,
    pub attendees_count: Option<i32>,
    pub organizer_id: Option<i64>,
}

impl EventPayload {
    fn validate_create(self) -> Result<CreateEventRequest> {
        let mut errors = ValidationErrors::new();

        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            errors.add("title", "This field is required");
        }
        match self.event_type.as_deref() {
            None => errors.add("event_type", "This field is required"),
            Some(ty) => {
                if let Err(msg) = ty.parse::<EventType>() {
                    errors.add("event_type", msg);
                }
            }
        }
        if let Some(status) = self.status.as_deref() {
            if let Err(msg) = status.parse::<EventStatus>() {
                errors.add("status", msg);
            }
        }
        if self.date.is_none() {
            errors.add("date", "This field is required");
        }
        if self.location.as_deref().map_or(true, |l| l.trim().is_empty()) {
            errors.add("location", "This field is required");
        }
        if self.organizer_id.is_none() {
            errors.add("organizer_id", "This field is required");
        }

        errors.into_result()?;

        Ok(CreateEventRequest {
            title: self.title.unwrap_or_default(),
            description: self.description,
            event_type: self.event_type.unwrap_or_default(),
            status: self.status,
            date: self.date.unwrap_or_else(Utc::now),
            location: self.location.unwrap_or_default(),
            budget: self.budget,
            attendees_count: self.attendees_count,
            organizer_id: self.organizer_id.unwrap_or_default(),
        })
    }
}

fn validate_update(request: &UpdateEventRequest) -> Result<()> {
    let mut errors = ValidationErrors::new();

    if let Some(ty) = request.event_type.as_deref() {
        if let Err(msg) = ty.parse::<EventType>() {
            errors.add("event_type", msg);
        }
    }
    if let Some(status) = request.status.as_deref() {
        if let Err(msg) = status.parse::<EventStatus>() {
            errors.add("status", msg);
        }
    }

    errors.into_result()
}

/// Attach guest lists to a page of events with one batched query.
fn zip_guests(events: Vec<Event>, guests: Vec<EventGuest>) -> Vec<EventResponse> {
    let mut by_event: HashMap<i64, Vec<EventGuest>> = HashMap::new();
    for guest in guests {
        by_event.entry(guest.event_id).or_default().push(guest);
    }

    events
        .into_iter()
        .map(|event| {
            let guests = by_event.remove(&event.id).unwrap_or_default();
            EventResponse { event, guests }
        })
        .collect()
}

pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventResponse>>> {
    let events = state.db.events.list().await?;
    let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
    let guests = state.db.events.guests_for_events(&ids).await?;

    Ok(Json(zip_guests(events, guests)))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<EventResponse>)> {
    let request = payload.validate_create()?;

    let organizer_id = request.organizer_id;
    if state.db.users.find_by_id(organizer_id).await?.is_none() {
        return Err(AppError::invalid_field(
            "organizer_id",
            format!("Invalid organizer: {organizer_id}"),
        ));
    }

    let event = state.db.events.create(request).await?;
    crate::utils::logging::log_write("event", event.id, "create");

    Ok((
        StatusCode::CREATED,
        Json(EventResponse { event, guests: Vec::new() }),
    ))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EventResponse>> {
    let event = state
        .db
        .events
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    let guests = state.db.events.guests_for_event(id).await?;

    Ok(Json(EventResponse { event, guests }))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>> {
    validate_update(&request)?;

    if state.db.events.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Event", id));
    }

    let event = state.db.events.update(id, request).await?;
    let guests = state.db.events.guests_for_event(id).await?;
    crate::utils::logging::log_write("event", id, "update");

    Ok(Json(EventResponse { event, guests }))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = state.db.events.delete(id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("Event", id));
    }
    crate::utils::logging::log_write("event", id, "delete");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct GuestPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<String>,
}

impl GuestPayload {
    fn validate(self) -> Result<CreateGuestRequest> {
        let mut errors = ValidationErrors::new();

        if self.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            errors.add("name", "This field is required");
        }
        match self.email.as_deref() {
            None => errors.add("email", "This field is required"),
            Some(email) if !is_valid_email(email) => {
                errors.add("email", "Enter a valid email address");
            }
            _ => {}
        }
        if let Some(status) = self.rsvp_status.as_deref() {
            if let Err(msg) = status.parse::<RsvpStatus>() {
                errors.add("rsvp_status", msg);
            }
        }

        errors.into_result()?;

        Ok(CreateGuestRequest {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone,
            rsvp_status: self.rsvp_status,
        })
    }
}

pub async fn list_guests(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<EventGuest>>> {
    if state.db.events.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Event", id));
    }

    Ok(Json(state.db.events.guests_for_event(id).await?))
}

pub async fn create_guest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<GuestPayload>,
) -> Result<(StatusCode, Json<EventGuest>)> {
    let request = payload.validate()?;

    if state.db.events.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Event", id));
    }

    let guest = state.db.events.add_guest(id, request).await?;

    Ok((StatusCode::CREATED, Json(guest)))
}

pub async fn delete_guest(
    State(state): State<AppState>,
    Path((id, guest_id)): Path<(i64, i64)>,
) -> Result<StatusCode> {
    let deleted = state.db.events.delete_guest(id, guest_id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("Guest", guest_id));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn event_row(id: i64) -> Event {
        Event {
            id,
            title: format!("Event {id}"),
            description: String::new(),
            event_type: "wedding".to_string(),
            status: "planning".to_string(),
            date: Utc::now(),
            location: "Mumbai".to_string(),
            budget: None,
            attendees_count: 0,
            organizer_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn guest_row(id: i64, event_id: i64) -> EventGuest {
        EventGuest {
            id,
            event_id,
            name: format!("Guest {id}"),
            email: "guest@example.com".to_string(),
            phone: None,
            rsvp_status: "pending".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn guest_payload_rejects_invalid_rsvp_status() {
        let payload = GuestPayload {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: None,
            rsvp_status: Some("maybe".to_string()),
        };

        match payload.validate() {
            Err(AppError::Validation(fields)) => {
                assert!(fields.contains_key("rsvp_status"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn guest_payload_defaults_rsvp_to_none() {
        let payload = GuestPayload {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: None,
            rsvp_status: None,
        };

        let request = payload.validate().unwrap();
        assert!(request.rsvp_status.is_none());
    }

    #[test]
    fn event_payload_collects_all_missing_fields() {
        let payload = EventPayload {
            title: None,
            description: None,
            event_type: Some("gala".to_string()),
            status: None,
            date: None,
            location: None,
            budget: None,
            attendees_count: None,
            organizer_id: None,
        };

        match payload.validate_create() {
            Err(AppError::Validation(fields)) => {
                for field in ["title", "event_type", "date", "location", "organizer_id"] {
                    assert!(fields.contains_key(field), "missing error for {field}");
                }
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn event_update_rejects_bad_status() {
        let request = UpdateEventRequest {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert_matches!(validate_update(&request), Err(AppError::Validation(_)));
    }

    #[test]
    fn event_update_accepts_partial_payload() {
        let request = UpdateEventRequest {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert_matches!(validate_update(&request), Ok(()));
    }

    #[test]
    fn zip_guests_matches_guests_to_events() {
        let events = vec![event_row(1), event_row(2)];
        let guests = vec![guest_row(10, 1), guest_row(11, 1), guest_row(12, 2)];

        let responses = zip_guests(events, guests);

        assert_eq!(responses[0].guests.len(), 2);
        assert_eq!(responses[1].guests.len(), 1);
    }

    #[test]
    fn zip_guests_leaves_guestless_events_empty() {
        let responses = zip_guests(vec![event_row(1)], Vec::new());
        assert!(responses[0].guests.is_empty());
    }
}
