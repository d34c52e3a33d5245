//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod location;
pub mod media;
pub mod user;
pub mod venue;

// Re-export commonly used models
pub use event::{
    CreateEventRequest, CreateGuestRequest, Event, EventGuest, EventResponse, EventStatus,
    EventType, RsvpStatus, UpdateEventRequest,
};
pub use location::{CreateLocationRequest, Location};
pub use media::{
    CreateMediaUploadRequest, MediaType, MediaUpload, MediaUploadResponse,
    UpdateMediaUploadRequest,
};
pub use user::{
    LoginRequest, RegisterUserRequest, UpdateUserRequest, User, UserResponse, UserRole,
};
pub use venue::{
    CreateVenueDetailsRequest, CreateVenueRequest, UpdateVenueRequest, Venue, VenueDetails,
};
