//! Booking aggregate
//!
//! Contains the Booking entity, its field invariants, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{is_valid_phone, Attraction, Booking, BookingDetails, MIN_AGE};
pub use repository::BookingRepository;
