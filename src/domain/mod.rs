//! Domain layer: the Booking aggregate and its repository port

pub mod booking;

pub use booking::{Attraction, Booking, BookingDetails, BookingRepository};

pub use crate::support::errors::{DomainError, DomainResult};
