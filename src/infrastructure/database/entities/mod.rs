//! Database entities module

pub mod booking;

pub use booking::Entity as Booking;
