//! Application layer: booking use-cases and the admin credential check

pub mod admin_auth;
pub mod booking_service;

pub use admin_auth::AdminAuthenticator;
pub use booking_service::BookingService;
