//! Bookings module: create, list, replace, delete

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
