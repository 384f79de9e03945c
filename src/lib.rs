//! # Extreme Park booking service
//!
//! HTTP API that stores visit bookings for the park's attractions and checks
//! an admin password against a configured bcrypt hash.
//!
//! ## Architecture
//!
//! - **domain**: the booking entity, its invariants and the repository trait
//! - **application**: booking use-cases and the admin credential check
//! - **infrastructure**: SeaORM/SQLite persistence and password hashing
//! - **interfaces**: axum router, DTOs and handlers with Swagger documentation
//! - **server**: process bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmBookingRepository};

// Re-export API router
pub use interfaces::http::create_api_router;
