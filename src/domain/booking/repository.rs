//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingDetails};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking; the store assigns the id
    async fn create(&self, details: BookingDetails) -> DomainResult<Booking>;

    /// All bookings in insertion (id) order
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// Overwrite every field of an existing booking.
    /// Fails with `NotFound` if the id does not exist.
    async fn replace(&self, id: i32, details: BookingDetails) -> DomainResult<Booking>;

    /// Delete one booking. Fails with `NotFound` if the id does not exist.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Delete every booking, returning how many rows were removed
    async fn delete_all(&self) -> DomainResult<u64>;
}
