//! Booking service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here. Every write is
//! validated before it reaches the repository; the store's own constraints
//! are a second line behind this.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Booking, BookingDetails, BookingRepository, DomainError, DomainResult};

pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new booking
    pub async fn create(&self, details: BookingDetails) -> DomainResult<Booking> {
        details.validate().inspect_err(|e| {
            warn!("Rejected booking request: {}", e);
        })?;

        let booking = self.repo.create(details).await?;
        info!("Booking {} created for {}", booking.id, booking.date);
        Ok(booking)
    }

    pub async fn list(&self) -> DomainResult<Vec<Booking>> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Booking> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::booking_not_found(id))
    }

    /// Replace every field of booking `id`
    pub async fn update(&self, id: i32, details: BookingDetails) -> DomainResult<Booking> {
        details.validate().inspect_err(|e| {
            warn!("Rejected update of booking {}: {}", id, e);
        })?;

        let booking = self.repo.replace(id, details).await?;
        info!("Booking {} updated", id);
        Ok(booking)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repo.delete(id).await?;
        info!("Booking {} deleted", id);
        Ok(())
    }

    /// Remove every booking. Returns the number removed.
    pub async fn delete_all(&self) -> DomainResult<u64> {
        let removed = self.repo.delete_all().await?;
        info!("All bookings deleted ({} rows)", removed);
        Ok(removed)
    }
}
