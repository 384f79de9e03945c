//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    Set, SqlErr,
};

use crate::domain::booking::{Attraction, Booking, BookingDetails, BookingRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let date = NaiveDate::parse_from_str(&m.date, DATE_FORMAT).map_err(|e| {
        DomainError::Storage(format!("Booking {} has unreadable date {:?}: {}", m.id, m.date, e))
    })?;
    let attractions = Attraction::split(&m.attractions).map_err(|e| {
        DomainError::Storage(format!("Booking {} has unreadable attractions: {}", m.id, e))
    })?;

    Ok(Booking {
        id: m.id,
        name: m.name,
        phone: m.phone,
        age: m.age,
        date,
        attractions,
    })
}

fn active_model(id: Option<i32>, d: BookingDetails) -> booking::ActiveModel {
    booking::ActiveModel {
        id: id.map(Set).unwrap_or(NotSet),
        name: Set(d.name),
        phone: Set(d.phone),
        age: Set(d.age),
        date: Set(d.date.format(DATE_FORMAT).to_string()),
        attractions: Set(Attraction::join(&d.attractions)),
    }
}

fn db_err(e: DbErr) -> DomainError {
    let is_constraint = matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || e.to_string().contains("constraint failed");
    if is_constraint {
        DomainError::Conflict(e.to_string())
    } else {
        DomainError::Storage(format!("Database error: {}", e))
    }
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, details: BookingDetails) -> DomainResult<Booking> {
        let model = active_model(None, details)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        debug!("Inserted booking: {}", model.id);
        model_to_domain(model)
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        booking::Entity::find()
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn replace(&self, id: i32, details: BookingDetails) -> DomainResult<Booking> {
        debug!("Replacing booking: {}", id);

        match active_model(Some(id), details).update(&self.db).await {
            Ok(model) => model_to_domain(model),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::booking_not_found(id)),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::booking_not_found(id));
        }
        debug!("Deleted booking: {}", id);
        Ok(())
    }

    async fn delete_all(&self) -> DomainResult<u64> {
        let result = booking::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        debug!("Deleted {} bookings", result.rows_affected);
        Ok(result.rows_affected)
    }
}

// ── Tests ──────────────────────────────────────────────────────
