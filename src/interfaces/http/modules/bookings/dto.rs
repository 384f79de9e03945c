//! Booking DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::booking::is_valid_phone;
use crate::domain::{Attraction, Booking, BookingDetails};

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("phone must be 10-15 digits".into());
        Err(err)
    }
}

/// Body of `POST /book` and `PUT /bookings/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookingRequest {
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "A B")]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "1234567890")]
    pub phone: String,
    #[validate(range(min = 14, message = "minimum age is 14"))]
    #[schema(example = 20)]
    pub age: i32,
    /// Visit date, `YYYY-MM-DD`
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "select at least one attraction"))]
    pub attractions: Vec<Attraction>,
}

impl From<BookingRequest> for BookingDetails {
    fn from(r: BookingRequest) -> Self {
        Self {
            name: r.name,
            phone: r.phone,
            age: r.age,
            date: r.date,
            attractions: r.attractions,
        }
    }
}

impl From<BookingDetails> for BookingRequest {
    fn from(d: BookingDetails) -> Self {
        Self {
            name: d.name,
            phone: d.phone,
            age: d.age,
            date: d.date,
            attractions: d.attractions,
        }
    }
}

/// A stored booking in API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub age: i32,
    pub date: NaiveDate,
    pub attractions: Vec<Attraction>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            name: b.name,
            phone: b.phone,
            age: b.age,
            date: b.date,
            attractions: b.attractions,
        }
    }
}

impl From<BookingDto> for Booking {
    fn from(b: BookingDto) -> Self {
        Self {
            id: b.id,
            name: b.name,
            phone: b.phone,
            age: b.age,
            date: b.date,
            attractions: b.attractions,
        }
    }
}

/// `{"status": "..."}` acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Id of the created booking (create only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl StatusResponse {
    pub fn ok(id: i32) -> Self {
        Self {
            status: "ok".to_string(),
            id: Some(id),
        }
    }

    pub fn updated() -> Self {
        Self {
            status: "updated".to_string(),
            id: None,
        }
    }
}

/// `{"message": "..."}` acknowledgement for deletes
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    /// Number of removed bookings (delete-all only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}
