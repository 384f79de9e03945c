//! Booking domain entity

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::support::errors::{DomainError, DomainResult};

pub const MIN_AGE: i32 = 14;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Separator used when the attraction list is stored in a single column.
pub const ATTRACTION_SEPARATOR: char = ',';

/// Park attractions a visitor can book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Attraction {
    #[serde(rename = "Climbing Wall")]
    ClimbingWall,
    #[serde(rename = "Zipline")]
    Zipline,
    #[serde(rename = "Rope Park")]
    RopePark,
    #[serde(rename = "Trampoline Park")]
    TrampolinePark,
}

impl Attraction {
    pub const ALL: [Attraction; 4] = [
        Self::ClimbingWall,
        Self::Zipline,
        Self::RopePark,
        Self::TrampolinePark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClimbingWall => "Climbing Wall",
            Self::Zipline => "Zipline",
            Self::RopePark => "Rope Park",
            Self::TrampolinePark => "Trampoline Park",
        }
    }

    /// Encode an ordered list for the store.
    pub fn join(list: &[Attraction]) -> String {
        list.iter()
            .map(Attraction::as_str)
            .collect::<Vec<_>>()
            .join(&ATTRACTION_SEPARATOR.to_string())
    }

    /// Decode a stored list, keeping the original order.
    pub fn split(encoded: &str) -> DomainResult<Vec<Attraction>> {
        if encoded.trim().is_empty() {
            return Ok(Vec::new());
        }
        encoded
            .split(ATTRACTION_SEPARATOR)
            .map(|part| part.trim().parse())
            .collect()
    }
}

impl fmt::Display for Attraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Attraction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::Validation(format!("Unknown attraction: {}", s)))
    }
}

/// Everything a visitor supplies when booking; also the full-replace payload
/// of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub name: String,
    pub phone: String,
    pub age: i32,
    pub date: NaiveDate,
    pub attractions: Vec<Attraction>,
}

impl BookingDetails {
    /// Check every field invariant, collecting all failures into one message.
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name: must not be empty".to_string());
        }
        if !is_valid_phone(&self.phone) {
            errors.push(format!(
                "phone: must be {}-{} digits",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            ));
        }
        if self.age < MIN_AGE {
            errors.push(format!("age: minimum age is {}", MIN_AGE));
        }
        if self.attractions.is_empty() {
            errors.push("attractions: select at least one attraction".to_string());
        } else if has_duplicates(&self.attractions) {
            errors.push("attractions: each attraction may be selected once".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors.join("; ")))
        }
    }
}

/// A stored booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Store-assigned identifier, never reused
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub age: i32,
    /// Visit date
    pub date: NaiveDate,
    /// Selected attractions in the order they were submitted
    pub attractions: Vec<Attraction>,
}

impl Booking {
    pub fn new(id: i32, details: BookingDetails) -> Self {
        Self {
            id,
            name: details.name,
            phone: details.phone,
            age: details.age,
            date: details.date,
            attractions: details.attractions,
        }
    }

    pub fn details(&self) -> BookingDetails {
        BookingDetails {
            name: self.name.clone(),
            phone: self.phone.clone(),
            age: self.age,
            date: self.date,
            attractions: self.attractions.clone(),
        }
    }
}

/// `^\d{10,15}$`
pub fn is_valid_phone(phone: &str) -> bool {
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&phone.len())
        && phone.bytes().all(|b| b.is_ascii_digit())
}

fn has_duplicates(list: &[Attraction]) -> bool {
    list.iter()
        .enumerate()
        .any(|(i, a)| list[..i].contains(a))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> BookingDetails {
        BookingDetails {
            name: "A B".into(),
            phone: "1234567890".into(),
            age: 20,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            attractions: vec![Attraction::Zipline],
        }
    }

    #[test]
    fn valid_details_pass() {
        assert!(sample_details().validate().is_ok());
    }

    #[test]
    fn phone_pattern_boundaries() {
        assert!(is_valid_phone("1234567890"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("12345 67890"));
        assert!(!is_valid_phone("+1234567890"));
        assert!(!is_valid_phone("12345abcde"));
        assert!(!is_valid_phone(""));
        // non-ASCII digits are not \d in the stored pattern
        assert!(!is_valid_phone("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn age_below_minimum_is_rejected() {
        let mut d = sample_details();
        d.age = 13;
        let err = d.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("age")));

        d.age = MIN_AGE;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut d = sample_details();
        d.name = "   ".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn empty_or_duplicate_attractions_are_rejected() {
        let mut d = sample_details();
        d.attractions.clear();
        assert!(d.validate().is_err());

        d.attractions = vec![Attraction::Zipline, Attraction::RopePark, Attraction::Zipline];
        assert!(d.validate().is_err());
    }

    #[test]
    fn all_failures_are_reported_together() {
        let d = BookingDetails {
            name: String::new(),
            phone: "12".into(),
            age: 3,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            attractions: vec![],
        };
        let DomainError::Validation(msg) = d.validate().unwrap_err() else {
            panic!("expected a validation error");
        };
        for field in ["name", "phone", "age", "attractions"] {
            assert!(msg.contains(field), "missing {field} in {msg}");
        }
    }

    #[test]
    fn attraction_list_keeps_order_through_the_store_encoding() {
        let list = vec![
            Attraction::TrampolinePark,
            Attraction::ClimbingWall,
            Attraction::Zipline,
        ];
        let encoded = Attraction::join(&list);
        assert_eq!(encoded, "Trampoline Park,Climbing Wall,Zipline");
        assert_eq!(Attraction::split(&encoded).unwrap(), list);
    }

    #[test]
    fn unknown_stored_attraction_is_an_error() {
        assert!(Attraction::split("Zipline,Ferris Wheel").is_err());
        assert!(Attraction::split("").unwrap().is_empty());
    }

    #[test]
    fn attraction_serde_uses_display_names() {
        let json = serde_json::to_string(&Attraction::RopePark).unwrap();
        assert_eq!(json, "\"Rope Park\"");
        let parsed: Attraction = serde_json::from_str("\"Climbing Wall\"").unwrap();
        assert_eq!(parsed, Attraction::ClimbingWall);
    }

    #[test]
    fn booking_from_details_roundtrips() {
        let b = Booking::new(7, sample_details());
        assert_eq!(b.id, 7);
        assert_eq!(b.details(), sample_details());
    }
}
