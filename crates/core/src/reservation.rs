//! Table reservations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, ReservationId, ReservationStatus};

/// Largest party the booking form accepts.
pub const MAX_GUESTS: u8 = 20;

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    pub guests: u8,
    pub occasion: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// A booking request from the public form.
///
/// There is no status field: every new reservation is stored as pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    #[serde(default = "default_guests")]
    pub guests: u8,
    #[serde(default = "default_occasion")]
    pub occasion: String,
}

const fn default_guests() -> u8 {
    2
}

fn default_occasion() -> String {
    "Dinner".to_owned()
}

/// Why a booking request was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("name is required")]
    MissingName,
    #[error("phone is required")]
    MissingPhone,
    #[error("guests must be between 1 and {MAX_GUESTS}, got {0}")]
    Guests(u8),
}

impl NewReservation {
    /// Check the request before it is stored; trims name and phone.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validated(mut self) -> Result<Self, ReservationError> {
        self.name = self.name.trim().to_owned();
        self.phone = self.phone.trim().to_owned();
        self.occasion = self.occasion.trim().to_owned();

        if self.name.is_empty() {
            return Err(ReservationError::MissingName);
        }
        if self.phone.is_empty() {
            return Err(ReservationError::MissingPhone);
        }
        if !(1..=MAX_GUESTS).contains(&self.guests) {
            return Err(ReservationError::Guests(self.guests));
        }
        if self.occasion.is_empty() {
            self.occasion = default_occasion();
        }
        Ok(self)
    }

    /// The stored record once the store has assigned an id.
    #[must_use]
    pub fn into_reservation(self, id: ReservationId, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            date: self.date,
            time: self.time,
            guests: self.guests,
            occasion: self.occasion,
            status: ReservationStatus::Pending,
            created_at,
        }
    }
}

/// `HH:MM` on the wire; `HH:MM:SS` is also accepted.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(guests: u8) -> NewReservation {
        NewReservation {
            name: " Rita ".to_owned(),
            email: Email::parse("rita@example.pt").unwrap(),
            phone: "912000111".to_owned(),
            date: NaiveDate::from_ymd_opt(2026, 11, 6).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            guests,
            occasion: String::new(),
        }
    }

    #[test]
    fn test_defaults_from_form_json() {
        let parsed: NewReservation = serde_json::from_str(
            r#"{"name":"Rita","email":"rita@example.pt","phone":"91","date":"2026-11-06","time":"19:30"}"#,
        )
        .unwrap();
        assert_eq!(parsed.guests, 2);
        assert_eq!(parsed.occasion, "Dinner");
        assert_eq!(parsed.time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
    }

    #[test]
    fn test_guest_bounds() {
        assert!(request(1).validated().is_ok());
        assert!(request(MAX_GUESTS).validated().is_ok());
        assert_eq!(request(0).validated(), Err(ReservationError::Guests(0)));
        assert_eq!(request(21).validated(), Err(ReservationError::Guests(21)));
    }

    #[test]
    fn test_validated_trims_and_defaults_occasion() {
        let ok = request(4).validated().unwrap();
        assert_eq!(ok.name, "Rita");
        assert_eq!(ok.occasion, "Dinner");

        let mut blank = request(4);
        blank.phone = "  ".to_owned();
        assert_eq!(blank.validated(), Err(ReservationError::MissingPhone));
    }

    #[test]
    fn test_new_reservation_is_always_pending() {
        let stored = request(2)
            .validated()
            .unwrap()
            .into_reservation(ReservationId::new(1), Utc::now());
        assert_eq!(stored.status, ReservationStatus::Pending);
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["time"], "19:30");
    }
}
