//! Dashboard entities as returned by the remote event API.
//!
//! Every entity implements [`Filterable`] so the shared list pipeline can
//! dedupe, search and filter it. Field names follow the API's camelCase JSON.

use crate::error::RecordError;
use chrono::{NaiveDate, NaiveTime};
use expo_admin_core::{Filterable, KeyIndex};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::fmt;

// ============================================================================
// Conferences
// ============================================================================

/// Visibility of a conference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConferenceCategory {
    /// Open to every participant
    Public,
    /// Invitation only
    Private,
}

impl ConferenceCategory {
    /// Category code used by the category filter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for ConferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room a conference takes place in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    /// Room identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// One conference row.
///
/// The API returns a conference once per show date row, so a raw list can
/// hold the same `id` several times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conference {
    /// Natural key
    pub id: String,
    /// Title
    pub title: String,
    /// Speaker name
    pub speaker_name: String,
    /// Free-form speaker biography
    #[serde(default)]
    pub speaker_info: Option<String>,
    /// Day of the conference
    pub show_date: NaiveDate,
    /// Start time of day
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    /// End time of day
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
    /// Room, if one is assigned
    #[serde(default)]
    pub location: Option<RoomRef>,
    /// Seat quota
    pub quota: u32,
    /// Seats still available
    pub remaining_seats: u32,
    /// Seats already reserved
    #[serde(default)]
    pub reserved_count: u32,
    /// Public or private
    pub category: ConferenceCategory,
}

impl Conference {
    /// Whether a participant can still reserve a seat
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.category == ConferenceCategory::Public && self.remaining_seats > 0
    }

    /// Name of the assigned room, if any
    #[must_use]
    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(|room| room.name.as_str())
    }

    /// Checks `remaining_seats <= quota`
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::SeatsExceedQuota`] when the API reports more
    /// remaining seats than the quota.
    pub fn check_seats(&self) -> Result<(), RecordError> {
        if self.remaining_seats > self.quota {
            return Err(RecordError::SeatsExceedQuota {
                id: self.id.clone(),
                remaining: self.remaining_seats,
                quota: self.quota,
            });
        }
        Ok(())
    }

    /// Checks that the conference does not end before it starts
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EndsBeforeStart`] when `end_time < start_time`.
    pub fn check_times(&self) -> Result<(), RecordError> {
        if self.end_time < self.start_time {
            return Err(RecordError::EndsBeforeStart {
                id: self.id.clone(),
                start: self.start_time.format("%H:%M").to_string(),
                end: self.end_time.format("%H:%M").to_string(),
            });
        }
        Ok(())
    }

    /// Runs every record check
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn validate(&self) -> Result<(), RecordError> {
        self.check_seats()?;
        self.check_times()
    }
}

impl Filterable for Conference {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        let mut fields: SmallVec<[&str; 4]> = smallvec![self.title.as_str(), self.speaker_name.as_str()];
        if let Some(name) = self.location_name() {
            fields.push(name);
        }
        fields
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.show_date)
    }

    fn category_code(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
}

/// `HH:MM` or `HH:MM:SS` times of day
mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M:%S"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
            .map_err(|_| de::Error::custom(format!("invalid time of day: {raw}")))
    }
}

// ============================================================================
// Exhibitors, organizers, rooms
// ============================================================================

/// A company exhibiting at the event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibitor {
    /// Natural key
    pub id: String,
    /// Company name
    pub company_name: String,
    /// Contact person
    pub contact_name: String,
    /// Contact email
    pub email: String,
    /// Booth number
    #[serde(default)]
    pub booth: Option<String>,
    /// Exhibitor type code (e.g. `sponsor`, `startup`)
    pub exhibitor_type: String,
    /// Country of origin
    #[serde(default)]
    pub country: Option<String>,
}

impl Filterable for Exhibitor {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        let mut fields: SmallVec<[&str; 4]> = smallvec![
            self.company_name.as_str(),
            self.contact_name.as_str(),
            self.email.as_str(),
        ];
        if let Some(booth) = &self.booth {
            fields.push(booth.as_str());
        }
        fields
    }

    fn category_code(&self) -> Option<&str> {
        Some(self.exhibitor_type.as_str())
    }
}

/// A member of the organizing team
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    /// Natural key
    pub id: String,
    /// Full name
    pub name: String,
    /// Company
    #[serde(default)]
    pub company_name: Option<String>,
    /// Email
    pub email: String,
    /// Role code
    pub role: String,
}

impl Filterable for Organizer {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        let mut fields: SmallVec<[&str; 4]> = smallvec![self.name.as_str(), self.email.as_str()];
        if let Some(company) = &self.company_name {
            fields.push(company.as_str());
        }
        fields
    }

    fn category_code(&self) -> Option<&str> {
        Some(self.role.as_str())
    }
}

/// A room conferences can be held in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Natural key
    pub id: String,
    /// Display name
    pub name: String,
    /// Floor label
    #[serde(default)]
    pub floor: Option<String>,
    /// Seat capacity
    pub capacity: u32,
    /// Room type code (e.g. `auditorium`, `workshop`)
    pub room_type: String,
}

impl Filterable for Room {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        let mut fields: SmallVec<[&str; 4]> = smallvec![self.name.as_str()];
        if let Some(floor) = &self.floor {
            fields.push(floor.as_str());
        }
        fields
    }

    fn category_code(&self) -> Option<&str> {
        Some(self.room_type.as_str())
    }
}

// ============================================================================
// Reservations
// ============================================================================

/// A participant holding a seat in a conference
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Participant identifier
    pub participant_id: String,
    /// Conference identifier
    pub conference_id: String,
}

/// Conference ids a participant has reserved
pub type ReservationSet = KeyIndex<String>;

/// Index a participant's reservations by conference id
#[must_use]
pub fn reservation_set<'a, I>(reservations: I) -> ReservationSet
where
    I: IntoIterator<Item = &'a Reservation>,
{
    reservations
        .into_iter()
        .map(|reservation| reservation.conference_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can unwrap

    use super::*;
    use expo_admin_core::{FilterSpec, filter};
    use serde_json::json;

    fn conference_json() -> serde_json::Value {
        json!({
            "id": "c1",
            "title": "Cold Chain Logistics",
            "speakerName": "Amina Diallo",
            "showDate": "2024-11-20",
            "startTime": "09:30",
            "endTime": "10:15:00",
            "location": { "id": "r1", "name": "Hall B" },
            "quota": 40,
            "remainingSeats": 12,
            "reservedCount": 28,
            "category": "public"
        })
    }

    #[test]
    fn test_conference_deserializes_both_time_forms() {
        let conference: Conference = serde_json::from_value(conference_json()).unwrap();

        assert_eq!(conference.start_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(conference.end_time, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
        assert_eq!(conference.location_name(), Some("Hall B"));
        assert_eq!(conference.speaker_info, None);
        assert!(conference.validate().is_ok());
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let mut raw = conference_json();
        raw["startTime"] = json!("9h30");

        assert!(serde_json::from_value::<Conference>(raw).is_err());
    }

    #[test]
    fn test_bookable_requires_public_and_seats() {
        let mut conference: Conference = serde_json::from_value(conference_json()).unwrap();
        assert!(conference.is_bookable());

        conference.remaining_seats = 0;
        assert!(!conference.is_bookable());

        conference.remaining_seats = 3;
        conference.category = ConferenceCategory::Private;
        assert!(!conference.is_bookable());
    }

    #[test]
    fn test_record_checks() {
        let mut conference: Conference = serde_json::from_value(conference_json()).unwrap();
        conference.remaining_seats = 41;
        assert!(matches!(
            conference.check_seats(),
            Err(RecordError::SeatsExceedQuota { remaining: 41, quota: 40, .. })
        ));

        conference.remaining_seats = 0;
        conference.end_time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(matches!(conference.validate(), Err(RecordError::EndsBeforeStart { .. })));
    }

    #[test]
    fn test_keyword_searches_room_name() {
        let conference: Conference = serde_json::from_value(conference_json()).unwrap();
        let spec = FilterSpec::new().with_keyword("hall b");

        let hits = filter(&[conference], &spec, &|_: &Conference| false);

        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_exhibitor_type_is_category() {
        let exhibitor: Exhibitor = serde_json::from_value(json!({
            "id": "e1",
            "companyName": "Frigo SA",
            "contactName": "Lea Martin",
            "email": "lea@frigo.example",
            "exhibitorType": "sponsor"
        }))
        .unwrap();

        assert_eq!(exhibitor.category_code(), Some("sponsor"));
        assert_eq!(exhibitor.search_fields().len(), 3);
    }

    #[test]
    fn test_reservation_set_indexes_conference_ids() {
        let reservations = vec![
            Reservation {
                participant_id: "p1".to_string(),
                conference_id: "c1".to_string(),
            },
            Reservation {
                participant_id: "p1".to_string(),
                conference_id: "c3".to_string(),
            },
        ];

        let set = reservation_set(&reservations);

        assert_eq!(set.len(), 2);
        assert!(set.contains_key(&"c3".to_string()));
        assert!(!set.contains_key(&"c2".to_string()));
    }
}
