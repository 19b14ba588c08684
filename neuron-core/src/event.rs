//! Event types.
//!
//! `Event` is the stored record; `EventDraft` is the set of user-editable
//! fields submitted from the event form, used both to create an event and to
//! replace the editable fields of an existing one.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar_math::{SlotPosition, time_slot_position};
use crate::error::{CalendarError, CalendarResult};

/// A scheduled item on the calendar.
///
/// Serialized with camelCase keys, dates as `YYYY-MM-DD` and times as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hm_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hm_time")]
    pub end_time: Option<NaiveTime>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(default)]
    pub color: EventColor,
    pub created_at: DateTime<Utc>,
}

/// The fixed color palette events can be tagged with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Pink,
}

/// User-editable event fields, as submitted by the event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub color: EventColor,
}

impl EventDraft {
    pub fn new(title: &str, date: NaiveDate) -> Self {
        EventDraft {
            title: title.to_string(),
            date: Some(date),
            ..Default::default()
        }
    }

    /// Check the draft and return its date.
    ///
    /// An end time requires a start time and may not precede it. Equal start
    /// and end times are accepted. Times are compared in whole minutes.
    pub fn validate(&self) -> CalendarResult<NaiveDate> {
        if self.title.trim().is_empty() {
            return Err(CalendarError::Validation("title must not be empty".into()));
        }

        let date = self
            .date
            .ok_or_else(|| CalendarError::Validation("date is required".into()))?;

        match (whole_minutes(self.start_time), whole_minutes(self.end_time)) {
            (None, Some(_)) => Err(CalendarError::Validation(
                "end time requires a start time".into(),
            )),
            (Some(start), Some(end)) if end < start => Err(CalendarError::Validation(format!(
                "end time {} is before start time {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            ))),
            _ => Ok(date),
        }
    }
}

impl From<&Event> for EventDraft {
    /// Prefill the edit form from a stored event.
    fn from(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            date: Some(event.date),
            start_time: event.start_time,
            end_time: event.end_time,
            description: event.description.clone(),
            location: event.location.clone(),
            color: event.color,
        }
    }
}

impl Event {
    /// Build a new event from a draft. Fails if the draft does not validate.
    pub fn from_draft(
        id: String,
        draft: &EventDraft,
        created_at: DateTime<Utc>,
    ) -> CalendarResult<Self> {
        let date = draft.validate()?;

        Ok(Event {
            id,
            title: draft.title.trim().to_string(),
            date,
            start_time: whole_minutes(draft.start_time),
            end_time: whole_minutes(draft.end_time),
            description: normalize_text(draft.description.as_deref()),
            location: normalize_text(draft.location.as_deref()),
            color: draft.color,
            created_at,
        })
    }

    /// Replace every editable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, draft: &EventDraft) -> CalendarResult<()> {
        let updated = Event::from_draft(self.id.clone(), draft, self.created_at)?;
        *self = updated;
        Ok(())
    }

    /// All-day events have no start time.
    pub fn is_all_day(&self) -> bool {
        self.start_time.is_none()
    }

    /// Position on the time axis, or None for all-day events.
    pub fn slot_position(&self) -> Option<SlotPosition> {
        time_slot_position(self.start_time, self.end_time)
    }

    /// Human-readable time span: "09:00 - 09:30", "From 09:00" or "All day".
    pub fn time_label(&self) -> String {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
            (Some(start), None) => format!("From {}", start.format("%H:%M")),
            _ => "All day".to_string(),
        }
    }
}

/// Events are scheduled to the minute; seconds are dropped.
fn whole_minutes(time: Option<NaiveTime>) -> Option<NaiveTime> {
    time.and_then(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0))
}

fn normalize_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_text(value.as_deref()))
}

/// `Option<NaiveTime>` as `"HH:MM"`. Blank strings and null read as `None`;
/// `"HH:MM:SS"` is accepted on read.
mod hm_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid time '{raw}', expected HH:MM")))
    }
}
