use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_RECENCY_WINDOW_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedParticipants {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub time: String,
    pub location: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online_meeting: Option<bool>,
    pub preparation: String,
    pub host: String,
    pub participants: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_participants: Option<DetailedParticipants>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
}

/// Raw form values for creating or editing an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub time: String,
    pub location: String,
    pub content: String,
    pub preparation: String,
    pub host: String,
    pub participants: String,
}

impl Event {
    /// Builds a new event with a generated id, stamped with `now_ms`.
    pub fn create(fields: EventFields, now_ms: i64) -> Self {
        Self::with_id(generate_event_id(), fields, Some(now_ms))
    }

    pub fn with_id(id: String, fields: EventFields, last_modified: Option<i64>) -> Self {
        Self {
            id,
            time: fields.time,
            location: fields.location,
            content: fields.content,
            is_online_meeting: None,
            preparation: fields.preparation,
            host: fields.host,
            participants: fields.participants,
            detailed_participants: None,
            last_modified,
        }
    }

    pub fn fields(&self) -> EventFields {
        EventFields {
            time: self.time.clone(),
            location: self.location.clone(),
            content: self.content.clone(),
            preparation: self.preparation.clone(),
            host: self.host.clone(),
            participants: self.participants.clone(),
        }
    }

    /// Overwrites the editable text fields, leaving id, flags and timestamp alone.
    pub fn apply_fields(&mut self, fields: EventFields) {
        self.time = fields.time;
        self.location = fields.location;
        self.content = fields.content;
        self.preparation = fields.preparation;
        self.host = fields.host;
        self.participants = fields.participants;
    }

    pub fn is_online(&self) -> bool {
        self.is_online_meeting.unwrap_or(false)
    }

    /// True when the last modification happened less than `window_ms` before `now_ms`.
    ///
    /// Events that were never stamped are never flagged.
    pub fn is_recently_changed(&self, now_ms: i64, window_ms: i64) -> bool {
        self.last_modified
            .map(|modified| now_ms - modified < window_ms)
            .unwrap_or(false)
    }
}

pub fn generate_event_id() -> String {
    format!("event-{}", Uuid::new_v4())
}
