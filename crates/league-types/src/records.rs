//! Record kinds owned by the remote data store.
//!
//! The client never persists these beyond transient view caches. `Team` and
//! `Standing` are read-only here; `Match` is the only kind with a draft.
use std::{collections::HashMap, fmt};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::validation::{require, ValidationError};

/// Server-assigned record identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A record kind stored in one named remote collection.
pub trait Record: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Model name in the remote schema (`Match`, `Team`, ...).
    const COLLECTION: &'static str;
    /// Plural model name; list operations are named after it.
    const PLURAL: &'static str;
    /// Scalar fields read back from the store, `id` first.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> &RecordId;

    /// GraphQL selection set for this record.
    fn selection() -> String {
        Self::FIELDS.join(" ")
    }
}

/// Form-populated input for creating a record of `Self::Record`.
pub trait Draft: Clone + Default + fmt::Debug + Serialize + 'static {
    type Record: Record;

    /// Validate the draft, returning a field->error map.
    fn validate(&self) -> HashMap<String, ValidationError>;

    fn is_complete(&self) -> bool {
        self.validate().is_empty()
    }

    /// Clear every field back to the empty form.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: RecordId,
    pub name: String,
}

impl Record for Team {
    const COLLECTION: &'static str = "Team";
    const PLURAL: &'static str = "Teams";
    const FIELDS: &'static [&'static str] = &["id", "name"];

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// A scheduled fixture between two teams.
///
/// `team1`/`team2` hold display names, not team identities; nothing ties
/// them to the `Team` collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: RecordId,
    pub team1: String,
    pub team2: String,
    /// Calendar date as entered, normally `YYYY-MM-DD`.
    pub date: String,
    /// Kick-off time as entered, normally `HH:MM`.
    pub time: String,
    pub location: String,
}

impl Record for Match {
    const COLLECTION: &'static str = "Match";
    const PLURAL: &'static str = "Matches";
    const FIELDS: &'static [&'static str] = &["id", "team1", "team2", "date", "time", "location"];

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// League table entry for one team. Produced outside this client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: RecordId,
    /// Team display name.
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub points: i32,
}

impl Record for Standing {
    const COLLECTION: &'static str = "Standing";
    const PLURAL: &'static str = "Standings";
    const FIELDS: &'static [&'static str] = &["id", "name", "played", "won", "drawn", "lost", "points"];

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Creation input for a `Match`, bound to the add-match form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDraft {
    pub team1: String,
    pub team2: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl Draft for MatchDraft {
    type Record = Match;

    fn validate(&self) -> HashMap<String, ValidationError> {
        let mut errors = HashMap::new();

        let fields = [
            ("team1", &self.team1),
            ("team2", &self.team2),
            ("date", &self.date),
            ("time", &self.time),
            ("location", &self.location),
        ];
        for (name, value) in fields {
            if let Err(err) = require(value) {
                errors.insert(name.to_string(), err);
            }
        }

        if !errors.contains_key("team1")
            && !errors.contains_key("team2")
            && self.team1.trim().eq_ignore_ascii_case(self.team2.trim())
        {
            errors.insert("team2".to_string(), ValidationError::Other("Teams must differ".to_string()));
        }

        errors
    }
}
