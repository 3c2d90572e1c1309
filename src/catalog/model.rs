//! Catalog data model.
//!
//! Everything here is loaded once at startup and never mutated. Field names
//! match the TOML layout of `assets/catalog.toml`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which side of the consultation the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
    Doctor,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }

    /// Heading for the contact list shown to this role.
    pub fn contacts_title(self) -> &'static str {
        match self {
            Role::Patient => "Doctors",
            Role::Doctor => "Patients",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(format!("unknown role '{}' (expected patient or doctor)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
}

/// A display grouping of symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyArea {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Online,
    Offline,
}

/// A counterpart with whom a message thread exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    /// Medical specialty for doctors, care context for patients.
    pub specialty: String,
    #[serde(default)]
    pub avatar_ref: String,
    pub status: ContactStatus,
    pub last_seen: DateTime<Utc>,
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
    Prescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub filename: String,
    pub url_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    #[serde(default)]
    pub read: bool,
}

/// The signed-in user for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Users {
    pub patient: UserProfile,
    pub doctor: UserProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contacts {
    #[serde(default)]
    pub patient: Vec<Contact>,
    #[serde(default)]
    pub doctor: Vec<Contact>,
}

/// Root of the catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub users: Users,
    #[serde(default)]
    pub body_areas: Vec<BodyArea>,
    #[serde(default)]
    pub contacts: Contacts,
    /// Contact id to the messages exchanged with that contact, oldest first.
    #[serde(default)]
    pub threads: HashMap<String, Vec<Message>>,
}
