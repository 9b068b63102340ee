//! Records served by the school backend: classes, subjects, and the DSKP
//! curriculum items attached to each subject.
//!
//! The backend owns every identifier; the client treats them as opaque
//! strings and never mints its own.

use serde::{Deserialize, Serialize};

pub mod api;

pub use api::{ApiError, SchoolApi};

/// Identifier of a class, issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    /// Borrow the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClassId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a subject, issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Borrow the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SubjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a curriculum item, issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Borrow the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A class as served by the backend. Read-only on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: ClassId,
    pub name: String,
    pub year: String,
}

/// A subject belonging to one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub class_id: ClassId,
    pub name: String,
}

/// One DSKP curriculum item: a content standard (SK) paired with a
/// learning standard (SP).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DskpItem {
    pub id: ItemId,
    pub subject_id: SubjectId,
    pub sk: String,
    pub sp: String,
}

/// An SK/SP pair not yet persisted: extraction output or an AI suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DskpDraft {
    pub sk: String,
    pub sp: String,
}
