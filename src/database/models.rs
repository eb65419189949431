//! Data models for the record tree

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::utils::{generate_entry_id, uuid_to_hex};
use super::tree::{EntryTree, NodeAction, Traversal};

/// Custom string field attached to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Field name, unique within the entry
    pub name: String,
    /// Field value (may contain references)
    pub value: String,
    /// True if the value should be masked in UI
    #[serde(default)]
    pub protected: bool,
}

/// Credential entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry ID
    #[serde(default = "generate_entry_id")]
    pub uuid: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub notes: String,
    /// Custom string fields, in display order
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
    /// Expiry time, if the entry expires
    #[serde(default)]
    pub expiry_time: Option<DateTime<Utc>>,
}

impl Entry {
    /// Create an entry with a fresh ID and the given title
    pub fn new(title: &str) -> Self {
        Self {
            uuid: generate_entry_id(),
            title: title.to_string(),
            username: String::new(),
            url: String::new(),
            password: String::new(),
            notes: String::new(),
            custom_fields: Vec::new(),
            expiry_time: None,
        }
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    /// Add or replace a custom field
    pub fn with_custom_field(mut self, name: &str, value: &str, protected: bool) -> Self {
        self.custom_fields.retain(|f| f.name != name);
        self.custom_fields.push(CustomField {
            name: name.to_string(),
            value: value.to_string(),
            protected,
        });
        self
    }

    pub fn with_expiry(mut self, expiry_time: DateTime<Utc>) -> Self {
        self.expiry_time = Some(expiry_time);
        self
    }

    /// ID in reference form (32 upper-case hex digits)
    pub fn uuid_hex(&self) -> String {
        uuid_to_hex(&self.uuid)
    }

    /// Get a custom field value by name
    pub fn custom_field(&self, name: &str) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Check if the entry has expired at the given time
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_time.is_some_and(|t| t <= now)
    }
}

/// Group of entries and subgroups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default = "generate_entry_id")]
    pub uuid: Uuid,
    pub name: String,
    /// Child entries, in display order
    #[serde(default)]
    pub entries: Vec<Entry>,
    /// Child groups, in display order
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self {
            uuid: generate_entry_id(),
            name: name.to_string(),
            entries: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Find an entry anywhere below this group by ID
    pub fn find_entry(&self, uuid: &Uuid) -> Option<&Entry> {
        let mut found = None;
        self.traverse(&mut |entry| {
            if entry.uuid == *uuid {
                found = Some(entry);
                NodeAction::Stop
            } else {
                NodeAction::Continue
            }
        });
        found
    }

    /// Depth-first walk: own entries first, then each subgroup in order
    pub(crate) fn walk<'a>(
        &'a self,
        visitor: &mut dyn FnMut(&'a Entry) -> NodeAction,
    ) -> Traversal {
        for entry in &self.entries {
            match visitor(entry) {
                NodeAction::Continue => {}
                NodeAction::Stop => return Traversal::Stopped,
                NodeAction::Abort => return Traversal::Aborted,
            }
        }
        for group in &self.groups {
            match group.walk(visitor) {
                Traversal::Completed => {}
                other => return other,
            }
        }
        Traversal::Completed
    }
}

/// Read-only snapshot of a record database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    /// Root group; `None` while nothing is loaded
    #[serde(default)]
    pub root: Option<Group>,
}

impl Database {
    pub fn new(name: &str, root: Group) -> Self {
        Self {
            name: name.to_string(),
            root: Some(root),
        }
    }

    /// Database without a root group
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            root: None,
        }
    }

    pub fn root_group(&self) -> Option<&Group> {
        self.root.as_ref()
    }

    /// Find an entry by ID
    pub fn entry_by_id(&self, uuid: &Uuid) -> Option<&Entry> {
        self.root_group()?.find_entry(uuid)
    }

    /// Load a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
