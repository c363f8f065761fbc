use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by an [`crate::storage::EntityStore`] within its own
/// collection. User ids and role ids are independent sequences.
pub type EntityId = u64;

/// The fixed catalog of permission tokens the presentation layer offers.
///
/// The store itself accepts any string; checking a token against this
/// catalog is the caller's concern.
pub const PERMISSION_CATALOG: [&str; 8] = [
    "read:users",
    "write:users",
    "delete:users",
    "read:roles",
    "write:roles",
    "delete:roles",
    "read:settings",
    "write:settings",
];

/// Returns true if `token` is one of the recognized catalog tokens.
pub fn is_cataloged(token: &str) -> bool {
    PERMISSION_CATALOG.contains(&token)
}

/// Account status of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(format!("Unknown status '{}'", other)),
        }
    }
}

/// An ordered set of permission tokens.
///
/// Duplicates are impossible; insertion order is preserved for display.
/// Equality ignores order, so two sets holding the same tokens compare
/// equal regardless of the sequence they were built in. Serializes as a
/// plain JSON array; deserialization drops duplicate tokens, keeping the
/// first occurrence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet {
    tokens: Vec<String>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from tokens, dropping duplicates (first occurrence wins).
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for token in tokens {
            set.insert(token);
        }
        set
    }

    /// Adds a token if it is not already present. Returns whether it was added.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.contains(&token) {
            false
        } else {
            self.tokens.push(token);
            true
        }
    }

    /// Removes a token if present. Returns whether it was removed.
    pub fn remove(&mut self, token: &str) -> bool {
        let len_before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        len_before != self.tokens.len()
    }

    /// Adds the token if absent, removes it if present.
    ///
    /// This is the checkbox semantics of the role editing dialog.
    pub fn toggle(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !self.remove(&token) {
            self.tokens.push(token);
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Tokens in insertion order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Display form: tokens joined with ", ".
    pub fn display(&self) -> String {
        self.tokens.join(", ")
    }
}

impl PartialEq for PermissionSet {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self.tokens.iter().all(|t| other.contains(t))
    }
}

impl Eq for PermissionSet {}

impl From<Vec<String>> for PermissionSet {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        set.tokens
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Contract between a record type and the [`crate::storage::EntityStore`]
/// holding it.
///
/// A `Draft` is the record minus its id; the store assigns the id at
/// creation. A `Patch` carries optional replacements for each field and is
/// shallow-merged over the existing record: present fields replace the old
/// value wholesale, absent fields are kept.
pub trait StoreEntity: Clone {
    type Draft;
    type Patch;

    fn id(&self) -> EntityId;

    /// Materializes a record from a draft under a store-assigned id.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Applies a shallow merge of `patch` over this record.
    fn apply_patch(&mut self, patch: Self::Patch);
}
