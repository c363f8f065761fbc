use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{EntityId, PermissionSet, StoreEntity};

/// Attribute key the role editor populates with an access tier label.
pub const ACCESS_LEVEL_ATTR: &str = "accessLevel";

/// A role record: a named bundle of permission tokens plus an open
/// attribute map for presentation metadata such as the access level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    pub permissions: PermissionSet,
    #[serde(rename = "customAttributes", default)]
    pub custom_attributes: BTreeMap<String, String>,
}

impl Role {
    /// The `accessLevel` attribute, if set.
    pub fn access_level(&self) -> Option<&str> {
        self.custom_attributes
            .get(ACCESS_LEVEL_ATTR)
            .map(String::as_str)
    }

    /// Inserts or overwrites a custom attribute.
    pub fn set_custom_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom_attributes.insert(key.into(), value.into());
    }

    pub fn has_permission(&self, token: &str) -> bool {
        self.permissions.contains(token)
    }
}

/// All role fields except the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    pub permissions: PermissionSet,
    #[serde(rename = "customAttributes", default)]
    pub custom_attributes: BTreeMap<String, String>,
}

impl RoleDraft {
    /// New draft with no permissions and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: PermissionSet::new(),
            custom_attributes: BTreeMap::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_access_level(mut self, level: impl Into<String>) -> Self {
        self.custom_attributes
            .insert(ACCESS_LEVEL_ATTR.to_string(), level.into());
        self
    }
}

/// Partial update for a [`Role`]. A set `permissions` or
/// `custom_attributes` field replaces the old collection wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePatch {
    pub name: Option<String>,
    pub permissions: Option<PermissionSet>,
    #[serde(rename = "customAttributes")]
    pub custom_attributes: Option<BTreeMap<String, String>>,
}

impl RolePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn custom_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.custom_attributes = Some(attributes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.permissions.is_none() && self.custom_attributes.is_none()
    }
}

impl StoreEntity for Role {
    type Draft = RoleDraft;
    type Patch = RolePatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: RoleDraft) -> Self {
        Self {
            id,
            name: draft.name,
            permissions: draft.permissions,
            custom_attributes: draft.custom_attributes,
        }
    }

    fn apply_patch(&mut self, patch: RolePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = permissions;
        }
        if let Some(attributes) = patch.custom_attributes {
            self.custom_attributes = attributes;
        }
    }
}
