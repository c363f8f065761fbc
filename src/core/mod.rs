pub mod error;
pub mod role;
pub mod types;
pub mod user;

pub use error::{DashboardError, Result};
pub use role::{ACCESS_LEVEL_ATTR, Role, RoleDraft, RolePatch};
pub use types::{EntityId, PERMISSION_CATALOG, PermissionSet, StoreEntity, UserStatus, is_cataloged};
pub use user::{User, UserDraft, UserPatch};
