// ============================================================================
// RbacBoard Library
// ============================================================================

//! In-memory data core for an RBAC administration dashboard.
//!
//! The crate keeps two collections, users and roles, in insertion-ordered
//! in-memory stores, runs a deterministic filter/search/paginate pipeline
//! over them, and persists every mutation as a whole-collection JSON
//! document through a pluggable key-value backend. Persistence is
//! best-effort: mutations succeed in memory first and background saves
//! never roll them back.
//!
//! # Examples
//!
//! ```
//! use rbacboard::{Dashboard, MemoryBackend, RoleFilter, UserDraft};
//!
//! # tokio_test::block_on(async {
//! // An empty backend starts from the seed data: three users, three roles.
//! let mut dashboard = Dashboard::open(MemoryBackend::new()).await;
//! assert_eq!(dashboard.users().len(), 3);
//!
//! let created = dashboard.create_user(UserDraft::new(
//!     "Alice Brown",
//!     "alice@example.com",
//!     "Editor",
//! ));
//! assert_eq!(created.id, 4);
//!
//! let page = dashboard.list_users("alice", &RoleFilter::All, 1);
//! assert_eq!(page.total_matching, 1);
//!
//! // Saves run in the background; flush before dropping the backend.
//! dashboard.flush().await;
//! # });
//! ```

pub mod auth;
pub mod core;
pub mod dashboard;
pub mod persist;
pub mod query;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{
    ACCESS_LEVEL_ATTR, DashboardError, EntityId, PERMISSION_CATALOG, PermissionSet, Result, Role,
    RoleDraft, RolePatch, StoreEntity, User, UserDraft, UserPatch, UserStatus, is_cataloged,
};
pub use crate::dashboard::{Dashboard, DashboardConfig, DashboardStats, DashboardView};
pub use crate::query::{DEFAULT_PAGE_SIZE, PageRequest, Paged, RoleFilter, run_query};

// Re-export persistence and session API
pub use crate::auth::{CURRENT_USER_KEY, Identity, MockAuthenticator};
pub use crate::persist::{
    FileBackend, KeyValueBackend, MemoryBackend, load_collection, save_collection,
};
pub use crate::storage::{EntityStore, seed_roles, seed_users};
