use chrono::Utc;
use futures::future::join_all;
use log::warn;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::config::DashboardConfig;
use crate::core::{EntityId, Role, RoleDraft, RolePatch, User, UserDraft, UserPatch};
use crate::persist::{KeyValueBackend, load_collection, save_collection};
use crate::query::{PageRequest, Paged, RoleFilter, run_query};
use crate::storage::{EntityStore, seed_roles, seed_users};

/// The collection a dashboard screen currently presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Users,
    Roles,
}

impl DashboardView {
    /// The other view. Both views are reachable from either.
    pub fn toggled(self) -> Self {
        match self {
            Self::Users => Self::Roles,
            Self::Roles => Self::Users,
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => write!(f, "Users"),
            Self::Roles => write!(f, "Roles"),
        }
    }
}

/// Runtime counters for diagnostics and the CLI `stats` command.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub user_count: usize,
    pub role_count: usize,
    pub pending_saves: usize,
    pub last_save_dispatch_at: Option<String>,
}

/// The dashboard data core: both collections, the active view, and the
/// persistence plumbing behind every mutation.
///
/// Mutations update the in-memory store synchronously, then dispatch a
/// background save of the affected collection. The caller gets control
/// back without awaiting persistence; a save failure is logged and never
/// rolls the mutation back. Saves of one collection are chained, so
/// snapshots reach the backend in dispatch order. Saves still in flight
/// when the process exits are lost unless [`Dashboard::flush`] is awaited
/// first.
pub struct Dashboard {
    backend: Arc<dyn KeyValueBackend>,
    config: DashboardConfig,
    users: EntityStore<User>,
    roles: EntityStore<Role>,
    active_view: DashboardView,
    users_save_tail: Option<JoinHandle<()>>,
    roles_save_tail: Option<JoinHandle<()>>,
    last_save_dispatch_at: Option<String>,
}

impl Dashboard {
    /// Opens a dashboard over `backend` with the default configuration.
    pub async fn open(backend: impl KeyValueBackend + 'static) -> Self {
        Self::open_with_config(backend, DashboardConfig::new()).await
    }

    /// Opens a dashboard, loading both collections from the backend.
    ///
    /// A collection that loads empty, absent, or malformed is replaced by
    /// the seed set. Opening never fails.
    pub async fn open_with_config(
        backend: impl KeyValueBackend + 'static,
        config: DashboardConfig,
    ) -> Self {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(backend);

        let mut users: Vec<User> = load_collection(backend.as_ref(), &config.users_key).await;
        if users.is_empty() {
            users = seed_users();
        }

        let mut roles: Vec<Role> = load_collection(backend.as_ref(), &config.roles_key).await;
        if roles.is_empty() {
            roles = seed_roles();
        }

        Self {
            backend,
            config,
            users: EntityStore::from_items(users),
            roles: EntityStore::from_items(roles),
            active_view: DashboardView::default(),
            users_save_tail: None,
            roles_save_tail: None,
            last_save_dispatch_at: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Filtered, searched, paginated user listing.
    ///
    /// The search term matches the user name case-insensitively; the role
    /// filter matches the role name exactly.
    pub fn list_users(&self, search: &str, role_filter: &RoleFilter, page: usize) -> Paged<User> {
        run_query(
            self.users.list(),
            |user| role_filter.matches(&user.role),
            search,
            |user| user.name.clone(),
            PageRequest::new(page, self.config.page_size),
        )
    }

    /// Searched, paginated role listing. The search term matches the role
    /// name case-insensitively.
    pub fn list_roles(&self, search: &str, page: usize) -> Paged<Role> {
        run_query(
            self.roles.list(),
            |_| true,
            search,
            |role| role.name.clone(),
            PageRequest::new(page, self.config.page_size),
        )
    }

    pub fn users(&self) -> &[User] {
        self.users.list()
    }

    pub fn roles(&self) -> &[Role] {
        self.roles.list()
    }

    pub fn get_user(&self, id: EntityId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn get_role(&self, id: EntityId) -> Option<&Role> {
        self.roles.get(id)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn create_user(&mut self, draft: UserDraft) -> User {
        let created = self.users.create(draft);
        self.dispatch_user_save();
        created
    }

    /// Returns the updated user, or `None` as a silent no-op for an
    /// unknown id.
    pub fn update_user(&mut self, id: EntityId, patch: UserPatch) -> Option<User> {
        let updated = self.users.update(id, patch);
        self.dispatch_user_save();
        updated
    }

    /// Returns the removed user, or `None` as a silent no-op for an
    /// unknown id. Users keep their positions; no renumbering happens.
    pub fn delete_user(&mut self, id: EntityId) -> Option<User> {
        let removed = self.users.delete(id);
        self.dispatch_user_save();
        removed
    }

    pub fn create_role(&mut self, draft: RoleDraft) -> Role {
        let created = self.roles.create(draft);
        self.dispatch_role_save();
        created
    }

    pub fn update_role(&mut self, id: EntityId, patch: RolePatch) -> Option<Role> {
        let updated = self.roles.update(id, patch);
        self.dispatch_role_save();
        updated
    }

    /// Removes a role. Users referencing it by name are left untouched;
    /// there is no cascade between the collections.
    pub fn delete_role(&mut self, id: EntityId) -> Option<Role> {
        let removed = self.roles.delete(id);
        self.dispatch_role_save();
        removed
    }

    // ========================================================================
    // View state
    // ========================================================================

    pub fn active_view(&self) -> DashboardView {
        self.active_view
    }

    pub fn set_active_view(&mut self, view: DashboardView) {
        self.active_view = view;
    }

    // ========================================================================
    // Persistence bookkeeping
    // ========================================================================

    /// Awaits every save still in flight. Tests and orderly shutdown call
    /// this; skipping it simply loses unfinished saves.
    pub async fn flush(&mut self) {
        let tails: Vec<JoinHandle<()>> = [self.users_save_tail.take(), self.roles_save_tail.take()]
            .into_iter()
            .flatten()
            .collect();
        for joined in join_all(tails).await {
            if let Err(err) = joined {
                warn!("Background save task failed: {}", err);
            }
        }
    }

    /// Returns current runtime statistics.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            user_count: self.users.len(),
            role_count: self.roles.len(),
            pending_saves: [&self.users_save_tail, &self.roles_save_tail]
                .into_iter()
                .flatten()
                .filter(|handle| !handle.is_finished())
                .count(),
            last_save_dispatch_at: self.last_save_dispatch_at.clone(),
        }
    }

    fn dispatch_user_save(&mut self) {
        let items = self.users.list().to_vec();
        let key = self.config.users_key.clone();
        let previous = self.users_save_tail.take();
        self.users_save_tail = Some(self.spawn_save(previous, key, items));
        self.last_save_dispatch_at = Some(Utc::now().to_rfc3339());
    }

    fn dispatch_role_save(&mut self) {
        let items = self.roles.list().to_vec();
        let key = self.config.roles_key.clone();
        let previous = self.roles_save_tail.take();
        self.roles_save_tail = Some(self.spawn_save(previous, key, items));
        self.last_save_dispatch_at = Some(Utc::now().to_rfc3339());
    }

    /// Spawns a fire-and-forget save of one collection snapshot.
    ///
    /// The task first awaits the previous save of the same collection, so
    /// an older snapshot can never overwrite a newer one.
    fn spawn_save<T>(
        &self,
        previous: Option<JoinHandle<()>>,
        key: String,
        items: Vec<T>,
    ) -> JoinHandle<()>
    where
        T: Serialize + Send + Sync + 'static,
    {
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(err) = previous.await {
                    warn!("Background save task failed: {}", err);
                }
            }
            if let Err(err) = save_collection(backend.as_ref(), &key, &items).await {
                warn!("Failed to persist collection '{}': {}", key, err);
            }
        })
    }
}
