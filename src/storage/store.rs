use crate::core::{EntityId, StoreEntity};

/// An insertion-ordered in-memory collection of one entity kind.
///
/// The store is deliberately permissive: creation always succeeds, updates
/// and deletes of an absent id are silent no-ops, and field contents are
/// stored as given. Validation belongs to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct EntityStore<T: StoreEntity> {
    items: Vec<T>,
}

impl<T: StoreEntity> EntityStore<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Creates an entity from `draft` and appends it.
    ///
    /// The id is `len + 1`. After deletions this can reassign an id still
    /// held by a surviving entity; lookups then resolve to the first match.
    pub fn create(&mut self, draft: T::Draft) -> T {
        let id = self.items.len() as EntityId + 1;
        let entity = T::from_draft(id, draft);
        self.items.push(entity.clone());
        entity
    }

    /// Shallow-merges `patch` over the entity with `id`, in place.
    ///
    /// Returns the updated entity, or `None` when no entity matches.
    pub fn update(&mut self, id: EntityId, patch: T::Patch) -> Option<T> {
        let entity = self.items.iter_mut().find(|item| item.id() == id)?;
        entity.apply_patch(patch);
        Some(entity.clone())
    }

    /// Removes the entity with `id`, preserving the order of the rest.
    ///
    /// Returns the removed entity, or `None` when no entity matches.
    pub fn delete(&mut self, id: EntityId) -> Option<T> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(position))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// All entities in insertion order.
    pub fn list(&self) -> &[T] {
        &self.items
    }

    /// Replaces the whole collection, e.g. after loading persisted state.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{User, UserDraft, UserPatch, UserStatus};

    fn draft(name: &str) -> UserDraft {
        UserDraft::new(name, format!("{}@example.com", name.to_lowercase()), "Viewer")
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store: EntityStore<User> = EntityStore::new();
        assert_eq!(store.create(draft("a")).id, 1);
        assert_eq!(store.create(draft("b")).id, 2);
        assert_eq!(store.create(draft("c")).id, 3);
    }

    #[test]
    fn test_update_merges_in_place() {
        let mut store: EntityStore<User> = EntityStore::new();
        store.create(draft("a"));
        store.create(draft("b"));

        let updated = store
            .update(1, UserPatch::new().status(UserStatus::Inactive))
            .unwrap();
        assert_eq!(updated.status, UserStatus::Inactive);
        assert_eq!(updated.name, "a");
        assert_eq!(store.list()[0].id, 1);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut store: EntityStore<User> = EntityStore::new();
        store.create(draft("a"));

        assert!(store.update(99, UserPatch::new().name("x")).is_none());
        assert_eq!(store.list()[0].name, "a");
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut store: EntityStore<User> = EntityStore::new();
        store.create(draft("a"));
        store.create(draft("b"));
        store.create(draft("c"));

        let removed = store.delete(2).unwrap();
        assert_eq!(removed.name, "b");

        let names: Vec<&str> = store.list().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut store: EntityStore<User> = EntityStore::new();
        store.create(draft("a"));

        assert!(store.delete(99).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_id_reuse_after_delete() {
        // The historical id rule: after deleting one of three entities the
        // next id is len + 1 = 3, which id 3 still holds.
        let mut store: EntityStore<User> = EntityStore::new();
        store.create(draft("a"));
        store.create(draft("b"));
        store.create(draft("c"));
        store.delete(1);

        let created = store.create(draft("d"));
        assert_eq!(created.id, 3);
        assert_eq!(store.get(3).unwrap().name, "c");
    }
}
