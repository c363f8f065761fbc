use crate::core::{PERMISSION_CATALOG, PermissionSet, Role, RoleDraft, StoreEntity, User, UserDraft, UserStatus};

/// The user records a fresh dashboard starts from.
pub fn seed_users() -> Vec<User> {
    vec![
        User::from_draft(1, UserDraft::new("John Doe", "john@example.com", "Admin")),
        User::from_draft(2, UserDraft::new("Jane Smith", "jane@example.com", "Editor")),
        User::from_draft(
            3,
            UserDraft::new("Bob Johnson", "bob@example.com", "Viewer")
                .with_status(UserStatus::Inactive),
        ),
    ]
}

/// The role records a fresh dashboard starts from.
///
/// Admin carries the full permission catalog, Editor the read and write
/// tokens, Viewer the read tokens only.
pub fn seed_roles() -> Vec<Role> {
    let read_write: Vec<&str> = PERMISSION_CATALOG
        .iter()
        .copied()
        .filter(|token| token.starts_with("read:") || token.starts_with("write:"))
        .collect();
    let read_only: Vec<&str> = PERMISSION_CATALOG
        .iter()
        .copied()
        .filter(|token| token.starts_with("read:"))
        .collect();

    vec![
        Role::from_draft(
            1,
            RoleDraft::new("Admin")
                .with_permissions(PermissionSet::from_tokens(PERMISSION_CATALOG))
                .with_access_level("Full"),
        ),
        Role::from_draft(
            2,
            RoleDraft::new("Editor")
                .with_permissions(PermissionSet::from_tokens(read_write))
                .with_access_level("Partial"),
        ),
        Role::from_draft(
            3,
            RoleDraft::new("Viewer")
                .with_permissions(PermissionSet::from_tokens(read_only))
                .with_access_level("Limited"),
        ),
    ]
}
