use tempfile::TempDir;

use rbacboard::{
    FileBackend, KeyValueBackend, MemoryBackend, Role, User, load_collection, save_collection,
    seed_roles, seed_users,
};

#[tokio::test]
async fn test_file_backend_round_trips_both_collections() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path());

    save_collection(&backend, "users", &seed_users()).await.unwrap();
    save_collection(&backend, "roles", &seed_roles()).await.unwrap();

    let users: Vec<User> = load_collection(&backend, "users").await;
    let roles: Vec<Role> = load_collection(&backend, "roles").await;

    assert_eq!(users, seed_users());
    assert_eq!(roles, seed_roles());
    assert!(dir.path().join("users.json").exists());
    assert!(dir.path().join("roles.json").exists());
}

#[tokio::test]
async fn test_load_missing_key_yields_empty_collection() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path());

    let users: Vec<User> = load_collection(&backend, "users").await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_load_corrupt_document_yields_empty_collection() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path());
    backend.write("users", "[{\"id\": oops").await.unwrap();

    let users: Vec<User> = load_collection(&backend, "users").await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_save_replaces_whole_document() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path());

    save_collection(&backend, "users", &seed_users()).await.unwrap();
    let one_user = vec![seed_users().remove(0)];
    save_collection(&backend, "users", &one_user).await.unwrap();

    let users: Vec<User> = load_collection(&backend, "users").await;
    assert_eq!(users, one_user);
    assert!(!dir.path().join("users.tmp").exists());
}

#[tokio::test]
async fn test_persisted_document_wire_layout() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path());

    save_collection(&backend, "users", &seed_users()[..1]).await.unwrap();
    save_collection(&backend, "roles", &seed_roles()[2..]).await.unwrap();

    let users: serde_json::Value =
        serde_json::from_str(&backend.read("users").await.unwrap().unwrap()).unwrap();
    assert_eq!(
        users,
        serde_json::json!([{
            "id": 1,
            "name": "John Doe",
            "email": "john@example.com",
            "role": "Admin",
            "status": "Active"
        }])
    );

    let roles: serde_json::Value =
        serde_json::from_str(&backend.read("roles").await.unwrap().unwrap()).unwrap();
    assert_eq!(
        roles,
        serde_json::json!([{
            "id": 3,
            "name": "Viewer",
            "permissions": ["read:users", "read:roles", "read:settings"],
            "customAttributes": { "accessLevel": "Limited" }
        }])
    );
}

#[tokio::test]
async fn test_documents_without_custom_attributes_still_load() {
    // Payloads written before the attribute map existed carry no
    // customAttributes key; they load with an empty map.
    let backend = MemoryBackend::new();
    backend
        .write(
            "roles",
            r#"[{ "id": 1, "name": "Admin", "permissions": ["read:users"] }]"#,
        )
        .await
        .unwrap();

    let roles: Vec<Role> = load_collection(&backend, "roles").await;
    assert_eq!(roles.len(), 1);
    assert!(roles[0].custom_attributes.is_empty());
}

#[tokio::test]
async fn test_memory_backend_clones_observe_each_other() {
    let backend = MemoryBackend::new();
    let observer = backend.clone();

    save_collection(&backend, "users", &seed_users()).await.unwrap();

    let users: Vec<User> = load_collection(&observer, "users").await;
    assert_eq!(users.len(), 3);

    observer.remove("users").await.unwrap();
    assert_eq!(backend.read("users").await.unwrap(), None);
}
