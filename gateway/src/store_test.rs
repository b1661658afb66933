use super::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("radius-console-store-{}", uuid::Uuid::new_v4()))
        .join(name)
}

#[test]
fn memory_store_get_set_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("jwt_token").unwrap(), None);

    store.set("jwt_token", "abc").unwrap();
    assert_eq!(store.get("jwt_token").unwrap().as_deref(), Some("abc"));

    store.set("jwt_token", "def").unwrap();
    assert_eq!(store.get("jwt_token").unwrap().as_deref(), Some("def"));

    store.remove("jwt_token").unwrap();
    store.remove("jwt_token").unwrap();
    assert_eq!(store.get("jwt_token").unwrap(), None);
}

#[test]
fn file_store_missing_file_reads_empty() {
    let store = FileStore::new(temp_path("session.json"));
    assert_eq!(store.get("refresh_token").unwrap(), None);
    store.remove("refresh_token").unwrap();
    assert!(!store.path().exists());
}

#[test]
fn file_store_persists_across_instances() {
    let path = temp_path("session.json");
    {
        let store = FileStore::new(&path);
        store.set("jwt_token", "access-1").unwrap();
        store.set("refresh_token", "refresh-1").unwrap();
    }

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("jwt_token").unwrap().as_deref(), Some("access-1"));
    assert_eq!(reopened.get("refresh_token").unwrap().as_deref(), Some("refresh-1"));

    reopened.remove("jwt_token").unwrap();
    assert_eq!(FileStore::new(&path).get("jwt_token").unwrap(), None);

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn file_store_rejects_corrupt_file() {
    let path = temp_path("session.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get("jwt_token"), Err(StoreError::Format(_))));

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[cfg(unix)]
#[test]
fn file_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_path("session.json");
    FileStore::new(&path).set("jwt_token", "secret").unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}
