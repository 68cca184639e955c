use super::*;

#[test]
fn test_configured_dir_is_created() {
    let root = tempfile::tempdir().unwrap();
    let wanted = root.path().join("nested").join("logs");

    assert_eq!(resolve_log_dir(&wanted), Some(wanted.clone()));
    assert!(wanted.is_dir());
}

#[test]
fn test_unusable_dir_falls_back_to_temp() {
    let root = tempfile::tempdir().unwrap();
    let blocker = root.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let dir = resolve_log_dir(&blocker.join("logs")).unwrap();
    assert_eq!(dir, std::env::temp_dir().join("drawbridge").join("logs"));
    assert!(dir.is_dir());
}
