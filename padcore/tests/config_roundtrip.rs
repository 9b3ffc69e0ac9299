//! Config persistence against the real filesystem.

use padcore::ConfigStore;
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("padcore-config-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn missing_file_is_created_empty() {
    let path = scratch("fresh.ini");
    assert!(!path.exists());

    let store = ConfigStore::load(&path).unwrap();
    assert!(store.is_empty());
    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert_eq!(store.get("Display", "width", "800"), "800");
}

#[test]
fn missing_parent_directory_is_created() {
    let dir = std::env::temp_dir().join(format!("padcore-config-nested-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("deep").join("slowpad.ini");

    let store = ConfigStore::load(&path).unwrap();
    assert!(store.is_empty());
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn set_then_reload_returns_value() {
    let path = scratch("set.ini");
    let mut store = ConfigStore::load(&path).unwrap();
    store.set("Font", "size", "14");
    store.save(&path).unwrap();

    let reloaded = ConfigStore::load(&path).unwrap();
    assert_eq!(reloaded.get("Font", "size", "10"), "14");
}

#[test]
fn save_of_load_is_byte_identical() {
    let path = scratch("stable.ini");
    std::fs::write(
        &path,
        "; written by hand\n[Display]\nwidth=1024\nheight :  700\n\n[Font]\nFamily = Courier New\nbold = 1\n",
    )
    .unwrap();

    ConfigStore::load(&path).unwrap().save(&path).unwrap();
    let first = std::fs::read(&path).unwrap();
    ConfigStore::load(&path).unwrap().save(&path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn invalid_utf8_degrades_to_defaults() {
    let path = scratch("binary.ini");
    std::fs::write(&path, [0xff, 0xfe, b'\n', b'[', b'A', b']', b'\n', b'k', b'=', b'v', b'\n']).unwrap();

    let store = ConfigStore::load(&path).unwrap();
    assert_eq!(store.get("A", "k", "x"), "v");
    assert_eq!(store.get("B", "k", "x"), "x");
}
