use finder::config::StorageConfig;
use finder::store::persistence::SledNodeRecordStore;
use finder::tree::hash::ObjectKind;
use finder::volume::{Library, Volume};
use std::sync::Arc;
use tempfile::TempDir;

use crate::integration::support::dispatch;

#[test]
fn sled_library_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig::sled(temp_dir.path().join("store"));

    let readme_hash = {
        let library = Library::from_config(&config).unwrap();
        library.create_collection("home").unwrap();
        let volume = library.open(1).unwrap();
        volume.create(ObjectKind::Directory, "docs", "fc1_").unwrap();
        let readme = volume.create(ObjectKind::File, "readme.txt", "fc1_").unwrap();
        library.flush().unwrap();
        readme.hash().to_string()
    };

    let library = Library::from_config(&config).unwrap();
    let volume = library.open(1).unwrap();
    assert_eq!(volume.list("fc1_").unwrap(), vec!["docs", "readme.txt"]);
    assert_eq!(volume.resolve(&readme_hash).unwrap().name, "readme.txt");

    let response = dispatch(&volume, &[("cmd", "mkdir"), ("target", "fc1_"), ("name", "docs")]);
    assert!(response.error_message().unwrap().contains("already exists"));
}

#[test]
fn sled_library_rejects_missing_path() {
    let config = StorageConfig {
        path: None,
        ..StorageConfig::sled(std::path::PathBuf::new())
    };
    assert!(Library::from_config(&config).is_err());
}

#[test]
fn collections_keep_separate_trees_in_one_store() {
    let store = Arc::new(SledNodeRecordStore::temporary().unwrap());
    let library = Library::new(store);
    library.create_collection("home").unwrap();
    library.create_collection("work").unwrap();

    let home = library.open(1).unwrap();
    let work = library.open(2).unwrap();
    home.create(ObjectKind::Directory, "docs", "fc1_").unwrap();
    work.create(ObjectKind::Directory, "docs", "fc2_").unwrap();

    assert_eq!(home.list("").unwrap(), vec!["docs"]);
    assert_eq!(work.list("").unwrap(), vec!["docs"]);
    assert_eq!(
        library
            .collections()
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>(),
        vec!["home", "work"]
    );
}
