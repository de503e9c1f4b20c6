use finder::config::ClientOptions;
use finder::connector::{Connector, ConnectorResponse, Request};
use finder::tree::hash::ObjectKind;
use finder::volume::{Library, ModelVolume, Volume};

/// Library with one collection `home` holding `docs/` and `readme.txt`
pub fn home_library() -> Library {
    let library = Library::in_memory();
    library.create_collection("home").unwrap();
    let volume = library.open(1).unwrap();
    volume.create(ObjectKind::Directory, "docs", "fc1_").unwrap();
    volume.create(ObjectKind::File, "readme.txt", "fc1_").unwrap();
    library
}

pub fn dispatch(volume: &ModelVolume, pairs: &[(&str, &str)]) -> ConnectorResponse {
    let options = ClientOptions::default();
    Connector::new(volume, &options).run(&Request::from_pairs(pairs.iter().copied()))
}

pub fn names(volume: &ModelVolume, target: &str) -> Vec<String> {
    volume.list(target).unwrap()
}
