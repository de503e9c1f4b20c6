use finder::config::ClientOptions;
use finder::connector::{Body, Connector, Param, Request};
use finder::volume::Volume;
use serde_json::{json, Value};

use crate::integration::support::{dispatch, home_library, names};

#[test]
fn open_with_tree_returns_root_and_children() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    let response = dispatch(&volume, &[("cmd", "open"), ("target", "fc1_"), ("tree", "1")]);
    let body = response.as_json().unwrap();

    let root_hash = body["cwd"]["hash"].as_str().unwrap();
    assert_eq!(body["cwd"]["name"], "home");
    assert_eq!(body["cwd"]["phash"], "");

    let files = body["files"].as_array().unwrap();
    let listed: Vec<&str> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(listed, vec!["home", "docs", "readme.txt"]);
    assert_eq!(files[0]["hash"], root_hash);
    assert_eq!(files[1]["phash"], root_hash);
    assert_eq!(files[2]["phash"], root_hash);
    assert_eq!(files[1]["mime"], "directory");
    assert_eq!(files[2]["read"], true);
    assert!(body.get("api").is_none());
}

#[test]
fn open_without_tree_lists_children_only() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    let response = dispatch(&volume, &[("cmd", "open"), ("target", "")]);
    let files = response.as_json().unwrap()["files"].as_array().unwrap().clone();
    let listed: Vec<&str> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(listed, vec!["docs", "readme.txt"]);
}

#[test]
fn open_with_init_carries_client_options() {
    let library = home_library();
    let volume = library.open(1).unwrap();
    let options = ClientOptions {
        disabled: vec!["rename".to_string()],
        ..ClientOptions::default()
    };
    let request = Request::new("open")
        .with(Param::Target, "fc1_")
        .with(Param::Init, "1");

    let response = Connector::new(&volume, &options).run(&request);
    let body = response.as_json().unwrap();
    assert_eq!(body["api"], "2.0");
    assert_eq!(body["disabled"], json!(["rename"]));
    assert_eq!(body["params"]["uplMaxSize"], "128M");
    assert_eq!(body["params"]["url"], "none");
}

#[test]
fn mkfile_decodes_plus_as_space() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    let response = dispatch(
        &volume,
        &[("cmd", "mkfile"), ("target", "fc1_d1"), ("name", "a+b.txt")],
    );
    let added = &response.as_json().unwrap()["added"];
    assert_eq!(added[0]["name"], "a b.txt");
    assert_eq!(added[0]["phash"], "fc1_d1");
    assert!(added[0]["hash"].as_str().unwrap().starts_with("fc1_f"));
    assert!(names(&volume, "fc1_").contains(&"a b.txt".to_string()));
}

#[test]
fn mkdir_without_name_is_rejected_without_mutation() {
    let library = home_library();
    let volume = library.open(1).unwrap();
    let before = names(&volume, "fc1_");

    let response = dispatch(&volume, &[("cmd", "mkdir"), ("target", "fc1_")]);
    assert_eq!(response.as_json(), Some(&json!({ "error": "Invalid arguments" })));
    assert_eq!(names(&volume, "fc1_"), before);
}

#[test]
fn unknown_and_missing_commands() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    let response = dispatch(&volume, &[("cmd", "invalid_cmd_test"), ("target", "fc1_")]);
    assert_eq!(response.as_json(), Some(&json!({ "error": "Unknown command" })));

    let response = dispatch(&volume, &[("target", "fc1_")]);
    assert_eq!(response.as_json(), Some(&json!({ "error": "No command specified" })));
}

#[test]
fn duplicate_mkdir_reports_error() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    let response = dispatch(&volume, &[("cmd", "mkdir"), ("target", "fc1_"), ("name", "docs")]);
    assert_eq!(
        response.error_message(),
        Some("Directory with this Name and Parent already exists.")
    );

    let response = dispatch(
        &volume,
        &[("cmd", "mkdir"), ("target", "fc1_d2"), ("name", "docs")],
    );
    assert!(response.error_message().is_none());
}

#[test]
fn file_command_renders_view_or_reports_missing_target() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    let response = dispatch(&volume, &[("cmd", "file"), ("target", "fc1_f3")]);
    match &response.body {
        Body::View(view) => assert_eq!(view.body, "home / readme.txt\n\n"),
        other => panic!("expected a rendered view, got {:?}", other),
    }
    assert!(response.content_type.starts_with("text/plain"));

    let response = dispatch(&volume, &[("cmd", "file"), ("target", "fc1_f99")]);
    assert_eq!(response.error_message(), Some("Could not open target"));
}

#[test]
fn cross_volume_targets_are_rejected() {
    let library = home_library();
    library.create_collection("work").unwrap();
    let work = library.open(2).unwrap();

    // fc1_d2 is home/docs; the work volume must not resolve or redirect it.
    let response = dispatch(&work, &[("cmd", "open"), ("target", "fc1_d2")]);
    assert_eq!(response.error_message(), Some("Could not open target fc1_d2"));

    let response = dispatch(&work, &[("cmd", "open"), ("target", "fc1_")]);
    assert_eq!(response.as_json().unwrap()["cwd"]["name"], "work");
}

#[test]
fn malformed_target_is_an_error_response() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    for target in ["fc1", "fc1_x2", "fc1_dabc"] {
        let response = dispatch(&volume, &[("cmd", "open"), ("target", target)]);
        let message = response.error_message().unwrap();
        assert!(message.starts_with("Invalid target hash"), "{}", message);
    }
}

#[test]
fn rename_and_ls() {
    let library = home_library();
    let volume = library.open(1).unwrap();

    let response = dispatch(
        &volume,
        &[("cmd", "rename"), ("target", "fc1_d2"), ("name", "papers")],
    );
    let body = response.as_json().unwrap();
    assert_eq!(body["added"][0]["name"], "papers");
    assert_eq!(body["added"][0]["hash"], "fc1_d2");
    assert_eq!(body["removed"], json!(["fc1_d2"]));

    let response = dispatch(&volume, &[("cmd", "ls"), ("target", "fc1_")]);
    assert_eq!(
        response.as_json().unwrap()["list"],
        json!(["papers", "readme.txt"])
    );
}

#[test]
fn tree_and_parents_commands() {
    let library = home_library();
    let volume = library.open(1).unwrap();
    volume
        .create(finder::tree::hash::ObjectKind::Directory, "inner", "fc1_d2")
        .unwrap();

    let response = dispatch(&volume, &[("cmd", "tree"), ("target", "fc1_d2")]);
    let tree = response.as_json().unwrap()["tree"].as_array().unwrap().clone();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0]["name"], "inner");

    let response = dispatch(&volume, &[("cmd", "parents"), ("target", "fc1_d4")]);
    let names: Vec<Value> = response.as_json().unwrap()["tree"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].clone())
        .collect();
    assert_eq!(
        names,
        vec![json!("home"), json!("docs"), json!("readme.txt"), json!("inner")]
    );
}
