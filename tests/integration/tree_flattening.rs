use finder::tree::flatten::TreeScope;
use finder::tree::hash::{ObjectKind, Target};
use finder::tree::node::NodeInfo;
use finder::volume::{Library, ModelVolume, Volume};
use proptest::prelude::*;
use std::collections::HashSet;

/// Build a random tree: each step creates a directory or file under one of the
/// directories created so far.
fn build(steps: &[(bool, usize)]) -> (Library, ModelVolume, Vec<String>) {
    let library = Library::in_memory();
    library.create_collection("home").unwrap();
    let volume = library.open(1).unwrap();
    let mut directories = vec![volume.describe(&volume.root().unwrap()).unwrap().hash().to_string()];
    let mut all = directories.clone();

    for (i, (is_dir, parent)) in steps.iter().enumerate() {
        let parent = directories[parent % directories.len()].clone();
        let kind = if *is_dir {
            ObjectKind::Directory
        } else {
            ObjectKind::File
        };
        let info = volume.create(kind, &format!("n{}", i), &parent).unwrap();
        if *is_dir {
            directories.push(info.hash().to_string());
        }
        all.push(info.hash().to_string());
    }
    (library, volume, all)
}

fn tree_steps() -> impl Strategy<Value = Vec<(bool, usize)>> {
    prop::collection::vec((any::<bool>(), 0usize..64), 0..24)
}

proptest! {
    #[test]
    fn empty_scope_is_always_empty(steps in tree_steps(), pick in 0usize..64) {
        let (_library, volume, hashes) = build(&steps);
        let node = volume.resolve(&hashes[pick % hashes.len()]).unwrap();
        prop_assert!(volume.flatten(&node, TreeScope::NONE).unwrap().is_empty());
    }

    #[test]
    fn full_scope_is_closed_under_parent_links(steps in tree_steps(), pick in 0usize..64) {
        let (_library, volume, hashes) = build(&steps);
        let target = &hashes[pick % hashes.len()];
        let node = volume.resolve(target).unwrap();
        let tree = volume.flatten(&node, TreeScope::FULL).unwrap();

        let seen: HashSet<&str> = tree.iter().map(NodeInfo::hash).collect();
        prop_assert!(seen.contains(target.as_str()));
        for info in &tree {
            prop_assert!(info.phash().is_empty() || seen.contains(info.phash()));
        }
        prop_assert_eq!(tree[0].phash(), "");
    }

    #[test]
    fn children_list_directories_before_files(steps in tree_steps(), pick in 0usize..64) {
        let (_library, volume, hashes) = build(&steps);
        let node = volume.resolve(&hashes[pick % hashes.len()]).unwrap();
        let children = volume.flatten(&node, TreeScope::CHILDREN).unwrap();
        let first_file = children.iter().position(|c| !c.is_directory()).unwrap_or(children.len());
        prop_assert!(children[first_file..].iter().all(|c| !c.is_directory()));
    }
}

#[test]
fn root_with_parents_scope_is_only_the_root() {
    let (_library, volume, _) = build(&[(true, 0), (false, 0), (true, 1)]);
    let root = volume.resolve("").unwrap();
    let tree = volume.flatten(&root, TreeScope::PARENTS).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].name(), "home");
}

#[test]
fn root_marker_resolves_for_any_prefix() {
    let (_library, volume, _) = build(&[]);
    for marker in ["", "fc1_", "fc9_"] {
        assert!(matches!(Target::decode(marker).unwrap(), Target::Root { .. }));
        assert!(volume.resolve(marker).unwrap().is_root());
    }
}
