mod common;

use common::{Fixture, resource_names};
use kinload_core::ModuleLoader;
use std::fs;

#[test]
fn test_reload_prunes_all_but_firstborn() {
    let fx = Fixture::new();
    fx.file("a/a.txt", b"a");
    fx.file("b/b.txt", b"b");
    fx.file("c/c.txt", b"c");

    let root = fx.root();
    let a = root.create_sibling(fx.app().join("a")).unwrap();
    let b = root.create_sibling(fx.app().join("b")).unwrap();
    let c = root.create_sibling(fx.app().join("c")).unwrap();
    let a1 = a.create_sibling(fx.dir("a1")).unwrap();
    let a2 = a.create_sibling(fx.dir("a2")).unwrap();
    let before = root.reload_count();

    root.reload().unwrap();

    assert_eq!(root.siblings(), vec![a.clone()]);
    assert_eq!(root.reload_count(), before + 1);
    for pruned in [&b, &c] {
        assert!(pruned.is_detached());
        assert_eq!(pruned.number_of_resources(), 0);
    }

    // The firstborn's own subtree went through the same pass.
    assert_eq!(a.reload_count(), 1);
    assert_eq!(a.number_of_resources(), 1);
    assert_eq!(a.siblings(), vec![a1.clone()]);
    assert!(a2.is_detached());
    assert_eq!(a1.reload_count(), 1);

    assert_eq!(root.tree_size(), 3);
    assert_eq!(root.resolve_resource("b.txt"), None);
}

#[test]
fn test_reload_from_any_node_starts_at_root() {
    let fx = Fixture::new();
    let root = fx.root();
    let a = root.create_sibling(fx.dir("a")).unwrap();
    let a1 = a.create_sibling(fx.dir("a1")).unwrap();

    a1.reload().unwrap();
    a1.reload().unwrap();

    assert_eq!(root.reload_count(), 2);
    assert_eq!(a.reload_count(), 2);
    assert_eq!(a1.reload_count(), 2);
}

#[test]
fn test_reload_rescans_locations() {
    let fx = Fixture::new();
    fx.file("classes/old.txt", b"old");

    let root = ModuleLoader::builder()
        .with_work_path(fx.work())
        .with_location(fx.app().join("classes").to_string_lossy())
        .build()
        .unwrap();
    assert!(root.find_resource("old.txt").is_some());

    fs::remove_file(fx.app().join("classes/old.txt")).unwrap();
    fx.file("classes/new.txt", b"new");
    root.reload().unwrap();

    assert!(root.find_resource("old.txt").is_none());
    assert!(root.find_resource("new.txt").is_some());
}

#[test]
fn test_nested_archive_nodes_are_rediscovered() {
    let fx = Fixture::new();
    fx.file("classes/app.xml", b"<app/>");
    fx.archive("classes/pkg/plugin.zip", &["p/One.class"]);

    let root = ModuleLoader::builder()
        .with_work_path(fx.work())
        .with_location(fx.app().join("classes").to_string_lossy())
        .build()
        .unwrap();

    let siblings = root.siblings();
    assert_eq!(siblings.len(), 2);
    let classes = siblings[0].clone();
    let plugin = siblings[1].clone();
    assert!(root.find_resource("p/One.class").is_some());

    root.reload().unwrap();

    let siblings = root.siblings();
    assert_eq!(siblings.len(), 2);
    assert_eq!(siblings[0], classes);
    assert_ne!(siblings[1], plugin);
    assert!(plugin.is_detached());
    assert_eq!(resource_names(&siblings[1]), vec!["p/One.class"]);
    assert!(root.find_resource("p/One.class").is_some());
}

#[test]
fn test_configured_chain_survives_reload() {
    let fx = Fixture::new();
    fx.file("one/1.txt", b"1");
    fx.file("two/2.txt", b"2");
    fx.file("three/3.txt", b"3");

    let root = ModuleLoader::builder()
        .with_work_path(fx.work())
        .with_base_path(fx.app())
        .with_locations(["one", "two", "three"])
        .build()
        .unwrap();

    root.reload().unwrap();

    for name in ["1.txt", "2.txt", "3.txt"] {
        assert!(root.find_resource(name).is_some(), "{} lost on reload", name);
    }
    assert_eq!(root.tree_size(), 4);
}

#[test]
fn test_failed_rescan_is_reported_after_full_pass() {
    let fx = Fixture::new();
    fx.archive("lib/ext.jar", &["x/Y.class"]);
    fx.file("classes/a.txt", b"a");

    let root = ModuleLoader::builder()
        .with_work_path(fx.work())
        .with_base_path(fx.app())
        .with_locations(["lib/ext.jar", "classes"])
        .build()
        .unwrap();

    // Corrupt the archive; the directory below it must still be rescanned.
    fs::write(fx.app().join("lib/ext.jar"), b"garbage").unwrap();
    fx.file("classes/b.txt", b"b");

    let err = root.reload().unwrap_err();
    assert!(matches!(err, kinload_api::LoaderError::InvalidResource { .. }));
    assert!(root.find_resource("b.txt").is_some());
    assert!(root.find_resource("x/Y.class").is_none());
}
