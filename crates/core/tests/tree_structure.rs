mod common;

use common::{Fixture, canonical};
use kinload_api::{LoaderError, SiblingJoiner};

#[test]
fn test_search_order_reaches_deepest_sibling_last() {
    let fx = Fixture::new();
    fx.file("n1/shared.txt", b"1");
    fx.file("n2/shared.txt", b"2");
    fx.file("n3/shared.txt", b"3");
    let only = fx.file("n3/only.txt", b"only");

    let root = fx.root();
    let n1 = root.create_sibling(fx.app().join("n1")).unwrap();
    let _n2 = n1.create_sibling(fx.app().join("n2")).unwrap();
    let n3 = n1.create_sibling(fx.app().join("n3")).unwrap();

    let ids: Vec<u32> = root.members().map(|m| m.id()).collect();
    assert_eq!(ids, vec![1000, 2001, 3001, 3002]);

    assert_eq!(root.resolve_resource("only.txt"), Some(canonical(&only)));
    assert_eq!(n3.resolve_resource("only.txt"), Some(canonical(&only)));

    let all = root.resolve_resources("shared.txt");
    assert_eq!(
        all,
        vec![
            canonical(&fx.app().join("n1/shared.txt")),
            canonical(&fx.app().join("n2/shared.txt")),
            canonical(&fx.app().join("n3/shared.txt")),
        ]
    );
    assert_eq!(all.last(), Some(&canonical(&fx.app().join("n3/shared.txt"))));
}

#[test]
fn test_members_follow_firstborn_spine() {
    let fx = Fixture::new();
    let root = fx.root();

    let n1 = root.create_sibling(fx.dir("n1")).unwrap();
    let n2 = root.create_sibling(fx.dir("n2")).unwrap();
    let n3 = root.create_sibling(fx.dir("n3")).unwrap();
    let n4 = n1.create_sibling(fx.dir("n4")).unwrap();
    let n5 = n1.create_sibling(fx.dir("n5")).unwrap();

    let members: Vec<_> = root.members().collect();
    assert_eq!(members, vec![root.clone(), n1.clone(), n2, n3, n4, n5]);

    // Any node enumerates the same tree.
    assert_eq!(n1.members().count(), 6);
    assert_eq!(root.tree_size(), 6);
}

#[test]
fn test_child_ids_and_flags() {
    let fx = Fixture::new();
    let root = fx.root();
    let a = root.create_sibling(fx.dir("a")).unwrap();
    let b = root.create_sibling(fx.dir("b")).unwrap();
    let a1 = a.create_sibling(fx.dir("a1")).unwrap();

    assert!(root.is_root() && root.is_firstborn());
    assert_eq!(root.id(), 1000);
    assert_eq!((a.id(), b.id(), a1.id()), (2001, 2002, 3001));
    assert!(a.is_firstborn());
    assert!(!b.is_firstborn());
    assert!(a1.is_firstborn());

    assert_eq!(a1.parent(), Some(a.clone()));
    assert_eq!(a1.root(), root);
    assert_eq!(root.parent(), None);
    assert_eq!(root.siblings(), vec![a.clone(), b]);
    assert!(a.has_siblings());
}

#[test]
fn test_only_firstborn_creates_siblings() {
    let fx = Fixture::new();
    let root = fx.root();
    let a = root.create_sibling(fx.dir("a")).unwrap();
    let b = root.create_sibling(fx.dir("b")).unwrap();
    let a1 = a.create_sibling(fx.dir("a1")).unwrap();
    let a2 = a.create_sibling(fx.dir("a2")).unwrap();
    let _a11 = a1.create_sibling(fx.dir("a11")).unwrap();
    let a12 = a1.create_sibling(fx.dir("a12")).unwrap();
    let size = root.tree_size();

    for (loader, id) in [(&b, 2002), (&a2, 3002), (&a12, 4002)] {
        let err = loader.create_sibling(fx.dir("x")).unwrap_err();
        assert!(
            matches!(err, LoaderError::NotFirstborn { id: got } if got == id),
            "unexpected error {:?}",
            err
        );
    }
    assert_eq!(root.tree_size(), size);
}

#[test]
fn test_root_cannot_join_sibling() {
    let fx = Fixture::new();
    let root = fx.root();

    let err = root.join_sibling(&fx.dir("lib")).unwrap_err();
    assert!(matches!(err, LoaderError::NoParent { id: 1000 }));
}

#[test]
fn test_failed_sibling_is_removed() {
    let fx = Fixture::new();
    let root = fx.root();
    let notes = fx.file("notes.txt", b"not a location");

    let err = root.create_sibling(&notes).unwrap_err();
    assert!(matches!(err, LoaderError::InvalidLocation(_)));
    assert!(root.siblings().is_empty());
    assert_eq!(root.tree_size(), 1);

    // The next sibling still becomes the firstborn.
    let next = root.create_sibling(fx.dir("classes")).unwrap();
    assert!(next.is_firstborn());
    assert_eq!(next.id(), 2001);
}

#[test]
fn test_display_describes_node() {
    let fx = Fixture::new();
    fx.file("classes/a.txt", b"a");
    let root = fx.root();
    let child = root.create_sibling(fx.app().join("classes")).unwrap();

    assert_eq!(
        root.to_string(),
        "{id=1000, parent=none, root=true, firstborn=true, \
         numberOfResources=0, numberOfSiblings=1, reloadCount=0}"
    );

    let text = child.to_string();
    assert!(text.starts_with("{id=2001, parent=1000, root=false, firstborn=true"));
    assert!(text.contains("resourceLocation="));
    assert!(text.contains("numberOfResources=1"));
    assert!(format!("{:?}", child).starts_with("ModuleLoader{id=2001"));
}
