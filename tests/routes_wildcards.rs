use arbor_router_rs::{Params, RadixError, Tree};

#[test]
fn tree_when_wildcard_added_then_remaining_path_is_captured() {
    let mut tree = Tree::new();
    tree.add("/files/{path:*}", 1).expect("wildcard route should register");

    let mut params = Params::new();
    let (value, _) = tree.get("/files/a/b/c.txt", &mut params);

    assert_eq!(value, Some(&1));
    assert_eq!(params.get("path"), Some("a/b/c.txt"));
}

#[test]
fn tree_when_wildcard_host_is_requested_bare_then_capture_is_empty() {
    let mut tree = Tree::new();
    tree.add("/files/{path:*}", 1).expect("wildcard route should register");

    let mut params = Params::new();
    let (value, _) = tree.get("/files/", &mut params);
    assert_eq!(value, Some(&1));
    assert_eq!(params.get("path"), Some(""));

    // The slashless spelling redirects onto the wildcard host.
    let mut params = Params::new();
    assert_eq!(tree.get("/files", &mut params), (None, true));
}

#[test]
fn tree_when_wildcard_sits_at_the_root_then_every_path_matches() {
    let mut tree = Tree::new();
    tree.add("/{rest:*}", 1).expect("root wildcard should register");

    let mut params = Params::new();
    let (value, _) = tree.get("/any/depth/here", &mut params);
    assert_eq!(value, Some(&1));
    assert_eq!(params.get("rest"), Some("any/depth/here"));

    let mut params = Params::new();
    let (value, _) = tree.get("/", &mut params);
    assert_eq!(value, Some(&1));
    assert_eq!(params.get("rest"), Some(""));
}

#[test]
fn tree_when_param_and_wildcard_coexist_then_single_segments_prefer_the_param() {
    let mut tree = Tree::new();
    tree.add("/api/{version}", 1).expect("param route should register");
    tree.add("/api/{rest:*}", 2).expect("wildcard route should register");

    let mut params = Params::new();
    let (value, _) = tree.get("/api/v1", &mut params);
    assert_eq!(value, Some(&1));
    assert_eq!(params.get("version"), Some("v1"));

    // A deeper path dead-ends under the param and falls back to the
    // wildcard with the param capture rolled back.
    let mut params = Params::new();
    let (value, _) = tree.get("/api/v1/users", &mut params);
    assert_eq!(value, Some(&2));
    assert_eq!(params.get("rest"), Some("v1/users"));
    assert_eq!(params.get("version"), None);
}

#[test]
fn tree_when_second_wildcard_lands_on_the_same_position_then_add_conflicts() {
    let mut tree = Tree::new();
    tree.add("/dl/{path:*}", 1).expect("first wildcard should register");

    match tree.add("/dl/{rest:*}", 2).expect_err("expected wildcard conflict") {
        RadixError::WildcardConflict { segment, existing, prefix, .. } => {
            assert_eq!(segment, "{rest:*}");
            assert_eq!(existing, "{path:*}");
            assert_eq!(prefix, "/dl/{path:*}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tree_when_same_wildcard_added_twice_then_add_reports_existing_registration() {
    let mut tree = Tree::new();
    tree.add("/dl/{path:*}", 1).expect("wildcard should register");

    match tree.add("/dl/{path:*}", 2).expect_err("expected duplicate wildcard error") {
        RadixError::WildcardAlreadyRegistered { path } => {
            assert_eq!(path, "/dl/{path:*}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tree_when_wildcard_is_not_the_final_segment_then_add_is_rejected() {
    let mut tree: Tree<u32> = Tree::new();

    match tree.add("/a/{rest:*}/tail", 1).expect_err("expected placement error") {
        RadixError::WildcardNotAtEnd { path } => assert_eq!(path, "/a/{rest:*}/tail"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tree_when_wildcard_follows_literal_text_in_a_segment_then_add_is_rejected() {
    let mut tree: Tree<u32> = Tree::new();

    match tree.add("/a{rest:*}", 1).expect_err("expected separator error") {
        RadixError::NoSlashBeforeWildcard { path } => assert_eq!(path, "/a{rest:*}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tree_when_mutable_then_wildcard_value_is_replaced() {
    let mut tree = Tree::new();
    tree.add("/dl/{path:*}", 1).expect("wildcard should register");
    tree.set_mutable(true);
    tree.add("/dl/{path:*}", 2).expect("mutable re-add should replace the value");

    let mut params = Params::new();
    let (value, _) = tree.get("/dl/x", &mut params);
    assert_eq!(value, Some(&2));
    assert_eq!(params.get("path"), Some("x"));
}

#[test]
fn tree_when_wildcard_and_static_routes_coexist_then_static_wins_exact_paths() {
    let mut tree = Tree::new();
    tree.add("/assets/app.css", 1).expect("static route should register");
    tree.add("/assets/{file:*}", 2).expect("wildcard route should register");

    let mut params = Params::new();
    assert_eq!(tree.get("/assets/app.css", &mut params), (Some(&1), false));
    assert!(params.is_empty());

    let mut params = Params::new();
    let (value, _) = tree.get("/assets/img/logo.png", &mut params);
    assert_eq!(value, Some(&2));
    assert_eq!(params.get("file"), Some("img/logo.png"));
}
