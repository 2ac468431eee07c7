mod common;

use arbor_router_rs::{RequestContext, Router, RouterConfig, handler_fn};
use common::{RejectingHandler, TestCtx, failing_handler, ok_handler, panicking_handler, tag_handler};
use std::sync::Arc;

#[test]
fn router_when_route_matches_then_handler_runs_with_params() {
    let mut router = Router::new(None);
    router
        .get("/users/{id}", handler_fn(|ctx: &mut TestCtx| {
            let id = ctx.param("id").unwrap_or("").to_string();
            ctx.write_body(&format!("user {id}"));
            Ok(())
        }))
        .expect("route should register");

    let mut ctx = TestCtx::new("GET", "/users/42");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 200);
    assert_eq!(ctx.body, "user 42");
    assert_eq!(ctx.param("id"), Some("42"));
}

#[test]
fn router_when_nothing_matches_then_answer_is_404() {
    let mut router = Router::new(None);
    router.get("/known", ok_handler()).expect("route should register");

    let mut ctx = TestCtx::new("GET", "/unknown");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 404);
    assert_eq!(ctx.body, "Not Found");
}

#[test]
fn router_when_not_found_responder_is_set_then_it_answers_instead() {
    let mut router = Router::new(None);
    router.get("/known", ok_handler()).expect("route should register");
    router.set_not_found(|ctx: &mut TestCtx| {
        ctx.set_status(404);
        ctx.write_body("nothing here");
        Ok(())
    });

    let mut ctx = TestCtx::new("GET", "/unknown");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 404);
    assert_eq!(ctx.body, "nothing here");
}

#[test]
fn router_when_method_differs_then_answer_is_405_with_sorted_allow() {
    let mut router = Router::new(None);
    router.post("/submit", ok_handler()).expect("POST route should register");
    router.delete("/submit", ok_handler()).expect("DELETE route should register");

    let mut ctx = TestCtx::new("GET", "/submit");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 405);
    assert_eq!(ctx.body, "Method Not Allowed");
    assert_eq!(ctx.header("Allow"), Some("DELETE, OPTIONS, POST"));
}

#[test]
fn router_when_405_responder_is_set_then_it_answers_with_allow_in_place() {
    let mut router = Router::new(None);
    router.post("/submit", ok_handler()).expect("route should register");
    router.set_method_not_allowed(|ctx: &mut TestCtx| {
        ctx.set_status(405);
        ctx.write_body("try another method");
        Ok(())
    });

    let mut ctx = TestCtx::new("GET", "/submit");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 405);
    assert_eq!(ctx.body, "try another method");
    assert_eq!(ctx.header("Allow"), Some("OPTIONS, POST"));
}

#[test]
fn router_when_405_handling_is_disabled_then_answer_falls_back_to_404() {
    let config = RouterConfig::builder().handle_method_not_allowed(false).build();
    let mut router = Router::new(Some(config));
    router.post("/submit", ok_handler()).expect("route should register");

    let mut ctx = TestCtx::new("GET", "/submit");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 404);
    assert_eq!(ctx.header("Allow"), None);
}

#[test]
fn router_when_options_requested_then_allow_is_answered_automatically() {
    let mut router = Router::new(None);
    router.get("/widgets", ok_handler()).expect("GET route should register");
    router.put("/widgets", ok_handler()).expect("PUT route should register");

    let mut ctx = TestCtx::new("OPTIONS", "/widgets");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 200);
    assert_eq!(ctx.header("Allow"), Some("GET, OPTIONS, PUT"));
    assert_eq!(ctx.body, "");
}

#[test]
fn router_when_server_wide_options_requested_then_allow_spans_all_routes() {
    let mut router = Router::new(None);
    router.get("/a", ok_handler()).expect("GET route should register");
    router.post("/b", ok_handler()).expect("POST route should register");

    let mut ctx = TestCtx::new("OPTIONS", "*");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 200);
    assert_eq!(ctx.header("Allow"), Some("GET, OPTIONS, POST"));
}

#[test]
fn router_when_global_options_responder_is_set_then_it_runs_after_allow() {
    let mut router = Router::new(None);
    router.get("/widgets", ok_handler()).expect("route should register");
    router.set_global_options(|ctx: &mut TestCtx| {
        ctx.set_status(204);
        Ok(())
    });

    let mut ctx = TestCtx::new("OPTIONS", "/widgets");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.status(), 204);
    assert_eq!(ctx.header("Allow"), Some("GET, OPTIONS"));
}

#[test]
fn router_when_registered_options_route_exists_then_it_wins_over_automatic_answer() {
    let mut router = Router::new(None);
    router.get("/widgets", ok_handler()).expect("GET route should register");
    router
        .options("/widgets", tag_handler("custom options"))
        .expect("OPTIONS route should register");

    let mut ctx = TestCtx::new("OPTIONS", "/widgets");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(ctx.body, "custom options");
    assert_eq!(ctx.header("Allow"), None);
}

#[test]
fn router_when_any_route_registered_then_every_method_reaches_it() {
    let mut router = Router::new(None);
    router.any("/health", tag_handler("alive")).expect("route should register");

    for method in ["GET", "POST", "DELETE", "REPORT"] {
        let mut ctx = TestCtx::new(method, "/health");
        router.serve(&mut ctx).expect("dispatch should succeed");
        assert_eq!(ctx.body, "alive", "method {method} should reach the handler");
    }
}

#[test]
fn router_when_method_tree_misses_then_any_tree_is_tried_next() {
    let mut router = Router::new(None);
    router.get("/specific", tag_handler("get")).expect("GET route should register");
    router.any("/specific", tag_handler("any")).expect("any route should register");

    let mut ctx = TestCtx::new("GET", "/specific");
    router.serve(&mut ctx).expect("dispatch should succeed");
    assert_eq!(ctx.body, "get");

    let mut ctx = TestCtx::new("POST", "/specific");
    router.serve(&mut ctx).expect("dispatch should succeed");
    assert_eq!(ctx.body, "any");
}

#[test]
fn router_when_handler_fails_then_answer_is_json_500_and_error_returns() {
    let mut router = Router::new(None);
    router
        .get("/explode", failing_handler("storage offline"))
        .expect("route should register");

    let mut ctx = TestCtx::new("GET", "/explode");
    let err = router.serve(&mut ctx).expect_err("handler error should surface");

    assert_eq!(err.to_string(), "storage offline");
    assert_eq!(ctx.status(), 500);
    assert_eq!(ctx.header("Content-Type"), Some("application/json"));
    assert_eq!(ctx.body, r#"{"error":"storage offline"}"#);
}

#[test]
fn router_when_handler_chose_a_status_then_error_answer_keeps_it() {
    let mut router = Router::new(None);
    router
        .get("/teapot", handler_fn(|ctx: &mut TestCtx| {
            ctx.set_status(418);
            Err("short and stout".into())
        }))
        .expect("route should register");

    let mut ctx = TestCtx::new("GET", "/teapot");
    let err = router.serve(&mut ctx).expect_err("handler error should surface");

    assert_eq!(err.to_string(), "short and stout");
    assert_eq!(ctx.status(), 418);
}

#[test]
fn router_when_validation_fails_then_answer_is_400() {
    let mut router = Router::new(None);
    router
        .post("/ingest", Arc::new(RejectingHandler))
        .expect("route should register");

    let mut ctx = TestCtx::new("POST", "/ingest");
    let err = router.serve(&mut ctx).expect_err("validation error should surface");

    assert_eq!(err.to_string(), "payload rejected");
    assert_eq!(ctx.status(), 400);
    assert_ne!(ctx.body, "handled despite rejection");
}

#[test]
fn router_when_handler_panics_then_serve_contains_it_with_a_500() {
    let mut router = Router::new(None);
    router
        .get("/crash", panicking_handler("boom"))
        .expect("route should register");

    let mut ctx = TestCtx::new("GET", "/crash");
    router.serve(&mut ctx).expect("panic must not surface as an error");

    assert_eq!(ctx.status(), 500);
    assert_eq!(ctx.body, r#"{"error":"internal server error"}"#);
}

#[test]
fn router_when_panic_hook_is_set_then_it_shapes_the_answer() {
    let mut router = Router::new(None);
    router
        .get("/crash", panicking_handler("boom"))
        .expect("route should register");
    router.set_panic_handler(|ctx: &mut TestCtx, payload| {
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .unwrap_or("unknown");
        ctx.set_status(503);
        ctx.write_body(&format!("recovered from: {message}"));
    });

    let mut ctx = TestCtx::new("GET", "/crash");
    router.serve(&mut ctx).expect("panic must not surface as an error");

    assert_eq!(ctx.status(), 503);
    assert_eq!(ctx.body, "recovered from: boom");
}

#[test]
fn router_when_route_saving_is_enabled_then_template_lands_in_params() {
    let config = RouterConfig::builder().save_matched_route_path(true).build();
    let mut router = Router::new(Some(config));
    router
        .get("/users/{id}/posts", ok_handler())
        .expect("route should register");

    let mut ctx = TestCtx::new("GET", "/users/9/posts");
    router.serve(&mut ctx).expect("dispatch should succeed");

    assert_eq!(
        ctx.param(arbor_router_rs::MATCHED_ROUTE_PARAM),
        Some("/users/{id}/posts")
    );
    assert_eq!(ctx.param("id"), Some("9"));
}
