#![allow(dead_code)]

use arbor_router_rs::{HandlerError, HandlerRef, RequestContext, handler_fn};
use std::collections::BTreeMap;

/// Minimal request/response carrier for dispatch tests.
pub struct TestCtx {
    method: String,
    path: String,
    query: String,
    status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub params: BTreeMap<String, String>,
    pub notes: Vec<String>,
}

impl TestCtx {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            query: String::new(),
            status: 200,
            headers: BTreeMap::new(),
            body: String::new(),
            params: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_query(method: &str, path: &str, query: &str) -> Self {
        let mut ctx = Self::new(method, path);
        ctx.query = query.to_string();
        ctx
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn note(&mut self, note: &str) {
        self.notes.push(note.to_string());
    }
}

impl RequestContext for TestCtx {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query_string(&self) -> &str {
        &self.query
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn set_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    fn write_body(&mut self, body: &str) {
        self.body = body.to_string();
    }
}

/// Handler that writes `tag` into the response body.
pub fn tag_handler(tag: &'static str) -> HandlerRef<TestCtx> {
    handler_fn(move |ctx: &mut TestCtx| {
        ctx.body = tag.to_string();
        Ok(())
    })
}

pub fn ok_handler() -> HandlerRef<TestCtx> {
    handler_fn(|_ctx: &mut TestCtx| Ok(()))
}

pub fn failing_handler(message: &'static str) -> HandlerRef<TestCtx> {
    handler_fn(move |_ctx: &mut TestCtx| Err(HandlerError::from(message)))
}

pub fn panicking_handler(message: &'static str) -> HandlerRef<TestCtx> {
    handler_fn(move |_ctx: &mut TestCtx| panic!("{message}"))
}

/// Handler whose validation step always rejects the request.
pub struct RejectingHandler;

impl arbor_router_rs::Handler<TestCtx> for RejectingHandler {
    fn validate(&self, _ctx: &mut TestCtx) -> Result<(), HandlerError> {
        Err(HandlerError::from("payload rejected"))
    }

    fn handle(&self, ctx: &mut TestCtx) -> Result<(), HandlerError> {
        ctx.body = "handled despite rejection".to_string();
        Ok(())
    }
}
