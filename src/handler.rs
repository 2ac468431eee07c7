use std::sync::Arc;

/// Error produced by a handler's validate or handle step.
///
/// The dispatch boundary converts these into HTTP responses; the concrete
/// type is up to the host.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Shared reference to a registered handler.
pub type HandlerRef<C> = Arc<dyn Handler<C>>;

/// The handler capability a route registers.
///
/// `validate` runs before `handle`; a validation failure is answered with a
/// 400, a handling failure with a 500. The default `validate` accepts
/// everything, so plain handlers only implement `handle`.
pub trait Handler<C>: Send + Sync {
    fn validate(&self, _ctx: &mut C) -> Result<(), HandlerError> {
        Ok(())
    }

    fn handle(&self, ctx: &mut C) -> Result<(), HandlerError>;
}

/// The slice of a request/response exchange the router needs.
///
/// Everything else about the HTTP layer stays with the host. `write_body`
/// replaces any previous body; `status` lets the router leave a status a
/// handler already chose untouched when converting its error.
pub trait RequestContext {
    fn method(&self) -> &str;

    fn path(&self) -> &str;

    fn query_string(&self) -> &str {
        ""
    }

    fn status(&self) -> u16 {
        200
    }

    fn set_param(&mut self, key: &str, value: &str);

    fn set_status(&mut self, status: u16);

    fn set_header(&mut self, name: &str, value: &str);

    fn write_body(&mut self, body: &str);
}

struct FnHandler<F>(F);

impl<C, F> Handler<C> for FnHandler<F>
where
    F: Fn(&mut C) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, ctx: &mut C) -> Result<(), HandlerError> {
        (self.0)(ctx)
    }
}

/// Wraps a closure as a handler with the default validation step.
pub fn handler_fn<C, F>(f: F) -> HandlerRef<C>
where
    C: 'static,
    F: Fn(&mut C) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}
