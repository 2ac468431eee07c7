use crate::errors::{RouterError, RouterResult};
use crate::handler::{Handler, HandlerError, HandlerRef, RequestContext};
use crate::method::{
    METHOD_CONNECT, METHOD_DELETE, METHOD_GET, METHOD_HEAD, METHOD_OPTIONS, METHOD_PATCH,
    METHOD_POST, METHOD_PUT, METHOD_TRACE, METHOD_WILD,
};
use crate::path::validate_path;
use crate::router::Router;
use std::sync::Arc;

/// Before-hook run ahead of a group's handlers.
///
/// An error skips the remaining hooks and the handler; dispatch answers
/// with the usual error response.
pub type MiddlewareFn<C> = Arc<dyn Fn(&mut C) -> Result<(), HandlerError> + Send + Sync>;

/// Registration scope that prepends a prefix and a middleware chain.
///
/// Groups borrow the router mutably, so they are a registration-time
/// construct; nothing group-related survives into dispatch except the
/// wrapped handlers.
pub struct Group<'r, C: 'static> {
    router: &'r mut Router<C>,
    prefix: String,
    middlewares: Vec<MiddlewareFn<C>>,
}

impl<'r, C: RequestContext + 'static> Group<'r, C> {
    pub(super) fn new(router: &'r mut Router<C>, prefix: &str) -> RouterResult<Self> {
        validate_path(prefix)?;
        if prefix != "/" && prefix.ends_with('/') {
            return Err(RouterError::GroupPrefixTrailingSlash {
                prefix: prefix.to_string(),
            });
        }
        // A bare "/" prefix contributes nothing to the joined paths.
        let prefix = if prefix == "/" {
            String::new()
        } else {
            prefix.to_string()
        };
        Ok(Self {
            router,
            prefix,
            middlewares: Vec::new(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Appends a middleware; hooks run in the order they were added.
    pub fn use_middleware<F>(&mut self, middleware: F) -> &mut Self
    where
        F: Fn(&mut C) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Registers `prefix + path` on the underlying router, with the
    /// group's middleware chain wrapped around `handler`.
    pub fn handle(
        &mut self,
        method: &str,
        path: &str,
        handler: HandlerRef<C>,
    ) -> RouterResult<()> {
        if self.prefix.is_empty() {
            validate_path(path)?;
        }
        let full = format!("{}{}", self.prefix, path);
        let handler = self.wrap(handler);
        self.router.handle(method, &full, handler)
    }

    pub fn get(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_GET, path, handler)
    }

    pub fn head(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_HEAD, path, handler)
    }

    pub fn post(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_POST, path, handler)
    }

    pub fn put(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_PUT, path, handler)
    }

    pub fn patch(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_PATCH, path, handler)
    }

    pub fn delete(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_DELETE, path, handler)
    }

    pub fn connect(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_CONNECT, path, handler)
    }

    pub fn options(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_OPTIONS, path, handler)
    }

    pub fn trace(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_TRACE, path, handler)
    }

    pub fn any(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_WILD, path, handler)
    }

    /// Builds a nested group under `prefix + path`.
    ///
    /// The child starts with a copy of this group's middleware chain;
    /// hooks it adds stay its own.
    pub fn group<F>(&mut self, path: &str, build: F) -> RouterResult<()>
    where
        F: FnOnce(&mut Group<'_, C>) -> RouterResult<()>,
    {
        let prefix = format!("{}{}", self.prefix, path);
        let middlewares = self.middlewares.clone();
        let mut child = Group::new(&mut *self.router, &prefix)?;
        child.middlewares = middlewares;
        build(&mut child)
    }

    fn wrap(&self, handler: HandlerRef<C>) -> HandlerRef<C> {
        if self.middlewares.is_empty() {
            return handler;
        }
        Arc::new(MiddlewareStack {
            middlewares: self.middlewares.clone(),
            inner: handler,
        })
    }
}

struct MiddlewareStack<C> {
    middlewares: Vec<MiddlewareFn<C>>,
    inner: HandlerRef<C>,
}

impl<C> Handler<C> for MiddlewareStack<C> {
    fn validate(&self, ctx: &mut C) -> Result<(), HandlerError> {
        self.inner.validate(ctx)
    }

    fn handle(&self, ctx: &mut C) -> Result<(), HandlerError> {
        for middleware in &self.middlewares {
            middleware(ctx)?;
        }
        self.inner.handle(ctx)
    }
}
