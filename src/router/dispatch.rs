use crate::handler::{HandlerError, HandlerRef, RequestContext};
use crate::method::{
    METHOD_CONNECT, METHOD_GET, METHOD_OPTIONS, METHOD_WILD, RESERVED_TREE_COUNT,
    WILD_TREE_INDEX,
};
use crate::params::Params;
use crate::path::clean_path;
use crate::radix::Tree;
use crate::router::Router;
use smallvec::SmallVec;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

impl<C: 'static> Router<C> {
    /// Methods that can answer `path`, as a sorted `Allow` header value.
    ///
    /// `path` of `*` (or `/*`) means server-wide: with an empty
    /// `req_method` the list is rebuilt from the registered methods,
    /// otherwise the cached value is returned. Empty result means no
    /// method matches.
    pub(super) fn allowed(&self, path: &str, req_method: &str) -> String {
        let mut methods: SmallVec<[&str; RESERVED_TREE_COUNT]> = SmallVec::new();

        if path == METHOD_WILD || path == "/*" {
            if !req_method.is_empty() {
                return self.global_allowed.clone();
            }
            for method in self.registered_paths.keys() {
                if &**method == METHOD_OPTIONS {
                    continue;
                }
                methods.push(method);
            }
        } else {
            let mut params = Params::new();
            for method in self.registered_paths.keys() {
                if &**method == req_method || &**method == METHOD_OPTIONS {
                    continue;
                }
                let Some(index) = self.method_index(method) else {
                    continue;
                };
                let Some(tree) = self.trees[index].as_ref() else {
                    continue;
                };
                params.clear();
                let (handler, _) = tree.get(path, &mut params);
                if handler.is_some() {
                    methods.push(method);
                }
            }
        }

        if methods.is_empty() {
            return String::new();
        }
        methods.push(METHOD_OPTIONS);
        methods.sort_unstable();
        methods.join(", ")
    }
}

impl<C: RequestContext + 'static> Router<C> {
    /// Dispatches the request carried by `ctx`.
    ///
    /// A handler panic is contained here: the panic hook (or a default
    /// 500 answer) runs and `serve` returns `Ok`. Handler errors come
    /// back to the caller after the error response has been written.
    #[tracing::instrument(skip(self, ctx), fields(method = %ctx.method(), path = %ctx.path()))]
    pub fn serve(&self, ctx: &mut C) -> Result<(), HandlerError> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.serve_inner(ctx))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                if let Some(hook) = &self.panic_handler {
                    hook(ctx, &*payload);
                } else {
                    self.default_panic_response(ctx, &*payload);
                }
                Ok(())
            }
        }
    }

    fn serve_inner(&self, ctx: &mut C) -> Result<(), HandlerError> {
        let method = ctx.method().to_string();
        let path = ctx.path().to_string();

        tracing::event!(
            tracing::Level::TRACE,
            operation = "dispatch",
            method = %method,
            path = %path
        );

        if let Some(index) = self.method_index(&method) {
            if let Some(tree) = self.trees[index].as_ref() {
                let mut params = Params::new();
                let (handler, tsr) = tree.get(&path, &mut params);
                if let Some(handler) = handler {
                    return self.invoke(ctx, handler, &params);
                }
                if method != METHOD_CONNECT
                    && path != "/"
                    && self.try_redirect(ctx, tree, &method, &path, tsr)
                {
                    return Ok(());
                }
            }
        }

        if let Some(tree) = self.trees[WILD_TREE_INDEX].as_ref() {
            let mut params = Params::new();
            let (handler, tsr) = tree.get(&path, &mut params);
            if let Some(handler) = handler {
                return self.invoke(ctx, handler, &params);
            }
            if method != METHOD_CONNECT
                && path != "/"
                && self.try_redirect(ctx, tree, &method, &path, tsr)
            {
                return Ok(());
            }
        }

        if self.config.handle_options && method == METHOD_OPTIONS {
            let allow = self.allowed(&path, METHOD_OPTIONS);
            if !allow.is_empty() {
                ctx.set_header("Allow", &allow);
                if let Some(responder) = &self.global_options {
                    return responder(ctx);
                }
                return Ok(());
            }
        } else if self.config.handle_method_not_allowed {
            let allow = self.allowed(&path, &method);
            if !allow.is_empty() {
                ctx.set_header("Allow", &allow);
                if let Some(responder) = &self.method_not_allowed {
                    return responder(ctx);
                }
                ctx.set_status(405);
                ctx.write_body("Method Not Allowed");
                return Ok(());
            }
        }

        if let Some(responder) = &self.not_found {
            return responder(ctx);
        }
        ctx.set_status(404);
        ctx.write_body("Not Found");
        Ok(())
    }

    fn invoke(
        &self,
        ctx: &mut C,
        handler: &HandlerRef<C>,
        params: &Params<'_, '_>,
    ) -> Result<(), HandlerError> {
        for param in params {
            ctx.set_param(param.key, param.value);
        }
        if let Err(err) = handler.validate(ctx) {
            ctx.set_status(400);
            return self.error_response(ctx, err);
        }
        if let Err(err) = handler.handle(ctx) {
            return self.error_response(ctx, err);
        }
        Ok(())
    }

    /// Tries the trailing-slash and case-insensitive recoveries, in that
    /// order. Returns whether a redirect response was written.
    fn try_redirect(
        &self,
        ctx: &mut C,
        tree: &Tree<HandlerRef<C>>,
        method: &str,
        path: &str,
        tsr: bool,
    ) -> bool {
        let code = if method == METHOD_GET { 301 } else { 308 };

        if tsr && self.config.redirect_trailing_slash {
            let mut location = if path.len() > 1 && path.ends_with('/') {
                path[..path.len() - 1].to_string()
            } else {
                format!("{path}/")
            };
            append_query(&mut location, ctx);
            ctx.set_status(code);
            ctx.set_header("Location", &location);
            return true;
        }

        if self.config.redirect_fixed_path {
            let cleaned = clean_path(path);
            if let Some((fixed, _)) =
                tree.find_case_insensitive(&cleaned, self.config.redirect_trailing_slash)
            {
                // The recovered spelling must actually differ, or the
                // redirect would point back at itself.
                if fixed != path {
                    let mut location = fixed;
                    append_query(&mut location, ctx);
                    ctx.set_status(code);
                    ctx.set_header("Location", &location);
                    return true;
                }
            }
        }

        false
    }

    /// Converts a handler error into a JSON error answer.
    ///
    /// A status chosen by the handler survives; only the 200 default is
    /// replaced with 500.
    fn error_response(&self, ctx: &mut C, err: HandlerError) -> Result<(), HandlerError> {
        if ctx.status() == 200 {
            ctx.set_status(500);
        }
        tracing::event!(
            tracing::Level::ERROR,
            operation = "dispatch_error",
            error = %err
        );
        ctx.set_header("Content-Type", "application/json");
        ctx.write_body(&serde_json::json!({ "error": err.to_string() }).to_string());
        Err(err)
    }

    fn default_panic_response(&self, ctx: &mut C, payload: &(dyn Any + Send)) {
        tracing::event!(
            tracing::Level::ERROR,
            operation = "dispatch_panic",
            message = %panic_message(payload)
        );
        ctx.set_status(500);
        ctx.set_header("Content-Type", "application/json");
        ctx.write_body(&serde_json::json!({ "error": "internal server error" }).to_string());
    }
}

fn append_query<C: RequestContext>(location: &mut String, ctx: &C) {
    let query = ctx.query_string();
    if !query.is_empty() {
        location.push('?');
        location.push_str(query);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "opaque panic payload"
    }
}
