use crate::errors::{RouterError, RouterResult};
use crate::handler::{Handler, HandlerError, HandlerRef, RequestContext};
use crate::method::{
    METHOD_CONNECT, METHOD_DELETE, METHOD_GET, METHOD_HEAD, METHOD_OPTIONS, METHOD_PATCH,
    METHOD_POST, METHOD_PUT, METHOD_TRACE, METHOD_WILD, RESERVED_TREE_COUNT, WILD_TREE_INDEX,
    standard_method_index,
};
use crate::params::Params;
use crate::path::validate_path;
use crate::pattern::expand_optional_paths;
use crate::radix::Tree;
use crate::router::{Group, RouterConfig};
use hashbrown::HashMap as FastHashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Fallback responder for the 404, 405 and auto-OPTIONS outcomes.
pub type Responder<C> = Box<dyn Fn(&mut C) -> Result<(), HandlerError> + Send + Sync>;

/// Hook invoked with the panic payload when a handler panics.
pub type PanicHook<C> = Box<dyn Fn(&mut C, &(dyn Any + Send)) + Send + Sync>;

/// Parameter key under which the matched route template is stored when
/// [`RouterConfig::save_matched_route_path`] is enabled.
pub const MATCHED_ROUTE_PARAM: &str = "__matched_route_path";

/// Method-aware dispatcher over per-method route trees.
///
/// `C` is the host's request context; the router only touches it through
/// [`RequestContext`]. Standard verbs get fixed tree slots, custom methods
/// are appended on first registration, and the `*` pseudo-method holds
/// routes that answer every method.
pub struct Router<C: 'static> {
    pub(super) trees: Vec<Option<Tree<HandlerRef<C>>>>,
    custom_method_indices: FastHashMap<Box<str>, usize>,
    pub(super) registered_paths: FastHashMap<Box<str>, Vec<String>>,
    pub(super) global_allowed: String,
    tree_mutable: bool,
    pub(super) config: RouterConfig,
    pub(super) global_options: Option<Responder<C>>,
    pub(super) not_found: Option<Responder<C>>,
    pub(super) method_not_allowed: Option<Responder<C>>,
    pub(super) panic_handler: Option<PanicHook<C>>,
}

impl<C: 'static> Router<C> {
    pub fn new(config: Option<RouterConfig>) -> Self {
        let mut trees = Vec::with_capacity(RESERVED_TREE_COUNT);
        trees.resize_with(RESERVED_TREE_COUNT, || None);
        Self {
            trees,
            custom_method_indices: FastHashMap::default(),
            registered_paths: FastHashMap::default(),
            global_allowed: String::new(),
            tree_mutable: false,
            config: config.unwrap_or_default(),
            global_options: None,
            not_found: None,
            method_not_allowed: None,
            panic_handler: None,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Switches later registrations (and every existing tree) between
    /// conflict-on-duplicate and replace-on-duplicate behavior.
    pub fn set_mutable(&mut self, mutable: bool) {
        self.tree_mutable = mutable;
        for tree in self.trees.iter_mut().flatten() {
            tree.set_mutable(mutable);
        }
    }

    pub(super) fn method_index(&self, method: &str) -> Option<usize> {
        standard_method_index(method)
            .or_else(|| self.custom_method_indices.get(method).copied())
    }

    /// Resolves `path` under `method` without dispatching.
    ///
    /// Falls back to the `*` tree when the method tree yields neither a
    /// handler nor a redirect hint. The boolean reports whether the other
    /// trailing-slash spelling would have matched.
    pub fn lookup<'r, 'p>(
        &'r self,
        method: &str,
        path: &'p str,
        params: &mut Params<'r, 'p>,
    ) -> (Option<&'r HandlerRef<C>>, bool) {
        let Some(index) = self.method_index(method) else {
            return (None, false);
        };
        if let Some(tree) = self.trees[index].as_ref() {
            let (handler, tsr) = tree.get(path, params);
            if handler.is_some() || tsr {
                return (handler, tsr);
            }
        }
        if let Some(tree) = self.trees[WILD_TREE_INDEX].as_ref() {
            return tree.get(path, params);
        }
        (None, false)
    }

    /// Registered route templates as `(method, path)` pairs, in no
    /// particular order.
    pub fn registered_routes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.registered_paths.iter().flat_map(|(method, paths)| {
            paths.iter().map(move |path| (&**method, path.as_str()))
        })
    }

    pub fn set_not_found<F>(&mut self, responder: F)
    where
        F: Fn(&mut C) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.not_found = Some(Box::new(responder));
    }

    pub fn set_method_not_allowed<F>(&mut self, responder: F)
    where
        F: Fn(&mut C) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.method_not_allowed = Some(Box::new(responder));
    }

    /// Responder run for automatic OPTIONS answers, after the `Allow`
    /// header is set.
    pub fn set_global_options<F>(&mut self, responder: F)
    where
        F: Fn(&mut C) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.global_options = Some(Box::new(responder));
    }

    pub fn set_panic_handler<F>(&mut self, hook: F)
    where
        F: Fn(&mut C, &(dyn Any + Send)) + Send + Sync + 'static,
    {
        self.panic_handler = Some(Box::new(hook));
    }
}

impl<C: RequestContext + 'static> Router<C> {
    /// Registers `handler` for `method` and `path`.
    ///
    /// Custom methods are accepted and get their own tree. A path with an
    /// optional segment registers both of its spellings. Conflicts with
    /// earlier registrations surface as errors unless the router was made
    /// mutable.
    pub fn handle(
        &mut self,
        method: &str,
        path: &str,
        handler: HandlerRef<C>,
    ) -> RouterResult<()> {
        if method.is_empty() {
            return Err(RouterError::EmptyMethod {
                path: path.to_string(),
            });
        }
        validate_path(path)?;

        tracing::event!(
            tracing::Level::TRACE,
            operation = "router_handle",
            method = %method,
            path = %path
        );

        let expanded = expand_optional_paths(path)?;

        let index = match self.method_index(method) {
            Some(index) => index,
            None => {
                let index = self.trees.len();
                self.custom_method_indices.insert(method.into(), index);
                self.trees.push(None);
                index
            }
        };

        let handler: HandlerRef<C> = if self.config.save_matched_route_path {
            Arc::new(SaveMatchedRoute {
                route: path.into(),
                inner: handler,
            })
        } else {
            handler
        };

        let mutable = self.tree_mutable;
        let tree = self.trees[index].get_or_insert_with(|| {
            let mut tree = Tree::new();
            tree.set_mutable(mutable);
            tree
        });

        if expanded.is_empty() {
            tree.add(path, handler)?;
        } else {
            for variant in &expanded {
                tree.add(variant, handler.clone())?;
            }
        }

        self.registered_paths
            .entry_ref(method)
            .or_default()
            .push(path.to_string());
        self.global_allowed = self.allowed(METHOD_WILD, "");

        Ok(())
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

    /// Registers `handler` for every method, current and future.
    pub fn any(&mut self, path: &str, handler: HandlerRef<C>) -> RouterResult<()> {
        self.handle(METHOD_WILD, path, handler)
    }

    /// Starts a route group under `prefix`.
    pub fn group(&mut self, prefix: &str) -> RouterResult<Group<'_, C>> {
        Group::new(self, prefix)
    }
}

impl<C: 'static> Default for Router<C> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<C: 'static> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("registered_paths", &self.registered_paths)
            .field("mutable", &self.tree_mutable)
            .finish_non_exhaustive()
    }
}

struct SaveMatchedRoute<C> {
    route: Box<str>,
    inner: HandlerRef<C>,
}

impl<C: RequestContext> Handler<C> for SaveMatchedRoute<C> {
    fn validate(&self, ctx: &mut C) -> Result<(), HandlerError> {
        self.inner.validate(ctx)
    }

    fn handle(&self, ctx: &mut C) -> Result<(), HandlerError> {
        ctx.set_param(MATCHED_ROUTE_PARAM, &self.route);
        self.inner.handle(ctx)
    }
}
