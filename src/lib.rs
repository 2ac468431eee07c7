//! A compressed radix tree HTTP path router.
//!
//! Routes are registered per method as path templates with `{name}`
//! parameters, `{name:regex}` constraints, compound segments such as
//! `{year}-{month}`, a trailing `{rest:*}` wildcard and an optional final
//! `{segment?}`. Lookup walks the tree byte-wise, captures parameters
//! without allocating, and reports when the other trailing-slash
//! spelling of the path would have matched.
//!
//! [`Router`] layers dispatch policy on top of the trees: 404 and 405
//! answers, automatic OPTIONS, trailing-slash and case-insensitive
//! redirects, and panic containment around handlers. [`Tree`] is public
//! for hosts that only want path matching.

#![forbid(unsafe_code)]

pub mod errors;
mod handler;
mod method;
mod params;
mod path;
mod pattern;
mod radix;
mod router;

pub use errors::{RouterError, RouterResult};
pub use handler::{Handler, HandlerError, HandlerRef, RequestContext, handler_fn};
pub use method::{
    METHOD_CONNECT, METHOD_DELETE, METHOD_GET, METHOD_HEAD, METHOD_OPTIONS, METHOD_PATCH,
    METHOD_POST, METHOD_PUT, METHOD_TRACE, METHOD_WILD,
};
pub use params::{Param, Params};
pub use path::{PathError, PathResult, clean_path};
pub use pattern::{PatternError, PatternResult};
pub use radix::{RadixError, RadixResult, Tree};
pub use router::{
    Group, MATCHED_ROUTE_PARAM, MiddlewareFn, PanicHook, Responder, Router, RouterConfig,
    RouterConfigBuilder,
};
