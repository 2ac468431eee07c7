mod dispatch;
mod group;
mod options;
mod service;

pub use group::{Group, MiddlewareFn};
pub use options::{RouterConfig, RouterConfigBuilder};
pub use service::{MATCHED_ROUTE_PARAM, PanicHook, Responder, Router};
