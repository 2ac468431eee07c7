use serde::{Deserialize, Serialize};

/// Dispatch policy toggles.
///
/// Every flag defaults to the permissive behavior except
/// `save_matched_route_path`, which costs a copy per request and is
/// therefore opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Answer `/path/` with a redirect to `/path` (and the other way
    /// around) when only the other spelling is registered.
    pub redirect_trailing_slash: bool,
    /// Clean the path and retry case-insensitively before giving up,
    /// redirecting to the recovered spelling.
    pub redirect_fixed_path: bool,
    /// Answer 405 with an `Allow` header when the path exists under
    /// other methods.
    pub handle_method_not_allowed: bool,
    /// Answer OPTIONS requests automatically from the registered routes.
    pub handle_options: bool,
    /// Expose the matched route template to handlers as a parameter.
    pub save_matched_route_path: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
            handle_options: true,
            save_matched_route_path: false,
        }
    }
}

impl RouterConfig {
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::default()
    }
}

/// Builder for [`RouterConfig`].
#[derive(Debug, Clone, Default)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
    pub fn redirect_trailing_slash(mut self, value: bool) -> Self {
        self.config.redirect_trailing_slash = value;
        self
    }

    pub fn redirect_fixed_path(mut self, value: bool) -> Self {
        self.config.redirect_fixed_path = value;
        self
    }

    pub fn handle_method_not_allowed(mut self, value: bool) -> Self {
        self.config.handle_method_not_allowed = value;
        self
    }

    pub fn handle_options(mut self, value: bool) -> Self {
        self.config.handle_options = value;
        self
    }

    pub fn save_matched_route_path(mut self, value: bool) -> Self {
        self.config.save_matched_route_path = value;
        self
    }

    pub fn build(self) -> RouterConfig {
        self.config
    }
}
