//! Route descriptors supplied by route discovery.

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;

/// One discovered endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Route URL, always with a leading `/`.
    pub url: String,
    /// HTTP method as declared by the host (`GET`, `post`, ...).
    pub http_method: String,
    /// Controller name without the `Controller` suffix, e.g. `User`.
    pub controller_name: String,
    /// Controller method handling the route, e.g. `store`.
    pub action_name: String,
    /// Whether the route sits behind authentication middleware.
    pub requires_auth: bool,
}

impl RouteDescriptor {
    pub fn new(
        url: impl Into<String>,
        http_method: impl Into<String>,
        controller_name: impl Into<String>,
        action_name: impl Into<String>,
    ) -> Self {
        Self {
            url: normalize_url(&url.into()),
            http_method: http_method.into(),
            controller_name: controller_name.into(),
            action_name: action_name.into(),
            requires_auth: false,
        }
    }

    pub fn with_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Returns true if the URL starts with `prefix`. Both sides are
    /// compared with a leading `/`, so `api` and `/api` filter alike.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.url.starts_with(&normalize_url(prefix))
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}@{}",
            self.http_method.to_uppercase(),
            self.url,
            self.controller_name,
            self.action_name
        )
    }
}

/// Prefix `url` with `/` unless it already has one.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn controller_action_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:.*\\)?([A-Za-z_][A-Za-z0-9_]*)@([A-Za-z_][A-Za-z0-9_]*)$")
            .expect("controller action pattern is valid")
    })
}

/// Split a controller action string such as
/// `App\Http\Controllers\UserController@store` into `("User", "store")`.
///
/// Returns `None` for closures and anything else without a `Class@method`
/// shape.
pub fn parse_controller_action(uses: &str) -> Option<(String, String)> {
    let caps = controller_action_pattern().captures(uses.trim())?;
    let class = caps.get(1)?.as_str();
    let action = caps.get(2)?.as_str();
    let controller = class.strip_suffix("Controller").unwrap_or(class);
    if controller.is_empty() {
        return None;
    }
    Some((controller.to_string(), action.to_string()))
}
