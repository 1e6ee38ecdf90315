//! Route manifest loading.
//!
//! Route discovery and rule extraction happen inside the host framework.
//! Their combined output is a JSON manifest: one entry per route with its
//! methods, controller action, middleware and request rules.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ManifestError, ManifestResult};
use crate::route::{normalize_url, parse_controller_action};
use crate::{FieldRuleSet, RouteDescriptor};

/// A route together with the rules of its request payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredRoute {
    pub descriptor: RouteDescriptor,
    pub rules: FieldRuleSet,
}

impl DiscoveredRoute {
    pub fn new(descriptor: RouteDescriptor, rules: FieldRuleSet) -> Self {
        Self { descriptor, rules }
    }
}

/// Supplies routes, in discovery order, with their rule sets.
pub trait RouteSource {
    fn routes(&self) -> Vec<DiscoveredRoute>;
}

impl RouteSource for Vec<DiscoveredRoute> {
    fn routes(&self) -> Vec<DiscoveredRoute> {
        self.clone()
    }
}

impl RouteSource for [DiscoveredRoute] {
    fn routes(&self) -> Vec<DiscoveredRoute> {
        self.to_vec()
    }
}

/// One raw manifest entry, before resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub controller: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    /// Controller action string, e.g. `App\Http\Controllers\UserController@store`.
    #[serde(default)]
    pub uses: Option<String>,
    #[serde(default)]
    pub middleware: Vec<String>,
    #[serde(default)]
    pub auth: Option<bool>,
    #[serde(default)]
    pub rules: FieldRuleSet,
}

impl ManifestEntry {
    /// The first declared method that is not `HEAD`.
    pub fn primary_method(&self) -> Option<&str> {
        self.method
            .iter()
            .chain(self.methods.iter())
            .map(|m| m.trim())
            .find(|m| !m.is_empty() && !m.eq_ignore_ascii_case("HEAD"))
    }

    /// Controller and action, from the explicit fields or the `uses` string.
    pub fn controller_action(&self) -> Option<(String, String)> {
        match (&self.controller, &self.action) {
            (Some(controller), Some(action)) => {
                let controller = controller.strip_suffix("Controller").unwrap_or(controller);
                Some((controller.to_string(), action.to_string()))
            }
            _ => self.uses.as_deref().and_then(parse_controller_action),
        }
    }

    /// Explicit `auth`, else any `auth` or `auth:<guard>` middleware.
    pub fn requires_auth(&self) -> bool {
        self.auth.unwrap_or_else(|| {
            self.middleware
                .iter()
                .any(|m| m == "auth" || m.starts_with("auth:"))
        })
    }

    /// Resolve into a route, or `None` when the entry has no usable
    /// method or no controller action.
    pub fn resolve(&self) -> Option<DiscoveredRoute> {
        let Some(method) = self.primary_method() else {
            warn!(url = %self.url, "skipping route without a usable HTTP method");
            return None;
        };
        let Some((controller, action)) = self.controller_action() else {
            warn!(url = %self.url, "skipping route without a controller action");
            return None;
        };
        let descriptor = RouteDescriptor::new(normalize_url(&self.url), method, controller, action)
            .with_auth(self.requires_auth());
        Some(DiscoveredRoute::new(descriptor, self.rules.clone()))
    }
}

/// A parsed route manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub routes: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load a manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ManifestResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ManifestError::read(path, e))?;
        let manifest: Manifest =
            serde_json::from_str(&source).map_err(|e| ManifestError::parse(path, e))?;
        debug!(path = %path.display(), entries = manifest.routes.len(), "loaded route manifest");
        Ok(manifest)
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

impl RouteSource for Manifest {
    fn routes(&self) -> Vec<DiscoveredRoute> {
        self.routes.iter().filter_map(ManifestEntry::resolve).collect()
    }
}
