use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The closed set of action kinds interactive nodes may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Navigate,
    NavigateBack,
    Action,
    ApiCall,
    Logout,
}

/// What should happen when a node is interacted with.
///
/// The backend emits the route under either `to` or `navigate`, and some
/// card payloads omit `type` entirely when they only carry a route; both
/// variants are accepted here so the drift is absorbed at one boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    #[serde(default, rename = "type")]
    kind: Option<ActionKind>,

    #[serde(default, alias = "navigate")]
    pub to: Option<String>,

    /// Opaque command name for `ACTION` descriptors; interpreted by whoever
    /// listens on the command bus, never by the renderer.
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub method: Option<String>,

    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(default, alias = "successNavigate")]
    pub success_navigate: Option<String>,

    #[serde(default, alias = "failureNavigate")]
    pub failure_navigate: Option<String>,
}

impl ActionDescriptor {
    pub fn navigate(to: impl Into<String>) -> Self {
        Self {
            kind: Some(ActionKind::Navigate),
            to: Some(to.into()),
            ..Self::empty()
        }
    }

    pub fn api_call(url: impl Into<String>) -> Self {
        Self {
            kind: Some(ActionKind::ApiCall),
            url: Some(url.into()),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            kind: None,
            to: None,
            value: None,
            url: None,
            method: None,
            data: Map::new(),
            success_navigate: None,
            failure_navigate: None,
        }
    }

    /// The declared kind, inferring `NAVIGATE` for typeless descriptors that
    /// only carry a route.
    pub fn kind(&self) -> Option<ActionKind> {
        match self.kind {
            Some(kind) => Some(kind),
            None if self.to.is_some() => Some(ActionKind::Navigate),
            None => None,
        }
    }

    pub fn route(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn with_success_navigate(mut self, route: impl Into<String>) -> Self {
        self.success_navigate = Some(route.into());
        self
    }

    pub fn with_failure_navigate(mut self, route: impl Into<String>) -> Self {
        self.failure_navigate = Some(route.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn route_is_read_from_either_key() {
        let a: ActionDescriptor =
            serde_json::from_value(json!({"type": "NAVIGATE", "to": "/a"})).unwrap();
        assert_eq!(a.route(), Some("/a"));

        let b: ActionDescriptor =
            serde_json::from_value(json!({"type": "NAVIGATE", "navigate": "/b"})).unwrap();
        assert_eq!(b.route(), Some("/b"));
    }

    #[test]
    fn typeless_descriptor_with_route_is_a_navigation() {
        let a: ActionDescriptor = serde_json::from_value(json!({"navigate": "/card"})).unwrap();
        assert_eq!(a.kind(), Some(ActionKind::Navigate));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<ActionDescriptor, _> =
            serde_json::from_value(json!({"type": "TELEPORT", "to": "/x"}));
        assert!(result.is_err());
    }
}
