//! The declarative node tree a backend screen document is made of.

mod action;

pub use action::{ActionDescriptor, ActionKind};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One typed element of the declarative UI tree returned by the backend.
///
/// `data` is schema-free by contract: each node renderer interprets only the
/// keys it understands and ignores the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct UiNode {
    pub node_type: String,
    pub data: Map<String, Value>,
    pub children: Vec<UiNode>,
}

impl UiNode {
    /// Builds a minimal text node. Also the shape bare strings and numbers
    /// are coerced into when they appear where a node was expected.
    pub fn text(content: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("text".to_string(), Value::String(content.into()));
        Self {
            node_type: "TEXT".to_string(),
            data,
            children: Vec::new(),
        }
    }

    /// Converts a raw JSON value into a node, degrading instead of failing:
    /// primitives become text nodes, anything else becomes a typeless node
    /// that renders nothing.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::text(text),
            Value::Number(n) => Self::text(n.to_string()),
            Value::Object(mut map) => {
                let node_type = match map.remove("type") {
                    Some(Value::String(t)) => t,
                    _ => String::new(),
                };
                let data = match map.remove("data") {
                    Some(Value::Object(d)) => d,
                    _ => Map::new(),
                };
                let children = match map.remove("children") {
                    Some(Value::Array(items)) => {
                        items.into_iter().map(UiNode::from_value).collect()
                    }
                    _ => Vec::new(),
                };
                Self {
                    node_type,
                    data,
                    children,
                }
            }
            other => {
                tracing::warn!(found = %other, "Expected a node object; dropping value");
                Self {
                    node_type: String::new(),
                    data: Map::new(),
                    children: Vec::new(),
                }
            }
        }
    }

    /// The action descriptor embedded under `data.action` or `data.onPress`,
    /// if the node carries one. A malformed descriptor is discarded with a
    /// warning rather than failing the node.
    pub fn action(&self) -> Option<ActionDescriptor> {
        let raw = self.data.get("action").or_else(|| self.data.get("onPress"))?;
        match serde_json::from_value(raw.clone()) {
            Ok(action) => Some(action),
            Err(error) => {
                tracing::warn!(
                    node_type = %self.node_type,
                    %error,
                    "Discarding malformed action descriptor"
                );
                None
            }
        }
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Numeric field, accepting integers and floats alike.
    pub fn f32_field(&self, key: &str) -> Option<f32> {
        self.data.get(key).and_then(Value::as_f64).map(|n| n as f32)
    }

    pub fn u32_field(&self, key: &str) -> Option<u32> {
        self.data.get(key).and_then(Value::as_u64).map(|n| n as u32)
    }

    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.data.get(key).and_then(Value::as_u64)
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.data.get(key).and_then(Value::as_bool)
    }
}

impl<'de> Deserialize<'de> for UiNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(UiNode::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives_become_text_nodes() {
        let node: UiNode = serde_json::from_value(json!("Hello")).unwrap();
        assert_eq!(node.node_type, "TEXT");
        assert_eq!(node.str_field("text"), Some("Hello"));

        let node: UiNode = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(node.str_field("text"), Some("42"));
    }

    #[test]
    fn children_keep_document_order() {
        let node: UiNode = serde_json::from_value(json!({
            "type": "VIEW",
            "children": [
                {"type": "TEXT", "data": {"text": "a"}},
                {"type": "TEXT", "data": {"text": "b"}},
            ]
        }))
        .unwrap();
        let texts: Vec<_> = node
            .children
            .iter()
            .filter_map(|c| c.str_field("text"))
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn node_without_type_renders_as_typeless() {
        let node: UiNode = serde_json::from_value(json!({"data": {"text": "x"}})).unwrap();
        assert!(node.node_type.is_empty());
    }

    #[test]
    fn action_is_read_from_either_key() {
        let node: UiNode = serde_json::from_value(json!({
            "type": "BUTTON",
            "data": {"action": {"type": "NAVIGATE", "to": "/next"}}
        }))
        .unwrap();
        assert_eq!(node.action().unwrap().route(), Some("/next"));

        let node: UiNode = serde_json::from_value(json!({
            "type": "ICON_BUTTON",
            "data": {"onPress": {"type": "NAVIGATE_BACK"}}
        }))
        .unwrap();
        assert_eq!(node.action().unwrap().kind(), Some(ActionKind::NavigateBack));
    }
}
