//! Coercion of the backend's loosely-typed style objects into a typed form.
//!
//! The backend is not consistent about key casing (`fontSize` vs `FontSize`),
//! so every lookup tolerates both the camelCase and PascalCase variant of a
//! key. Unknown keys are ignored and a field that fails to coerce falls back
//! to its default; style coercion never fails a node.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::node::UiNode;

/// The subset of the native styling vocabulary the backend emits.
///
/// Every field is optional; hosts apply their own defaults for absent ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    // Layout
    pub flex: Option<f32>,
    pub flex_grow: Option<f32>,
    pub flex_direction: Option<String>,
    pub flex_wrap: Option<String>,
    pub align_items: Option<String>,
    pub align_self: Option<String>,
    pub justify_content: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub max_height: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,

    // Spacing
    pub padding: Option<f32>,
    pub padding_top: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub padding_left: Option<f32>,
    pub padding_right: Option<f32>,
    pub padding_horizontal: Option<f32>,
    pub padding_vertical: Option<f32>,
    pub margin_top: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub margin_left: Option<f32>,
    pub margin_right: Option<f32>,
    pub margin_horizontal: Option<f32>,

    // Decoration
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_radius: Option<f32>,
    pub border_width: Option<f32>,
    pub border_top_width: Option<f32>,
    pub border_bottom_width: Option<f32>,
    pub opacity: Option<f32>,
    pub shadow: Option<bool>,

    // Typography
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<String>,
    pub text_align: Option<String>,
    pub letter_spacing: Option<f32>,
    pub line_height: Option<f32>,

    // Scroll behavior
    pub horizontal: Option<bool>,
    pub shows_horizontal_scroll_indicator: Option<bool>,
}

impl Style {
    /// Coerces a style object, tolerating casing drift and ignoring
    /// everything it does not understand.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            flex: num(map, "flex"),
            flex_grow: num(map, "flexGrow"),
            flex_direction: string(map, "flexDirection"),
            flex_wrap: string(map, "flexWrap"),
            align_items: string(map, "alignItems"),
            align_self: string(map, "alignSelf"),
            justify_content: string(map, "justifyContent"),
            width: num(map, "width"),
            height: num(map, "height"),
            max_height: num(map, "maxHeight"),
            top: num(map, "top"),
            bottom: num(map, "bottom"),
            left: num(map, "left"),
            right: num(map, "right"),
            padding: num(map, "padding"),
            padding_top: num(map, "paddingTop"),
            padding_bottom: num(map, "paddingBottom"),
            padding_left: num(map, "paddingLeft"),
            padding_right: num(map, "paddingRight"),
            padding_horizontal: num(map, "paddingHorizontal"),
            padding_vertical: num(map, "paddingVertical"),
            margin_top: num(map, "marginTop"),
            margin_bottom: num(map, "marginBottom"),
            margin_left: num(map, "marginLeft"),
            margin_right: num(map, "marginRight"),
            margin_horizontal: num(map, "marginHorizontal"),
            background_color: string(map, "backgroundColor"),
            border_color: string(map, "borderColor"),
            border_radius: num(map, "borderRadius"),
            border_width: num(map, "borderWidth"),
            border_top_width: num(map, "borderTopWidth"),
            border_bottom_width: num(map, "borderBottomWidth"),
            opacity: num(map, "opacity"),
            shadow: boolean(map, "shadow"),
            color: string(map, "color"),
            text_color: string(map, "textColor"),
            font_size: num(map, "fontSize"),
            font_weight: font_weight(map),
            text_align: string(map, "textAlign"),
            letter_spacing: num(map, "letterSpacing"),
            line_height: num(map, "lineHeight"),
            horizontal: boolean(map, "horizontal"),
            shows_horizontal_scroll_indicator: boolean(map, "showsHorizontalScrollIndicator"),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    /// The style of a node: a nested `data.style` object when present,
    /// otherwise the node's `data` map itself (layout containers put style
    /// attributes directly on `data`).
    pub fn of_node(node: &UiNode) -> Self {
        match node.data.get("style") {
            Some(value @ Value::Object(_)) => Self::from_value(value),
            _ => Self::from_map(&node.data),
        }
    }
}

/// Looks a key up under its camelCase name, then its PascalCase variant.
fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    let mut pascal = String::with_capacity(key.len());
    let mut chars = key.chars();
    if let Some(first) = chars.next() {
        pascal.extend(first.to_uppercase());
        pascal.push_str(chars.as_str());
    }
    map.get(&pascal)
}

fn num(map: &Map<String, Value>, key: &str) -> Option<f32> {
    lookup(map, key).and_then(Value::as_f64).map(|n| n as f32)
}

fn string(map: &Map<String, Value>, key: &str) -> Option<String> {
    lookup(map, key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn boolean(map: &Map<String, Value>, key: &str) -> Option<bool> {
    lookup(map, key).and_then(Value::as_bool)
}

/// `fontWeight` comes as a string ("600", "bold"), a bare number, or a
/// `bold: true` shorthand.
fn font_weight(map: &Map<String, Value>) -> Option<String> {
    match lookup(map, "fontWeight").or_else(|| lookup(map, "weight")) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => match boolean(map, "bold") {
            Some(true) => Some("bold".to_string()),
            _ => None,
        },
    }
}
