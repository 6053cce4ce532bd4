//! The built-in node renderers and their registration.
//!
//! Each renderer interprets one node type's `data` payload, degrading
//! per-field to defaults instead of failing the node. The engine hands every
//! renderer its already-rendered children in document order.

use ahash::AHashMap;
use tracing::warn;

use super::RenderContext;
use crate::element::{
    Button, ButtonRole, Card, Container, ContainerRole, Element, IconElement, ImageElement,
    InputBinding, OtpInput, TextElement,
};
use crate::node::UiNode;
use crate::style::Style;

/// Defines the contract for rendering a specific node type into an element.
pub trait NodeRenderer: Send + Sync {
    fn node_type(&self) -> &str;

    /// Produces this node's element, or `None` for effect-only output.
    fn render(
        &self,
        node: &UiNode,
        children: Vec<Element>,
        cx: &RenderContext<'_>,
    ) -> Option<Element>;
}

/// Backend icon names that differ from the canonical icon vocabulary.
fn canonical_icon_name(name: &str) -> &str {
    match name {
        "arrow-back" => "arrow-left",
        other => other,
    }
}

struct SafeAreaRenderer;

impl NodeRenderer for SafeAreaRenderer {
    fn node_type(&self) -> &str {
        "SAFE_AREA"
    }
    fn render(&self, node: &UiNode, children: Vec<Element>, _: &RenderContext<'_>) -> Option<Element> {
        Some(Element::Container(Container {
            role: ContainerRole::SafeArea,
            style: Style::of_node(node),
            children,
        }))
    }
}

struct ScrollRenderer;

impl NodeRenderer for ScrollRenderer {
    fn node_type(&self) -> &str {
        "SCROLL"
    }
    fn render(&self, node: &UiNode, children: Vec<Element>, _: &RenderContext<'_>) -> Option<Element> {
        Some(Element::Container(Container {
            role: ContainerRole::Scroll,
            style: Style::of_node(node),
            children,
        }))
    }
}

struct ViewRenderer;

impl NodeRenderer for ViewRenderer {
    fn node_type(&self) -> &str {
        "VIEW"
    }
    fn render(&self, node: &UiNode, children: Vec<Element>, _: &RenderContext<'_>) -> Option<Element> {
        // Layout containers carry style attributes directly on `data`.
        Some(Element::Container(Container {
            role: ContainerRole::View,
            style: Style::of_node(node),
            children,
        }))
    }
}

struct TextRenderer;

impl NodeRenderer for TextRenderer {
    fn node_type(&self) -> &str {
        "TEXT"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, _: &RenderContext<'_>) -> Option<Element> {
        let content = node
            .str_field("text")
            .or_else(|| node.str_field("value"))
            .unwrap_or_default()
            .to_string();
        Some(Element::Text(TextElement {
            content,
            style: Style::of_node(node),
        }))
    }
}

struct ImageRenderer;

impl NodeRenderer for ImageRenderer {
    fn node_type(&self) -> &str {
        "IMAGE"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, _: &RenderContext<'_>) -> Option<Element> {
        Some(Element::Image(ImageElement {
            url: node.str_field("url").unwrap_or_default().to_string(),
            width: node.f32_field("width"),
            height: node.f32_field("height"),
            resize_mode: node.str_field("resizeMode").map(str::to_string),
        }))
    }
}

struct InputRenderer;

impl NodeRenderer for InputRenderer {
    fn node_type(&self) -> &str {
        "INPUT"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        let id = node.str_field("id").unwrap_or("input").to_string();
        Some(Element::Input(InputBinding::new(
            id,
            cx.store().clone(),
            node.str_field("value").map(str::to_string),
            node.str_field("placeholder").map(str::to_string),
            node.str_field("keyboardType").map(str::to_string),
            node.u32_field("maxLength"),
            node.bool_field("secureTextEntry").unwrap_or(false),
            Style::of_node(node),
        )))
    }
}

struct ButtonRenderer;

impl NodeRenderer for ButtonRenderer {
    fn node_type(&self) -> &str {
        "BUTTON"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        Some(Element::Button(Button {
            role: ButtonRole::Filled,
            label: node.str_field("text").unwrap_or_default().to_string(),
            icon: None,
            style: Style::of_node(node),
            press: cx.press_intent(node),
        }))
    }
}

struct TextButtonRenderer;

impl NodeRenderer for TextButtonRenderer {
    fn node_type(&self) -> &str {
        "TEXT_BUTTON"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        Some(Element::Button(Button {
            role: ButtonRole::Text,
            label: node.str_field("text").unwrap_or_default().to_string(),
            icon: None,
            style: Style::of_node(node),
            press: cx.press_intent(node),
        }))
    }
}

struct IconButtonRenderer;

impl NodeRenderer for IconButtonRenderer {
    fn node_type(&self) -> &str {
        "ICON_BUTTON"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        let name = canonical_icon_name(node.str_field("icon").unwrap_or("help")).to_string();
        Some(Element::Button(Button {
            role: ButtonRole::Icon,
            label: String::new(),
            icon: Some(IconElement {
                name,
                size: node.f32_field("size").unwrap_or(24.0),
                color: node.str_field("color").unwrap_or("#000000").to_string(),
                style: Style::default(),
            }),
            style: Style::of_node(node),
            press: cx.press_intent(node),
        }))
    }
}

struct IconRenderer;

impl NodeRenderer for IconRenderer {
    fn node_type(&self) -> &str {
        "ICON"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, _: &RenderContext<'_>) -> Option<Element> {
        // The container box is described by containerSize plus decoration.
        let mut style = Style::of_node(node);
        if let Some(container) = node.f32_field("containerSize") {
            style.width = Some(container);
            style.height = Some(container);
        }
        Some(Element::Icon(IconElement {
            name: canonical_icon_name(node.str_field("name").unwrap_or("help")).to_string(),
            size: node.f32_field("size").unwrap_or(24.0),
            color: node.str_field("color").unwrap_or("#000000").to_string(),
            style,
        }))
    }
}

struct PressableCardRenderer;

impl NodeRenderer for PressableCardRenderer {
    fn node_type(&self) -> &str {
        "PRESSABLE_CARD"
    }
    fn render(&self, node: &UiNode, children: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        Some(Element::Card(Card {
            style: Style::of_node(node),
            press: cx.press_intent(node),
            children,
        }))
    }
}

struct NavigateRenderer;

impl NodeRenderer for NavigateRenderer {
    fn node_type(&self) -> &str {
        "NAVIGATE"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        // Effect-only: schedules a one-shot replace-navigation and renders
        // nothing. The pending task dies with the tree.
        match node.str_field("to") {
            Some(route) => {
                cx.schedule_replace(route.to_string(), node.u64_field("after").unwrap_or(0));
            }
            None => warn!("NAVIGATE node without a 'to' route; nothing scheduled"),
        }
        None
    }
}

struct OtpInputRenderer;

impl NodeRenderer for OtpInputRenderer {
    fn node_type(&self) -> &str {
        "OTP_INPUT"
    }
    fn render(&self, node: &UiNode, _: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        let id = node.str_field("id").unwrap_or("otp").to_string();
        let length = node.u32_field("length").unwrap_or(6) as usize;
        Some(Element::OtpInput(OtpInput::new(
            id,
            cx.store().clone(),
            length,
            node.f32_field("boxWidth").unwrap_or(50.0),
            node.f32_field("boxHeight").unwrap_or(60.0),
            node.f32_field("boxSpacing").unwrap_or(12.0),
            node.f32_field("boxBorderRadius").unwrap_or(12.0),
            node.str_field("boxBorderColor").unwrap_or("#E5E5E5").to_string(),
            node.str_field("boxBackgroundColor")
                .unwrap_or("#F8F8F8")
                .to_string(),
        )))
    }
}

struct ResendOtpRenderer;

impl NodeRenderer for ResendOtpRenderer {
    fn node_type(&self) -> &str {
        "RESEND_OTP"
    }
    fn render(&self, node: &UiNode, children: Vec<Element>, cx: &RenderContext<'_>) -> Option<Element> {
        let seconds = node.u32_field("timer").unwrap_or(0);
        let remaining = cx.start_countdown(seconds);
        Some(Element::ResendOtp(crate::element::ResendOtp::new(
            remaining,
            cx.press_intent(node),
            Style::of_node(node),
            children,
        )))
    }
}

/// Registers every built-in renderer, including the `FOOTER_NOTE` alias the
/// backend emits for plain text notes.
pub(super) fn register_default_renderers(registry: &mut AHashMap<String, Box<dyn NodeRenderer>>) {
    for renderer in [
        Box::new(SafeAreaRenderer) as Box<dyn NodeRenderer>,
        Box::new(ScrollRenderer),
        Box::new(ViewRenderer),
        Box::new(TextRenderer),
        Box::new(ImageRenderer),
        Box::new(InputRenderer),
        Box::new(ButtonRenderer),
        Box::new(TextButtonRenderer),
        Box::new(IconButtonRenderer),
        Box::new(IconRenderer),
        Box::new(PressableCardRenderer),
        Box::new(NavigateRenderer),
        Box::new(OtpInputRenderer),
        Box::new(ResendOtpRenderer),
    ] {
        registry.insert(renderer.node_type().to_string(), renderer);
    }
    if let Some(text) = create_renderer_by_name("TEXT") {
        registry.insert("FOOTER_NOTE".to_string(), text);
    }
}

/// Creates a built-in renderer by its registered type string. Used to wire
/// type aliases onto built-in behavior.
pub(super) fn create_renderer_by_name(name: &str) -> Option<Box<dyn NodeRenderer>> {
    match name {
        "SAFE_AREA" => Some(Box::new(SafeAreaRenderer)),
        "SCROLL" => Some(Box::new(ScrollRenderer)),
        "VIEW" => Some(Box::new(ViewRenderer)),
        "TEXT" => Some(Box::new(TextRenderer)),
        "IMAGE" => Some(Box::new(ImageRenderer)),
        "INPUT" => Some(Box::new(InputRenderer)),
        "BUTTON" => Some(Box::new(ButtonRenderer)),
        "TEXT_BUTTON" => Some(Box::new(TextButtonRenderer)),
        "ICON_BUTTON" => Some(Box::new(IconButtonRenderer)),
        "ICON" => Some(Box::new(IconRenderer)),
        "PRESSABLE_CARD" => Some(Box::new(PressableCardRenderer)),
        "NAVIGATE" => Some(Box::new(NavigateRenderer)),
        "OTP_INPUT" => Some(Box::new(OtpInputRenderer)),
        "RESEND_OTP" => Some(Box::new(ResendOtpRenderer)),
        _ => None,
    }
}
