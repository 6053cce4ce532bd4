//! The abstract visual tree a render pass produces.
//!
//! Elements are host-toolkit agnostic: a native shell walks this tree and
//! maps each element onto its own widget vocabulary. Interactive elements
//! carry typed bindings that own the behavior the backend contract requires
//! (write-through inputs, OTP focus transfer, resend countdowns), so hosts
//! stay purely presentational.

mod binding;

pub use binding::{FocusShift, InputBinding, OtpInput, ResendOtp};

use serde_json::{Map, Value};

use crate::node::ActionDescriptor;
use crate::style::Style;

/// One rendered element. Structural parity with the input holds: every
/// recognized node contributes exactly one element (or none for effect-only
/// nodes), in document order.
#[derive(Debug)]
pub enum Element {
    Container(Container),
    Text(TextElement),
    Image(ImageElement),
    Icon(IconElement),
    Input(InputBinding),
    OtpInput(OtpInput),
    Button(Button),
    Card(Card),
    ResendOtp(ResendOtp),
}

impl Element {
    /// Children of container-like elements; empty for leaves.
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Container(c) => &c.children,
            Element::Card(c) => &c.children,
            Element::ResendOtp(r) => &r.children,
            _ => &[],
        }
    }

    /// Depth-first traversal over this element and everything below it.
    pub fn walk(&self) -> impl Iterator<Item = &Element> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children().iter().rev());
            Some(next)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRole {
    View,
    Scroll,
    SafeArea,
}

#[derive(Debug)]
pub struct Container {
    pub role: ContainerRole,
    pub style: Style,
    pub children: Vec<Element>,
}

#[derive(Debug)]
pub struct TextElement {
    pub content: String,
    pub style: Style,
}

#[derive(Debug)]
pub struct ImageElement {
    pub url: String,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub resize_mode: Option<String>,
}

#[derive(Debug)]
pub struct IconElement {
    pub name: String,
    pub size: f32,
    pub color: String,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    /// A filled button with a text label.
    Filled,
    /// A bare text label acting as a button.
    Text,
    /// An icon acting as a button.
    Icon,
}

#[derive(Debug)]
pub struct Button {
    pub role: ButtonRole,
    pub label: String,
    pub icon: Option<IconElement>,
    pub style: Style,
    pub press: Option<PressIntent>,
}

/// A card wrapping arbitrary children, pressable as a whole.
#[derive(Debug)]
pub struct Card {
    pub style: Style,
    pub press: Option<PressIntent>,
    pub children: Vec<Element>,
}

/// Everything the dispatcher needs when an element is pressed: the
/// descriptor plus the node data and screen context captured at render time
/// (command-bus payloads carry both).
#[derive(Debug, Clone)]
pub struct PressIntent {
    pub action: ActionDescriptor,
    pub node_data: Map<String, Value>,
    pub context: Map<String, Value>,
}
