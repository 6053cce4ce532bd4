//! ASCII tree formatting of rendered output, for the CLI and diagnostics.

use std::fmt;

use crate::element::{ContainerRole, Element};
use crate::node::ActionKind;

pub(super) fn fmt_roots(roots: &[Element], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (index, element) in roots.iter().enumerate() {
        fmt_element(element, f, "", index + 1 == roots.len())?;
    }
    Ok(())
}

fn fmt_element(
    element: &Element,
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    is_last: bool,
) -> fmt::Result {
    let marker = if is_last { "└── " } else { "├── " };
    writeln!(f, "{}{}{}", prefix, marker, label(element))?;

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    let children = element.children();
    for (index, child) in children.iter().enumerate() {
        fmt_element(child, f, &child_prefix, index + 1 == children.len())?;
    }
    Ok(())
}

fn label(element: &Element) -> String {
    match element {
        Element::Container(c) => match c.role {
            ContainerRole::View => "VIEW".to_string(),
            ContainerRole::Scroll => "SCROLL".to_string(),
            ContainerRole::SafeArea => "SAFE_AREA".to_string(),
        },
        Element::Text(t) => format!("TEXT {:?}", t.content),
        Element::Image(i) => format!("IMAGE {}", i.url),
        Element::Icon(i) => format!("ICON {}", i.name),
        Element::Input(i) => format!("INPUT #{}", i.id()),
        Element::OtpInput(o) => format!("OTP_INPUT #{} ({} boxes)", o.field_id(), o.len()),
        Element::Button(b) => {
            let name = match &b.icon {
                Some(icon) => format!("ICON_BUTTON {}", icon.name),
                None => format!("BUTTON {:?}", b.label),
            };
            match press_label(&b.press) {
                Some(action) => format!("{name} → {action}"),
                None => name,
            }
        }
        Element::Card(c) => match press_label(&c.press) {
            Some(action) => format!("PRESSABLE_CARD → {action}"),
            None => "PRESSABLE_CARD".to_string(),
        },
        Element::ResendOtp(r) => format!("RESEND_OTP ({}s)", r.remaining()),
    }
}

fn press_label(press: &Option<crate::element::PressIntent>) -> Option<String> {
    let intent = press.as_ref()?;
    let action = &intent.action;
    Some(match action.kind() {
        Some(ActionKind::Navigate) => format!("NAVIGATE {}", action.route().unwrap_or("?")),
        Some(ActionKind::NavigateBack) => "NAVIGATE_BACK".to_string(),
        Some(ActionKind::Action) => {
            format!("ACTION {}", action.value.as_deref().unwrap_or("?"))
        }
        Some(ActionKind::ApiCall) => {
            format!("API_CALL {}", action.url.as_deref().unwrap_or("?"))
        }
        Some(ActionKind::Logout) => "LOGOUT".to_string(),
        None => "?".to_string(),
    })
}
