//! Interactive bindings: the stateful parts of the rendered tree.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::PressIntent;
use crate::store::FormStore;
use crate::style::Style;

/// Field ids the backend uses interchangeably for the phone number.
const PHONE_FIELD_IDS: [&str; 3] = ["phone", "mobileNumber", "Phone"];

pub(crate) fn is_phone_field(id: &str) -> bool {
    PHONE_FIELD_IDS.contains(&id)
}

/// A text field bound to the form store: every keystroke writes through.
#[derive(Debug)]
pub struct InputBinding {
    id: String,
    store: FormStore,
    pub placeholder: Option<String>,
    pub keyboard: Option<String>,
    pub max_length: Option<u32>,
    pub secure: bool,
    pub style: Style,
}

impl InputBinding {
    pub(crate) fn new(
        id: String,
        store: FormStore,
        initial: Option<String>,
        placeholder: Option<String>,
        keyboard: Option<String>,
        max_length: Option<u32>,
        secure: bool,
        style: Style,
    ) -> Self {
        // Phone-shaped fields pre-fill from the shared phone value so OTP
        // and registration screens pick up where the last flow left off.
        if store.value(&id).is_none() {
            if is_phone_field(&id) {
                if let Some(phone) = store.phone() {
                    store.set_value(&id, phone);
                }
            } else if let Some(initial) = initial {
                store.set_value(&id, initial);
            }
        }
        Self {
            id,
            store,
            placeholder,
            keyboard,
            max_length,
            secure,
            style,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The current value, as the store holds it.
    pub fn text(&self) -> String {
        self.store.value(&self.id).unwrap_or_default()
    }

    /// Called by the host on every keystroke.
    pub fn set_text(&self, value: impl Into<String>) {
        self.store.set_value(&self.id, value);
    }
}

/// Where focus should move after a digit was entered into an OTP box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusShift {
    /// Focus stays where it is. Deleting a digit never moves focus back.
    Stay,
    /// Focus advances to the box at this index.
    Next(usize),
}

/// A row of single-digit boxes composing one OTP value.
///
/// The composite value is the concatenation of all boxes and is written to
/// the store under the node's field id on every change.
#[derive(Debug)]
pub struct OtpInput {
    field_id: String,
    store: FormStore,
    boxes: Mutex<Vec<String>>,
    pub box_width: f32,
    pub box_height: f32,
    pub box_spacing: f32,
    pub box_border_radius: f32,
    pub box_border_color: String,
    pub box_background_color: String,
}

impl OtpInput {
    pub(crate) fn new(
        field_id: String,
        store: FormStore,
        length: usize,
        box_width: f32,
        box_height: f32,
        box_spacing: f32,
        box_border_radius: f32,
        box_border_color: String,
        box_background_color: String,
    ) -> Self {
        Self {
            field_id,
            store,
            boxes: Mutex::new(vec![String::new(); length]),
            box_width,
            box_height,
            box_spacing,
            box_border_radius,
            box_border_color,
            box_background_color,
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn len(&self) -> usize {
        self.boxes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.lock().is_empty()
    }

    pub fn digit(&self, index: usize) -> Option<String> {
        self.boxes.lock().get(index).cloned()
    }

    /// The concatenation of all boxes, first to last.
    pub fn value(&self) -> String {
        self.boxes.lock().concat()
    }

    /// Called by the host when the user types into box `index`. Only the
    /// last character typed is kept; an empty input clears the box. Returns
    /// where focus should move.
    pub fn enter(&self, index: usize, input: &str) -> FocusShift {
        let (value, advanced) = {
            let mut boxes = self.boxes.lock();
            let len = boxes.len();
            let Some(slot) = boxes.get_mut(index) else {
                return FocusShift::Stay;
            };
            *slot = input.chars().last().map(String::from).unwrap_or_default();
            (boxes.concat(), !boxes[index].is_empty() && index + 1 < len)
        };
        self.store.set_value(&self.field_id, value);
        if advanced {
            FocusShift::Next(index + 1)
        } else {
            FocusShift::Stay
        }
    }
}

/// A resend-OTP control owning a private countdown.
///
/// The countdown starts from the server-supplied seconds and is decremented
/// once per second by a task owned by the tree; it stops rescheduling on
/// teardown. The action is disabled while the count is positive and
/// re-enables exactly at zero.
#[derive(Debug)]
pub struct ResendOtp {
    remaining: Arc<AtomicU32>,
    pub press: Option<PressIntent>,
    pub style: Style,
    pub children: Vec<super::Element>,
}

impl ResendOtp {
    pub(crate) fn new(
        remaining: Arc<AtomicU32>,
        press: Option<PressIntent>,
        style: Style,
        children: Vec<super::Element>,
    ) -> Self {
        Self {
            remaining,
            press,
            style,
            children,
        }
    }

    /// Seconds left before the resend action re-enables.
    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Relaxed)
    }

    /// A handle to the live countdown, for hosts that mirror it into their
    /// own state.
    pub fn counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.remaining)
    }

    pub fn is_enabled(&self) -> bool {
        self.remaining() == 0
    }

    /// The user-facing label for the control's current state.
    pub fn label(&self) -> String {
        match self.remaining() {
            0 => "Resend OTP".to_string(),
            seconds => format!("Resend in {seconds}s"),
        }
    }
}
