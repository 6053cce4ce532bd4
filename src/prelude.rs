//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the tatami crate so host
//! shells can pull the whole rendering surface in with one import.
//!
//! # Example
//!
//! ```rust,no_run
//! use tatami::prelude::*;
//!
//! # async fn run_example() -> Result<()> {
//! let store = FormStore::in_memory();
//! let renderer = Renderer::builder(store.clone()).build();
//!
//! let document = ScreenDocument::from_json(
//!     r#"{"ui": [{"type": "TEXT", "data": {"text": "Hello"}}]}"#,
//! )?;
//! let tree = renderer.render_document(&document);
//! println!("{tree}");
//! # Ok(())
//! # }
//! ```

// Rendering
pub use crate::render::{NodeRenderer, RenderContext, RenderedTree, Renderer, RendererBuilder};

// Node tree and elements
pub use crate::element::{
    Button, ButtonRole, Card, Container, ContainerRole, Element, FocusShift, IconElement,
    ImageElement, InputBinding, OtpInput, PressIntent, ResendOtp, TextElement,
};
pub use crate::node::{ActionDescriptor, ActionKind, UiNode};
pub use crate::style::Style;

// State and dispatch
pub use crate::dispatch::{
    CommandHandler, CommandPayload, DispatchOutcome, Dispatcher, Feedback, Navigator,
};
pub use crate::store::FormStore;

// Screen client
pub use crate::client::{ScreenClient, ScreenDocument, ScreenResponse, ScreenStatus};
pub use crate::config::ClientConfig;

// Error types
pub use crate::error::{ClientError, DispatchError, RegistryError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
