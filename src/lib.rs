//! # Tatami - Server-Driven UI Rendering Engine
//!
//! **Tatami** renders the screen documents a backend-for-frontend service
//! returns (JSON trees of typed nodes with a declarative action protocol)
//! into an abstract element tree a native host shell can display. The engine
//! owns the behavior the contract requires (form state shared across screens,
//! OTP focus transfer, delayed navigations with teardown-safe cancellation,
//! API-call dispatch with success/failure branching); hosts stay purely
//! presentational.
//!
//! ## Core Workflow
//!
//! 1. **Fetch**: a [`client::ScreenClient`] pulls a screen document from the
//!    backend (or a host loads one from disk).
//! 2. **Render**: a [`render::Renderer`], built once with a form store, a
//!    navigator, and the node-type registry, walks the document's node tree
//!    into a [`render::RenderedTree`] of [`element::Element`]s. Unknown node
//!    types are skipped, never fatal; scheduled effects die with the tree.
//! 3. **Interact**: the host forwards keystrokes to the tree's input
//!    bindings and pressed elements to a [`dispatch::Dispatcher`], which
//!    performs navigation, emits commands on the screen's command bus, or
//!    runs the declared API call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tatami::prelude::*;
//!
//! struct Router;
//!
//! #[async_trait::async_trait]
//! impl Navigator for Router {
//!     async fn push(&self, route: &str) {
//!         println!("push {route}");
//!     }
//!     async fn replace(&self, route: &str) {
//!         println!("replace {route}");
//!     }
//!     async fn back(&self) {
//!         println!("back");
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let store = FormStore::in_memory();
//!     let router = Arc::new(Router);
//!
//!     let renderer = Renderer::builder(store.clone())
//!         .with_navigator(router.clone())
//!         .build();
//!
//!     let config = ClientConfig::new("https://backend.example.com")?;
//!     let client = ScreenClient::new(config.clone());
//!     let dispatcher = Dispatcher::new(config, store, router);
//!
//!     let document = client.fetch("/bff/driver/home", None).await?;
//!     let tree = renderer.render_document(&document);
//!     println!("{tree}");
//!
//!     // A host would wire this to its pressed element instead.
//!     for element in tree.iter() {
//!         if let Element::Button(button) = element {
//!             if let Some(press) = &button.press {
//!                 dispatcher.press(press).await?;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod node;
pub mod prelude;
pub mod render;
pub mod store;
pub mod style;
