//! Interprets the action descriptors interactive nodes carry.
//!
//! The dispatcher is the only part of the engine that talks back to the
//! world: client-side navigation goes through the host's [`Navigator`],
//! opaque `ACTION` commands are emitted on the host's [`CommandHandler`]
//! (the renderer never assumes what a command means), and `API_CALL`
//! descriptors perform one network round trip with success/failure
//! branching. Every failure is terminal for that single action; the user
//! must re-trigger it.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::element::PressIntent;
use crate::error::DispatchError;
use crate::node::{ActionDescriptor, ActionKind};
use crate::store::FormStore;

/// User-facing messages surfaced through the feedback sink.
const GENERIC_FAILURE: &str = "Something went wrong";
const CONNECTIVITY_FAILURE: &str = "Please check your internet connection and try again";
const MISSING_PHONE: &str = "Please enter your mobile number";

/// Client-side navigation, implemented by the host shell.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn push(&self, route: &str);
    async fn replace(&self, route: &str);
    async fn back(&self);
}

/// Receives `ACTION` commands. The command name is opaque to the renderer;
/// each screen registers interest in the names it understands.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, name: &str, payload: CommandPayload);
}

/// Surfaces blocking, user-acknowledged error messages.
#[async_trait]
pub trait Feedback: Send + Sync {
    /// Resolves once the user has acknowledged the message; navigation to a
    /// failure route happens only after that.
    async fn acknowledge_error(&self, message: &str);
}

/// Payload emitted on the command bus alongside the command name.
#[derive(Debug, Clone, Default)]
pub struct CommandPayload {
    /// The descriptor's own `data` object.
    pub action_data: Map<String, Value>,
    /// The pressed node's `data`, captured at render time.
    pub node_data: Map<String, Value>,
    /// The screen's context data, captured at render time.
    pub context: Map<String, Value>,
}

/// A navigator for hosts without a navigation stack (tools, tests). Routes
/// are logged and dropped.
#[derive(Debug, Default)]
pub struct NullNavigator;

#[async_trait]
impl Navigator for NullNavigator {
    async fn push(&self, route: &str) {
        debug!(route, "push (no navigator installed)");
    }
    async fn replace(&self, route: &str) {
        debug!(route, "replace (no navigator installed)");
    }
    async fn back(&self) {
        debug!("back (no navigator installed)");
    }
}

/// The default feedback sink: acknowledges immediately and logs.
#[derive(Debug, Default)]
pub struct LoggingFeedback;

#[async_trait]
impl Feedback for LoggingFeedback {
    async fn acknowledge_error(&self, message: &str) {
        warn!(message, "User-facing error");
    }
}

/// What a dispatch resolved to. Hosts mostly ignore this; tests and
/// diagnostics rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Navigated(String),
    NavigatedBack,
    LoggedOut,
    /// An `ACTION` command was emitted on the bus.
    CommandEmitted(String),
    /// An `ACTION` command arrived with no handler registered.
    CommandDropped(String),
    /// The API call returned 2xx.
    ApiSuccess { navigated: Option<String> },
    /// The API call returned a non-2xx status.
    ApiFailure {
        message: String,
        navigated: Option<String>,
    },
    /// The API call got no response at all. Never navigates.
    NetworkFailure,
    /// The action was rejected before any request was issued (for example an
    /// OTP call without a phone number on file).
    Incomplete { message: String },
    /// A descriptor with no recognizable kind.
    Ignored,
}

/// Interprets [`ActionDescriptor`]s on behalf of rendered elements.
pub struct Dispatcher {
    http: reqwest::Client,
    config: ClientConfig,
    store: FormStore,
    navigator: Arc<dyn Navigator>,
    commands: Option<Arc<dyn CommandHandler>>,
    feedback: Arc<dyn Feedback>,
}

impl Dispatcher {
    pub fn new(config: ClientConfig, store: FormStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
            navigator,
            commands: None,
            feedback: Arc::new(LoggingFeedback),
        }
    }

    /// Registers the screen's command handler. Without one, `ACTION`
    /// descriptors are dropped with a warning; the dispatcher never falls
    /// back to guessing an endpoint.
    pub fn with_command_handler(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.commands = Some(handler);
        self
    }

    pub fn with_feedback(mut self, feedback: Arc<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Dispatches the press intent a rendered element carries.
    pub async fn press(&self, intent: &PressIntent) -> Result<DispatchOutcome, DispatchError> {
        self.dispatch_with(&intent.action, &intent.node_data, &intent.context)
            .await
    }

    /// Dispatches a bare descriptor with no node/screen context.
    pub async fn dispatch(
        &self,
        action: &ActionDescriptor,
    ) -> Result<DispatchOutcome, DispatchError> {
        let empty = Map::new();
        self.dispatch_with(action, &empty, &empty).await
    }

    pub async fn dispatch_with(
        &self,
        action: &ActionDescriptor,
        node_data: &Map<String, Value>,
        context: &Map<String, Value>,
    ) -> Result<DispatchOutcome, DispatchError> {
        match action.kind() {
            Some(ActionKind::Navigate) => {
                let route = action.route().ok_or(DispatchError::MissingRoute)?;
                debug!(route, "NAVIGATE");
                self.navigator.push(route).await;
                Ok(DispatchOutcome::Navigated(route.to_string()))
            }
            Some(ActionKind::NavigateBack) => {
                debug!("NAVIGATE_BACK");
                self.navigator.back().await;
                Ok(DispatchOutcome::NavigatedBack)
            }
            Some(ActionKind::Logout) => {
                debug!("LOGOUT");
                self.store.reset();
                self.navigator.replace(&self.config.login_route).await;
                Ok(DispatchOutcome::LoggedOut)
            }
            Some(ActionKind::Action) => {
                let name = action
                    .value
                    .as_deref()
                    .ok_or(DispatchError::MissingCommandName)?;
                match &self.commands {
                    Some(handler) => {
                        debug!(name, "Emitting command");
                        let payload = CommandPayload {
                            action_data: action.data.clone(),
                            node_data: node_data.clone(),
                            context: context.clone(),
                        };
                        handler.handle(name, payload).await;
                        Ok(DispatchOutcome::CommandEmitted(name.to_string()))
                    }
                    None => {
                        warn!(name, "No command handler registered; dropping command");
                        Ok(DispatchOutcome::CommandDropped(name.to_string()))
                    }
                }
            }
            Some(ActionKind::ApiCall) => self.dispatch_api_call(action).await,
            None => {
                warn!(?action, "Descriptor has no recognizable kind; ignoring");
                Ok(DispatchOutcome::Ignored)
            }
        }
    }

    async fn dispatch_api_call(
        &self,
        action: &ActionDescriptor,
    ) -> Result<DispatchOutcome, DispatchError> {
        let raw_url = action.url.as_deref().ok_or(DispatchError::MissingUrl)?;
        let url = self
            .config
            .base_url
            .join(raw_url)
            .map_err(|err| DispatchError::InvalidUrl {
                url: raw_url.to_string(),
                message: err.to_string(),
            })?;
        let method = action
            .method
            .as_deref()
            .and_then(|m| reqwest::Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok())
            .unwrap_or(reqwest::Method::POST);

        // OTP-shaped endpoints get the backend's canonical body; everything
        // else submits the current form snapshot.
        let otp_call = is_otp_endpoint(&url);
        let submitted_phone = self.form_phone();
        let body = if otp_call {
            match submitted_phone.as_deref() {
                Some(phone) => json!({ "Phone": phone }),
                None => {
                    warn!(%url, "OTP call without a phone number on file");
                    self.feedback.acknowledge_error(MISSING_PHONE).await;
                    return Ok(DispatchOutcome::Incomplete {
                        message: MISSING_PHONE.to_string(),
                    });
                }
            }
        } else {
            serde_json::to_value(self.store.snapshot()).unwrap_or(Value::Null)
        };

        debug!(%url, %method, "API_CALL");
        let response = self
            .http
            .request(method, url.clone())
            .timeout(self.config.request_timeout)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, %err, "API call got no response");
                self.feedback.acknowledge_error(CONNECTIVITY_FAILURE).await;
                return Ok(DispatchOutcome::NetworkFailure);
            }
        };

        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = payload
                .get("error")
                .or_else(|| payload.get("message"))
                .and_then(Value::as_str)
                .unwrap_or(GENERIC_FAILURE)
                .to_string();
            debug!(%url, %status, %message, "API call failed");
            // Navigation to the failure route waits for the acknowledgement.
            self.feedback.acknowledge_error(&message).await;
            let navigated = match action.failure_navigate.as_deref() {
                Some(route) => {
                    self.navigator.push(route).await;
                    Some(route.to_string())
                }
                None => None,
            };
            return Ok(DispatchOutcome::ApiFailure { message, navigated });
        }

        if otp_call {
            if let Some(phone) = submitted_phone {
                // Later screens read this back as their default.
                self.store.set_phone(phone);
            }
        }

        let navigated = match action.success_navigate.as_deref() {
            Some(route) => {
                self.navigator.push(route).await;
                Some(route.to_string())
            }
            None => None,
        };
        Ok(DispatchOutcome::ApiSuccess { navigated })
    }

    /// The phone number under any of the field ids the backend uses for it.
    fn form_phone(&self) -> Option<String> {
        self.store
            .phone()
            .or_else(|| self.store.value("mobileNumber"))
            .or_else(|| self.store.value("Phone"))
    }
}

/// Whether a resolved URL addresses an OTP endpoint. Matches whole path
/// segments (`/otp/...`, `request-otp`, `verify-otp`), not substrings.
fn is_otp_endpoint(url: &Url) -> bool {
    url.path_segments()
        .into_iter()
        .flatten()
        .any(|segment| segment == "otp" || segment.ends_with("-otp") || segment.starts_with("otp-"))
}
