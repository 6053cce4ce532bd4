//! Common test utilities: node fixtures, recording host doubles, and a
//! scripted stand-in backend.
#![allow(dead_code)]
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::io::Read;
use std::sync::Arc;
use tatami::prelude::*;

/// Builds one node from its JSON shape.
pub fn node(value: Value) -> UiNode {
    serde_json::from_value(value).expect("fixture node parses")
}

/// Builds a node list from its JSON shape.
pub fn nodes(value: Value) -> Vec<UiNode> {
    serde_json::from_value(value).expect("fixture nodes parse")
}

/// The scenario tree: a text, an unknown node, and a navigation button.
pub fn scenario_ui() -> Vec<UiNode> {
    nodes(json!([
        {"type": "TEXT", "data": {"text": "Hi"}},
        {"type": "UNKNOWN_X", "data": {}},
        {"type": "BUTTON", "data": {"text": "Go", "action": {"type": "NAVIGATE", "to": "/next"}}},
    ]))
}

/// A navigator that records every call.
#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn push(&self, route: &str) {
        self.events.lock().push(format!("push {route}"));
    }
    async fn replace(&self, route: &str) {
        self.events.lock().push(format!("replace {route}"));
    }
    async fn back(&self) {
        self.events.lock().push("back".to_string());
    }
}

/// A feedback sink that acknowledges immediately and records the message.
#[derive(Default)]
pub struct RecordingFeedback {
    messages: Mutex<Vec<String>>,
}

impl RecordingFeedback {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl Feedback for RecordingFeedback {
    async fn acknowledge_error(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// A command handler that records every emitted command.
#[derive(Default)]
pub struct RecordingCommands {
    commands: Mutex<Vec<(String, CommandPayload)>>,
}

impl RecordingCommands {
    pub fn commands(&self) -> Vec<(String, CommandPayload)> {
        self.commands.lock().clone()
    }
}

#[async_trait]
impl CommandHandler for RecordingCommands {
    async fn handle(&self, name: &str, payload: CommandPayload) {
        self.commands.lock().push((name.to_string(), payload));
    }
}

/// One request as the stub backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

/// A scripted backend on a local port: answers the given responses in order,
/// recording each request, then shuts down.
pub struct StubBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    pub fn spawn(responses: Vec<(u16, Value)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind stub backend");
        let addr = server.server_addr().to_ip().expect("stub backend address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        std::thread::spawn(move || {
            for (status, body) in responses {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let mut content = String::new();
                let _ = request.as_reader().read_to_string(&mut content);
                log.lock().push(RecordedRequest {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    body: serde_json::from_str(&content).unwrap_or(Value::Null),
                });
                let header = "Content-Type: application/json"
                    .parse::<tiny_http::Header>()
                    .expect("static header parses");
                let response = tiny_http::Response::from_string(body.to_string())
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).expect("stub base URL parses")
    }
}
