//! Tests for the action dispatcher: navigation, the command bus, and the
//! API_CALL round trip with its success/failure branching.
mod common;
use common::*;
use serde_json::json;
use std::sync::Arc;
use tatami::prelude::*;

struct Harness {
    backend: StubBackend,
    dispatcher: Dispatcher,
    store: FormStore,
    navigator: Arc<RecordingNavigator>,
    feedback: Arc<RecordingFeedback>,
}

fn harness(responses: Vec<(u16, serde_json::Value)>) -> Harness {
    let backend = StubBackend::spawn(responses);
    let store = FormStore::in_memory();
    let navigator = Arc::new(RecordingNavigator::default());
    let feedback = Arc::new(RecordingFeedback::default());
    let dispatcher = Dispatcher::new(backend.config(), store.clone(), navigator.clone())
        .with_feedback(feedback.clone());
    Harness {
        backend,
        dispatcher,
        store,
        navigator,
        feedback,
    }
}

#[tokio::test]
async fn navigate_only_navigates_and_issues_no_request() {
    let h = harness(vec![]);
    let outcome = h
        .dispatcher
        .dispatch(&ActionDescriptor::navigate("/next"))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Navigated("/next".to_string()));
    assert_eq!(h.navigator.events(), vec!["push /next"]);
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn navigate_without_a_route_is_a_contract_error() {
    let h = harness(vec![]);
    let action: ActionDescriptor = serde_json::from_value(json!({"type": "NAVIGATE"})).unwrap();
    assert!(matches!(
        h.dispatcher.dispatch(&action).await,
        Err(DispatchError::MissingRoute)
    ));
}

#[tokio::test]
async fn otp_request_body_is_normalized_to_the_backend_shape() {
    let h = harness(vec![(200, json!({"status": "success"}))]);
    // The phone arrived under the alternate field id; only the canonical
    // shape may reach the wire.
    h.store.set_value("mobileNumber", "9123456789");
    h.store.set_value("name", "unrelated draft");

    let action = ActionDescriptor::api_call("/otp/request").with_method("POST");
    let outcome = h.dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::ApiSuccess { navigated: None });
    let requests = h.backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].body, json!({"Phone": "9123456789"}));

    // A successful OTP request persists the phone for later screens.
    assert_eq!(h.store.phone().as_deref(), Some("9123456789"));
}

#[tokio::test]
async fn non_otp_calls_submit_the_form_snapshot() {
    let h = harness(vec![(200, json!({"status": "success"}))]);
    h.store.set_value("name", "Asha");
    h.store.set_value("truckType", "trailer");

    let action = ActionDescriptor::api_call("/api/v2/user/profile");
    h.dispatcher.dispatch(&action).await.unwrap();

    let body = &h.backend.requests()[0].body;
    assert_eq!(body["name"], json!("Asha"));
    assert_eq!(body["truckType"], json!("trailer"));
}

#[tokio::test]
async fn otp_call_without_a_phone_is_rejected_before_the_wire() {
    let h = harness(vec![]);
    let action = ActionDescriptor::api_call("/api/v2/user/request-otp");
    let outcome = h.dispatcher.dispatch(&action).await.unwrap();

    assert!(matches!(outcome, DispatchOutcome::Incomplete { .. }));
    assert_eq!(
        h.feedback.messages(),
        vec!["Please enter your mobile number"]
    );
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn success_navigate_is_followed_after_a_2xx() {
    let h = harness(vec![(200, json!({"status": "success"}))]);
    h.store.set_phone("9123456789");

    let action = ActionDescriptor::api_call("/otp/request").with_success_navigate("/auth/otp");
    let outcome = h.dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::ApiSuccess {
            navigated: Some("/auth/otp".to_string())
        }
    );
    assert_eq!(h.navigator.events(), vec!["push /auth/otp"]);
}

#[tokio::test]
async fn failure_surfaces_the_server_message_then_navigates() {
    let h = harness(vec![(400, json!({"error": "Invalid OTP"}))]);
    h.store.set_value("otp", "000000");

    let action =
        ActionDescriptor::api_call("/api/v2/user/profile").with_failure_navigate("/auth/retry");
    let outcome = h.dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::ApiFailure {
            message: "Invalid OTP".to_string(),
            navigated: Some("/auth/retry".to_string()),
        }
    );
    assert_eq!(h.feedback.messages(), vec!["Invalid OTP"]);
    assert_eq!(h.navigator.events(), vec!["push /auth/retry"]);
}

#[tokio::test]
async fn failure_without_a_body_falls_back_to_the_generic_message() {
    let h = harness(vec![(500, json!({}))]);
    let action = ActionDescriptor::api_call("/api/v2/user/profile");
    let outcome = h.dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::ApiFailure {
            message: "Something went wrong".to_string(),
            navigated: None,
        }
    );
}

#[tokio::test]
async fn no_response_reports_connectivity_and_never_navigates() {
    let store = FormStore::in_memory();
    let navigator = Arc::new(RecordingNavigator::default());
    let feedback = Arc::new(RecordingFeedback::default());
    // Nothing listens on this port.
    let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
    let dispatcher =
        Dispatcher::new(config, store, navigator.clone()).with_feedback(feedback.clone());

    let action = ActionDescriptor::api_call("/api/v2/user/profile")
        .with_success_navigate("/never")
        .with_failure_navigate("/never-either");
    let outcome = dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::NetworkFailure);
    assert_eq!(
        feedback.messages(),
        vec!["Please check your internet connection and try again"]
    );
    assert!(navigator.events().is_empty());
}

#[tokio::test]
async fn action_descriptors_ride_the_command_bus() {
    let backend = StubBackend::spawn(vec![]);
    let commands = Arc::new(RecordingCommands::default());
    let dispatcher = Dispatcher::new(
        backend.config(),
        FormStore::in_memory(),
        Arc::new(RecordingNavigator::default()),
    )
    .with_command_handler(commands.clone());

    let action: ActionDescriptor = serde_json::from_value(json!({
        "type": "ACTION",
        "value": "accept_load",
        "data": {"loadId": "L-42"},
    }))
    .unwrap();
    let outcome = dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::CommandEmitted("accept_load".to_string())
    );
    let emitted = commands.commands();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, "accept_load");
    assert_eq!(emitted[0].1.action_data["loadId"], json!("L-42"));
    // The renderer never guesses what a command means: no fallback call.
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn commands_without_a_handler_are_dropped_not_guessed() {
    let h = harness(vec![]);
    let action: ActionDescriptor =
        serde_json::from_value(json!({"type": "ACTION", "value": "accept_load"})).unwrap();
    let outcome = h.dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::CommandDropped("accept_load".to_string())
    );
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn logout_resets_the_store_and_returns_to_login() {
    let h = harness(vec![]);
    h.store.set_phone("9123456789");
    h.store.set_value("name", "Asha");

    let action: ActionDescriptor = serde_json::from_value(json!({"type": "LOGOUT"})).unwrap();
    let outcome = h.dispatcher.dispatch(&action).await.unwrap();

    assert_eq!(outcome, DispatchOutcome::LoggedOut);
    assert!(h.store.is_empty());
    assert_eq!(h.navigator.events(), vec!["replace /auth"]);
}

#[tokio::test]
async fn api_call_without_a_url_is_a_contract_error() {
    let h = harness(vec![]);
    let action: ActionDescriptor = serde_json::from_value(json!({"type": "API_CALL"})).unwrap();
    assert!(matches!(
        h.dispatcher.dispatch(&action).await,
        Err(DispatchError::MissingUrl)
    ));
}
