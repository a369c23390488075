// Tests for the pin and unpin message commands
// Discord API calls are answered by a mock transport

mod adapters;

use adapters::fixtures::{CHANNEL_ID, INTERACTION_ID, TARGET_MESSAGE_ID, command_interaction};
use adapters::{MockTransport, mock_client};
use pinwheel::commands::pins::{
    ALREADY_PINNED, NOT_PINNED, PIN_ADDED, PIN_COMMAND_NAME, PIN_REMOVED, UNPIN_COMMAND_NAME,
};
use pinwheel::commands::{CommandHandler, PinMessageCommand, UnpinMessageCommand};
use pinwheel::interaction::{GuildInteraction, InteractionResponse};
use reqwest::Method;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn pins_endpoint() -> String {
    format!("channels/{CHANNEL_ID}/pins")
}

fn pin_endpoint() -> String {
    format!("channels/{CHANNEL_ID}/pins/{TARGET_MESSAGE_ID}")
}

fn interaction(name: &str, command_type: u8) -> GuildInteraction {
    serde_json::from_value(command_interaction(name, command_type)).unwrap()
}

fn pins_body(pinned: bool) -> String {
    let mut pins = vec![json!({"id": "1700000000000000001", "content": "older pin"})];
    if pinned {
        pins.push(json!({"id": TARGET_MESSAGE_ID, "content": "target"}));
    }
    serde_json::to_string(&pins).unwrap()
}

#[tokio::test]
async fn test_pin_adds_pin() {
    let transport = Arc::new(MockTransport::new());
    transport.respond(Method::GET, &pins_endpoint(), 200, &pins_body(false));
    transport.respond(Method::PUT, &pin_endpoint(), 204, "");
    let command = PinMessageCommand::new(mock_client(&transport));

    let response = command
        .handle(&interaction(PIN_COMMAND_NAME, 3))
        .await
        .unwrap();

    assert_eq!(response, InteractionResponse::ephemeral(PIN_ADDED));

    let puts = transport.requests_to(Method::PUT, &pin_endpoint());
    assert_eq!(puts.len(), 1);
    assert_eq!(
        puts[0].headers.get("x-audit-log-reason").unwrap(),
        "Action%20performed%20on%20behalf%20of%20user%20alice"
    );
}

#[tokio::test]
async fn test_pin_twice_on_pinned_message_takes_no_action() {
    let transport = Arc::new(MockTransport::new());
    transport.respond(Method::GET, &pins_endpoint(), 200, &pins_body(true));
    transport.respond(Method::PUT, &pin_endpoint(), 204, "");
    let command = PinMessageCommand::new(mock_client(&transport));
    let interaction = interaction(PIN_COMMAND_NAME, 3);

    for _ in 0..2 {
        let response = command.handle(&interaction).await.unwrap();
        assert_eq!(response, InteractionResponse::ephemeral(ALREADY_PINNED));
    }

    assert_eq!(transport.requests_to(Method::GET, &pins_endpoint()).len(), 2);
    assert!(transport.requests_to(Method::PUT, &pin_endpoint()).is_empty());
}

#[rstest]
#[case::chat_input(1)]
#[case::user_context_menu(2)]
#[tokio::test]
async fn test_pin_rejects_non_message_command(#[case] command_type: u8) {
    let transport = Arc::new(MockTransport::new());
    let command = PinMessageCommand::new(mock_client(&transport));

    let response = command
        .handle(&interaction(PIN_COMMAND_NAME, command_type))
        .await
        .unwrap();

    assert_eq!(response, InteractionResponse::unknown_error(INTERACTION_ID));
    assert!(transport.get_requests().is_empty());
}

#[tokio::test]
async fn test_pin_without_target_is_error() {
    let transport = Arc::new(MockTransport::new());
    let command = PinMessageCommand::new(mock_client(&transport));

    let mut value = command_interaction(PIN_COMMAND_NAME, 3);
    value["data"].as_object_mut().unwrap().remove("target_id");
    let interaction: GuildInteraction = serde_json::from_value(value).unwrap();

    assert!(command.handle(&interaction).await.is_err());
    assert!(transport.get_requests().is_empty());
}

#[tokio::test]
async fn test_pin_fetch_failure_returns_unknown_error() {
    let transport = Arc::new(MockTransport::new());
    transport.fail(Method::GET, &pins_endpoint(), "connection reset");
    let command = PinMessageCommand::new(mock_client(&transport));

    let response = command
        .handle(&interaction(PIN_COMMAND_NAME, 3))
        .await
        .unwrap();

    assert_eq!(response, InteractionResponse::unknown_error(INTERACTION_ID));
    assert!(transport.requests_to(Method::PUT, &pin_endpoint()).is_empty());
}

#[rstest]
#[case::forbidden(403, r#"{"message": "Missing Permissions", "code": 50013}"#)]
#[case::unexpected_success(200, "{}")]
#[tokio::test]
async fn test_pin_update_failure_returns_unknown_error(#[case] status: u16, #[case] body: &str) {
    let transport = Arc::new(MockTransport::new());
    transport.respond(Method::GET, &pins_endpoint(), 200, &pins_body(false));
    transport.respond(Method::PUT, &pin_endpoint(), status, body);
    let command = PinMessageCommand::new(mock_client(&transport));

    let response = command
        .handle(&interaction(PIN_COMMAND_NAME, 3))
        .await
        .unwrap();

    assert_eq!(response, InteractionResponse::unknown_error(INTERACTION_ID));
}

#[tokio::test]
async fn test_unpin_removes_pin() {
    let transport = Arc::new(MockTransport::new());
    transport.respond(Method::GET, &pins_endpoint(), 200, &pins_body(true));
    transport.respond(Method::DELETE, &pin_endpoint(), 204, "");
    let command = UnpinMessageCommand::new(mock_client(&transport));

    let response = command
        .handle(&interaction(UNPIN_COMMAND_NAME, 3))
        .await
        .unwrap();

    assert_eq!(response, InteractionResponse::ephemeral(PIN_REMOVED));
    assert_eq!(transport.requests_to(Method::DELETE, &pin_endpoint()).len(), 1);
}

#[tokio::test]
async fn test_unpin_not_pinned_takes_no_action() {
    let transport = Arc::new(MockTransport::new());
    transport.respond(Method::GET, &pins_endpoint(), 200, &pins_body(false));
    let command = UnpinMessageCommand::new(mock_client(&transport));

    let response = command
        .handle(&interaction(UNPIN_COMMAND_NAME, 3))
        .await
        .unwrap();

    assert_eq!(response, InteractionResponse::ephemeral(NOT_PINNED));
    assert!(transport.requests_to(Method::DELETE, &pin_endpoint()).is_empty());
}
