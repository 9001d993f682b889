//! WASM-target tests for carechat-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use carechat_types::message::*;
use carechat_types::event::*;
use carechat_types::sound::*;
use carechat_types::config::*;
use carechat_types::error::*;

// ─── Message Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn message_new_user() {
    let msg = Message::new(2, Sender::User, "Hello");
    assert_eq!(msg.id, 2);
    assert!(msg.is_user());
    assert_eq!(msg.text, "Hello");
}

#[wasm_bindgen_test]
fn message_time_label_format() {
    let msg = Message::new(1, Sender::Assistant, "x");
    let label = msg.time_label();
    assert_eq!(label.len(), 5);
    assert_eq!(&label[2..3], ":");
}

#[wasm_bindgen_test]
fn message_json_shape() {
    let msg = Message::new(3, Sender::Assistant, "reply");
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["sender"], "assistant");
    assert_eq!(value["id"], 3);
}

// ─── Event Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn event_tagged_serialization() {
    let event = ChatEvent::Notice { text: "hello".to_string() };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "notice");
    assert_eq!(value["text"], "hello");
}

#[wasm_bindgen_test]
fn reply_source_lowercase() {
    let value = serde_json::to_value(ReplySource::Scripted).unwrap();
    assert_eq!(value, "scripted");
}

// ─── Config Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn default_config_is_valid() {
    assert!(ChatConfig::default().validate().is_ok());
}

#[wasm_bindgen_test]
fn overrides_partial_json() {
    let config =
        ChatConfig::from_json_overrides(r#"{"completion": {"api_key": "abc"}}"#).unwrap();
    assert_eq!(config.completion.api_key, "abc");
    assert_eq!(config.completion.model, DEFAULT_MODEL);
}

#[wasm_bindgen_test]
fn overrides_volume_out_of_range() {
    let result = ChatConfig::from_json_overrides(
        r#"{"sounds": {"interaction": {"src": "/c.mp3", "volume": -0.1}}}"#,
    );
    assert!(matches!(result, Err(ChatError::Config(_))));
}

#[wasm_bindgen_test]
fn sound_asset_lookup() {
    let sounds = SoundConfig::default();
    assert_eq!(sounds.asset(SoundCue::ReplySuccess).src, "/sounds/reply.mp3");
}

// ─── Error Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn remote_error_from_transport() {
    let err: RemoteError = TransportError::Network("reset".to_string()).into();
    assert_eq!(err, RemoteError::Transport(TransportError::Network("reset".to_string())));
}
