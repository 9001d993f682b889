//! WASM-target tests for carechat-core.
//!
//! Runs EventBus, FallbackResponder, reply extraction, and Orchestrator
//! tests under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use carechat_core::completion::{extract_reply, NO_ANSWER_PLACEHOLDER};
use carechat_core::event_bus::EventBus;
use carechat_core::fallback::*;
use carechat_core::orchestrator::{Orchestrator, TurnState, VISUALISATION_NOTICE};
use carechat_core::ports::*;
use carechat_core::sounds::NotificationSounds;
use carechat_core::voice::{VoiceBridge, VoiceCapture};
use carechat_types::config::{ChatConfig, VoiceConfig};
use carechat_types::event::{ChatEvent, ReplySource};
use carechat_types::message::Sender;
use carechat_types::{ChatError, RemoteError, TransportError, VoiceError};

use async_trait::async_trait;
use std::rc::Rc;

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(ChatEvent::ComposingChanged { composing: true });
    bus.emit(ChatEvent::Notice { text: "hi".to_string() });

    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 2);
    assert!(!bus.has_pending());
}

// ─── Fallback Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn fallback_priority() {
    let fb = FallbackResponder::new();
    assert_eq!(fb.reply("CHEST tightness after ibuprofen"), CARDIAC_WARNING_REPLY);
    assert_eq!(fb.reply("ibuprofen dose"), IBUPROFEN_REPLY);
    assert_eq!(fb.reply("Cetirizine?"), CETIRIZINE_REPLY);
    assert_eq!(fb.reply("hello"), GENERIC_TRIAGE_REPLY);
}

// ─── Reply extraction Tests ──────────────────────────────

#[wasm_bindgen_test]
fn extract_reply_cases() {
    assert_eq!(
        extract_reply(r#"{"choices":[{"message":{"content":"Hi"}}]}"#).unwrap(),
        "Hi"
    );
    assert_eq!(extract_reply(r#"{"choices":[]}"#).unwrap(), NO_ANSWER_PLACEHOLDER);
    assert!(extract_reply("not json").is_err());
}

// ─── Orchestrator Tests ──────────────────────────────────

struct MockCompletion {
    reply: Result<String, RemoteError>,
}

#[async_trait(?Send)]
impl CompletionPort for MockCompletion {
    async fn complete(&self, _user_text: &str) -> Result<String, RemoteError> {
        self.reply.clone()
    }
}

struct MockSpeechInput {
    transcript: String,
}

#[async_trait(?Send)]
impl SpeechInputPort for MockSpeechInput {
    fn is_available(&self) -> bool {
        true
    }

    async fn listen_once(&self, _lang: &str) -> Result<Option<String>, VoiceError> {
        Ok(Some(self.transcript.clone()))
    }
}

fn make_orchestrator(reply: Result<String, RemoteError>) -> Orchestrator {
    let bus = EventBus::new();
    let sounds = NotificationSounds::silent(bus.clone());
    Orchestrator::new(
        &ChatConfig::default(),
        Rc::new(MockCompletion { reply }),
        sounds,
        bus,
    )
}

#[wasm_bindgen_test]
fn orchestrator_starts_with_greeting() {
    let orch = make_orchestrator(Ok("unused".to_string()));
    assert_eq!(orch.message_count(), 1);
    assert_eq!(orch.messages()[0].sender, Sender::Assistant);
    assert_eq!(orch.state(), TurnState::Idle);
}

#[wasm_bindgen_test]
async fn orchestrator_remote_reply() {
    let orch = make_orchestrator(Ok("Sure, I can help you book...".to_string()));

    let reply = orch.send("I want to book an appointment.").await.unwrap();

    assert_eq!(reply.source, ReplySource::Remote);
    assert_eq!(orch.message_count(), 3);
    assert_eq!(orch.messages()[2].text, "Sure, I can help you book...");
    assert!(!orch.is_composing());
}

#[wasm_bindgen_test]
async fn orchestrator_fallback_on_error() {
    let orch = make_orchestrator(Err(TransportError::Network("offline".to_string()).into()));

    let reply = orch.send("What about chest pain?").await.unwrap();

    assert_eq!(reply.source, ReplySource::Fallback);
    assert_eq!(reply.message.text, CARDIAC_WARNING_REPLY);
    assert!(!orch.is_composing());
}

#[wasm_bindgen_test]
async fn orchestrator_rejects_blank() {
    let orch = make_orchestrator(Ok("unused".to_string()));
    assert_eq!(orch.send("   ").await, Err(ChatError::EmptyInput));
    assert_eq!(orch.message_count(), 1);
}

#[wasm_bindgen_test]
async fn orchestrator_quick_reply_and_visualisation() {
    let orch = make_orchestrator(Ok("ok".to_string()));

    orch.quick_reply(0).await.unwrap();
    assert_eq!(orch.messages()[1].text, orch.quick_replies()[0].utterance);

    let notice = orch.show_visualisation().unwrap();
    assert_eq!(notice.text, VISUALISATION_NOTICE);
    assert_eq!(orch.message_count(), 4);
}

#[wasm_bindgen_test]
async fn voice_capture_sends_transcript() {
    let orch = make_orchestrator(Ok("Noted.".to_string()));
    let bridge = VoiceBridge::new(
        Some(Rc::new(MockSpeechInput {
            transcript: " I have a headache ".to_string(),
        })),
        None,
        VoiceConfig::default(),
    );

    let outcome = bridge.capture(&orch).await.unwrap();

    assert!(matches!(outcome, VoiceCapture::Replied(_)));
    assert_eq!(orch.messages()[1].text, "I have a headache");
    assert!(!bridge.can_speak());
}
