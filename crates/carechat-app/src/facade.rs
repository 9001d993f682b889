//! JS-facing handle over the orchestrator and voice bridge.
//!
//! Async operations return a `Promise<boolean>`: `true` when a turn ran,
//! `false` when the input was ignored. Nothing is thrown after
//! construction; the page reads state back through `messages()` and
//! `drainEvents()`.

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use carechat_core::event_bus::EventBus;
use carechat_core::orchestrator::{Orchestrator, Reply};
use carechat_core::ports::{CompletionPort, SpeechInputPort, SpeechOutputPort};
use carechat_core::sounds::NotificationSounds;
use carechat_core::voice::{VoiceBridge, VoiceCapture};
use carechat_platform::audio::HtmlAudioCues;
use carechat_platform::llm::OpenAiCompatClient;
use carechat_platform::speech::{WebSpeechRecognition, WebSpeechSynthesis};
use carechat_types::{config::ChatConfig, ChatError, Result};

#[wasm_bindgen]
pub struct CareChat {
    orchestrator: Rc<Orchestrator>,
    voice: Rc<VoiceBridge>,
}

#[wasm_bindgen]
impl CareChat {
    /// `config_json` is a partial `ChatConfig` laid over the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> std::result::Result<CareChat, JsValue> {
        let config = load_config(config_json.as_deref()).map_err(to_js)?;
        log::debug!("Config: {:?}", config);
        Ok(Self::wire(&config))
    }

    pub fn send(&self, text: String) -> Promise {
        let orchestrator = self.orchestrator.clone();
        future_to_promise(async move {
            let ran = turn_ran(orchestrator.send(&text).await);
            Ok(JsValue::from_bool(ran))
        })
    }

    #[wasm_bindgen(js_name = setDraft)]
    pub fn set_draft(&self, text: String) {
        self.orchestrator.set_draft(text);
    }

    pub fn draft(&self) -> String {
        self.orchestrator.draft()
    }

    #[wasm_bindgen(js_name = submitDraft)]
    pub fn submit_draft(&self) -> Promise {
        let orchestrator = self.orchestrator.clone();
        future_to_promise(async move {
            let ran = turn_ran(orchestrator.submit_draft().await);
            Ok(JsValue::from_bool(ran))
        })
    }

    #[wasm_bindgen(js_name = quickReply)]
    pub fn quick_reply(&self, index: usize) -> Promise {
        let orchestrator = self.orchestrator.clone();
        future_to_promise(async move {
            let ran = turn_ran(orchestrator.quick_reply(index).await);
            Ok(JsValue::from_bool(ran))
        })
    }

    /// JSON array of `{label, utterance}`
    #[wasm_bindgen(js_name = quickReplies)]
    pub fn quick_replies(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(self.orchestrator.quick_replies())
            .map_err(|e| to_js(e.into()))
    }

    #[wasm_bindgen(js_name = startVoiceInput)]
    pub fn start_voice_input(&self) -> Promise {
        let orchestrator = self.orchestrator.clone();
        let voice = self.voice.clone();
        future_to_promise(async move {
            let ran = match voice.capture(&orchestrator).await {
                Ok(VoiceCapture::Replied(_)) => true,
                Ok(other) => {
                    log::debug!("Voice input produced no turn: {:?}", other);
                    false
                }
                Err(e) => {
                    log::debug!("Voice input rejected: {}", e);
                    false
                }
            };
            Ok(JsValue::from_bool(ran))
        })
    }

    /// Read message `message_id` aloud. `false` if nothing was queued.
    pub fn speak(&self, message_id: u32) -> bool {
        self.voice.speak(&self.orchestrator, u64::from(message_id))
    }

    #[wasm_bindgen(js_name = showVisualisation)]
    pub fn show_visualisation(&self) -> bool {
        match self.orchestrator.show_visualisation() {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Visualisation shortcut rejected: {}", e);
                false
            }
        }
    }

    /// JSON array of every message in order
    pub fn messages(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.orchestrator.messages()).map_err(|e| to_js(e.into()))
    }

    #[wasm_bindgen(js_name = isComposing)]
    pub fn is_composing(&self) -> bool {
        self.orchestrator.is_composing()
    }

    #[wasm_bindgen(js_name = isListening)]
    pub fn is_listening(&self) -> bool {
        self.voice.is_listening()
    }

    #[wasm_bindgen(js_name = canListen)]
    pub fn can_listen(&self) -> bool {
        self.voice.can_listen()
    }

    #[wasm_bindgen(js_name = canSpeak)]
    pub fn can_speak(&self) -> bool {
        self.voice.can_speak()
    }

    /// JSON array of pending notice texts the page must show the user.
    /// Other events stay queued for `drainEvents()`.
    #[wasm_bindgen(js_name = drainNotices)]
    pub fn drain_notices(&self) -> std::result::Result<String, JsValue> {
        let notices = self.orchestrator.events().drain_notices();
        serde_json::to_string(&notices).map_err(|e| to_js(e.into()))
    }

    /// JSON array of `ChatEvent`s published since the last call
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> std::result::Result<String, JsValue> {
        let events = self.orchestrator.events().drain();
        serde_json::to_string(&events).map_err(|e| to_js(e.into()))
    }
}

impl CareChat {
    fn wire(config: &ChatConfig) -> Self {
        let event_bus = EventBus::new();

        let completion: Rc<dyn CompletionPort> =
            Rc::new(OpenAiCompatClient::new(config.completion.clone()));

        let cues = HtmlAudioCues::new(&config.sounds);
        log::info!("Loaded {} notification cues", cues.loaded());
        let sounds = NotificationSounds::new(Rc::new(cues), event_bus.clone());

        let recognition = WebSpeechRecognition::detect();
        let input: Option<Rc<dyn SpeechInputPort>> = if recognition.is_available() {
            Some(Rc::new(recognition))
        } else {
            None
        };
        let synthesis = WebSpeechSynthesis::detect();
        let output: Option<Rc<dyn SpeechOutputPort>> = if synthesis.is_available() {
            Some(Rc::new(synthesis))
        } else {
            None
        };

        let orchestrator = Orchestrator::new(config, completion, sounds, event_bus);
        let voice = VoiceBridge::new(input, output, config.voice.clone());

        Self {
            orchestrator: Rc::new(orchestrator),
            voice: Rc::new(voice),
        }
    }
}

/// Defaults, optionally overlaid with a partial JSON document.
pub fn load_config(config_json: Option<&str>) -> Result<ChatConfig> {
    match config_json.map(str::trim) {
        Some(json) if !json.is_empty() => ChatConfig::from_json_overrides(json),
        _ => {
            let config = ChatConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Map a turn result to the page's boolean, logging why a turn was skipped.
pub fn turn_ran(result: Result<Reply>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Turn not started: {}", e);
            false
        }
    }
}

fn to_js(e: ChatError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
