//! Web Speech API adapters.
//!
//! Recognition is still prefixed in some browsers and not exposed by
//! web-sys without unstable cfgs, so the constructor is looked up on
//! `window` at runtime and driven through `js_sys::Reflect`.
//! Synthesis uses the stable web-sys bindings.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

use carechat_core::ports::{SpeechInputPort, SpeechOutputPort};
use carechat_types::{config::VoiceConfig, VoiceError};

const RECOGNITION_CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

type Outcome = Result<Option<String>, VoiceError>;
type OutcomeSlot = Rc<RefCell<Option<oneshot::Sender<Outcome>>>>;

// ─── Recognition ─────────────────────────────────────────────

pub struct WebSpeechRecognition {
    constructor: Option<Function>,
}

impl WebSpeechRecognition {
    pub fn detect() -> Self {
        let constructor = web_sys::window().and_then(|window| {
            RECOGNITION_CONSTRUCTORS.iter().find_map(|name| {
                Reflect::get(&window, &JsValue::from_str(name))
                    .ok()
                    .and_then(|v| v.dyn_into::<Function>().ok())
            })
        });
        if constructor.is_none() {
            log::info!("Speech recognition not supported by this browser");
        }
        Self { constructor }
    }

    fn start_session(&self, ctor: &Function, lang: &str, slot: OutcomeSlot) -> Result<Session, JsValue> {
        let recognition = Reflect::construct(ctor, &Array::new())?;
        Reflect::set(&recognition, &"lang".into(), &JsValue::from_str(lang))?;
        Reflect::set(&recognition, &"continuous".into(), &JsValue::FALSE)?;
        Reflect::set(&recognition, &"interimResults".into(), &JsValue::FALSE)?;
        Reflect::set(&recognition, &"maxAlternatives".into(), &JsValue::from_f64(1.0))?;

        let on_result = {
            let slot = slot.clone();
            Closure::wrap(Box::new(move |event: JsValue| {
                resolve(&slot, Ok(first_transcript(&event)));
            }) as Box<dyn FnMut(JsValue)>)
        };
        let on_error = {
            let slot = slot.clone();
            Closure::wrap(Box::new(move |event: JsValue| {
                let code = Reflect::get(&event, &"error".into())
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_else(|| "unknown".to_string());
                resolve(&slot, Err(VoiceError::Recognition(code)));
            }) as Box<dyn FnMut(JsValue)>)
        };
        let on_end = Closure::wrap(Box::new(move |_event: JsValue| {
            resolve(&slot, Ok(None));
        }) as Box<dyn FnMut(JsValue)>);

        let session = Session {
            recognition,
            handlers: vec![
                ("onresult", on_result),
                ("onerror", on_error),
                ("onend", on_end),
            ],
        };
        for (name, handler) in &session.handlers {
            Reflect::set(&session.recognition, &(*name).into(), handler.as_ref())?;
        }
        session.call("start")?;
        Ok(session)
    }
}

#[async_trait(?Send)]
impl SpeechInputPort for WebSpeechRecognition {
    fn is_available(&self) -> bool {
        self.constructor.is_some()
    }

    async fn listen_once(&self, lang: &str) -> Result<Option<String>, VoiceError> {
        let ctor = self.constructor.as_ref().ok_or(VoiceError::Unavailable)?;
        let (tx, rx) = oneshot::channel();
        let slot: OutcomeSlot = Rc::new(RefCell::new(Some(tx)));

        let _session = self
            .start_session(ctor, lang, slot)
            .map_err(|e| VoiceError::Recognition(format!("{:?}", e)))?;

        // The first of result / error / end wins; a closed channel means none fired.
        rx.await.unwrap_or(Ok(None))
    }
}

/// A running recognition object plus the callbacks it holds.
/// Dropping it detaches the callbacks before they are freed.
struct Session {
    recognition: JsValue,
    handlers: Vec<(&'static str, Closure<dyn FnMut(JsValue)>)>,
}

impl Session {
    fn call(&self, method: &str) -> Result<JsValue, JsValue> {
        let f: Function = Reflect::get(&self.recognition, &method.into())?.dyn_into()?;
        f.call0(&self.recognition)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for (name, _) in &self.handlers {
            let _ = Reflect::set(&self.recognition, &(*name).into(), &JsValue::NULL);
        }
        let _ = self.call("abort");
    }
}

fn resolve(slot: &OutcomeSlot, outcome: Outcome) {
    if let Some(tx) = slot.borrow_mut().take() {
        let _ = tx.send(outcome);
    }
}

/// `event.results[0][0].transcript`
fn first_transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &"results".into()).ok()?;
    let first = Reflect::get_u32(&results, 0).ok()?;
    let alternative = Reflect::get_u32(&first, 0).ok()?;
    Reflect::get(&alternative, &"transcript".into())
        .ok()?
        .as_string()
}

// ─── Synthesis ───────────────────────────────────────────────

pub struct WebSpeechSynthesis {
    synth: Option<SpeechSynthesis>,
}

impl WebSpeechSynthesis {
    pub fn detect() -> Self {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::info!("Speech synthesis not supported by this browser");
        }
        Self { synth }
    }
}

impl SpeechOutputPort for WebSpeechSynthesis {
    fn is_available(&self) -> bool {
        self.synth.is_some()
    }

    fn speak(&self, text: &str, voice: &VoiceConfig) -> Result<(), VoiceError> {
        let synth = self.synth.as_ref().ok_or(VoiceError::Unavailable)?;
        let utterance = SpeechSynthesisUtterance::new_with_text(text)
            .map_err(|e| VoiceError::Synthesis(format!("{:?}", e)))?;
        utterance.set_lang(&voice.lang);
        utterance.set_rate(voice.rate);
        utterance.set_pitch(voice.pitch);
        synth.speak(&utterance);
        Ok(())
    }
}
