//! Voice bridge over the optional speech capabilities.
//!
//! Speech input feeds transcripts into [`Orchestrator::send`], the same
//! guarded path as typed text. Missing speech input is reported to the user
//! through a `Notice` event; missing speech output is silently ignored.

use std::cell::Cell;
use std::rc::Rc;

use carechat_types::{
    ChatError, Result,
    config::VoiceConfig,
    event::ChatEvent,
    sound::SoundCue,
};

use crate::orchestrator::{Orchestrator, Reply};
use crate::ports::{SpeechInputPort, SpeechOutputPort};

pub const SPEECH_UNAVAILABLE_NOTICE: &str = "Speech recognition is not supported in this browser.";

/// Outcome of a voice capture that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceCapture {
    /// A transcript was sent and answered
    Replied(Reply),
    /// The session ended without a usable transcript
    NoSpeech,
    /// A session was already running; nothing was started
    AlreadyListening,
}

pub struct VoiceBridge {
    input: Option<Rc<dyn SpeechInputPort>>,
    output: Option<Rc<dyn SpeechOutputPort>>,
    voice: VoiceConfig,
    listening: Rc<Cell<bool>>,
}

impl VoiceBridge {
    pub fn new(
        input: Option<Rc<dyn SpeechInputPort>>,
        output: Option<Rc<dyn SpeechOutputPort>>,
        voice: VoiceConfig,
    ) -> Self {
        Self {
            input,
            output,
            voice,
            listening: Rc::new(Cell::new(false)),
        }
    }

    pub fn can_listen(&self) -> bool {
        self.input.as_ref().is_some_and(|i| i.is_available())
    }

    pub fn can_speak(&self) -> bool {
        self.output.as_ref().is_some_and(|o| o.is_available())
    }

    pub fn is_listening(&self) -> bool {
        self.listening.get()
    }

    /// Listen once and send the transcript as the user's message.
    ///
    /// Refused with `Busy` before any session starts while a reply is pending.
    pub async fn capture(&self, orchestrator: &Orchestrator) -> Result<VoiceCapture> {
        orchestrator.sounds().play(SoundCue::Interaction);

        let input = match &self.input {
            Some(input) if input.is_available() => input.clone(),
            _ => {
                orchestrator.events().emit(ChatEvent::Notice {
                    text: SPEECH_UNAVAILABLE_NOTICE.to_string(),
                });
                return Err(ChatError::VoiceUnavailable);
            }
        };

        // A transcript could not be sent until the pending reply lands.
        if orchestrator.is_composing() {
            log::debug!("Not listening while a reply is pending");
            return Err(ChatError::Busy);
        }

        // A second start while listening is a no-op.
        if self.listening.replace(true) {
            log::debug!("Speech recognition already running");
            return Ok(VoiceCapture::AlreadyListening);
        }
        orchestrator
            .events()
            .emit(ChatEvent::ListeningChanged { listening: true });

        let heard = input.listen_once(&self.voice.lang).await;

        self.listening.set(false);
        orchestrator
            .events()
            .emit(ChatEvent::ListeningChanged { listening: false });

        match heard {
            Ok(Some(transcript)) if !transcript.trim().is_empty() => {
                let reply = orchestrator.send(transcript.trim()).await?;
                Ok(VoiceCapture::Replied(reply))
            }
            Ok(_) => Ok(VoiceCapture::NoSpeech),
            Err(e) => {
                log::debug!("Speech recognition ended without a transcript: {}", e);
                Ok(VoiceCapture::NoSpeech)
            }
        }
    }

    /// Read a message aloud. Returns whether it was handed to the synthesizer.
    pub fn speak(&self, orchestrator: &Orchestrator, message_id: u64) -> bool {
        orchestrator.sounds().play(SoundCue::Interaction);

        let Some(output) = self.output.as_ref().filter(|o| o.is_available()) else {
            return false;
        };
        let Some(message) = orchestrator.message(message_id) else {
            return false;
        };

        match output.speak(&message.text, &self.voice) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Speech synthesis failed: {}", e);
                false
            }
        }
    }
}
