//! Port traits at the hexagonal architecture boundary.
//!
//! These traits are defined here in `carechat-core` (pure Rust).
//! Implementations live in `carechat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use carechat_types::{
    RemoteError, SoundError, VoiceError,
    config::VoiceConfig,
    sound::SoundCue,
};

// ─── Completion Port ─────────────────────────────────────────

#[async_trait(?Send)]
pub trait CompletionPort {
    /// One single-turn request to the completion service. No retries.
    ///
    /// A response that round-tripped but carried no usable answer is still
    /// `Ok` (with a placeholder text).
    async fn complete(&self, user_text: &str) -> Result<String, RemoteError>;
}

// ─── Speech Ports ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait SpeechInputPort {
    fn is_available(&self) -> bool;

    /// Run one non-continuous recognition session and resolve with the
    /// final transcript, or `None` if it ended without one.
    async fn listen_once(&self, lang: &str) -> Result<Option<String>, VoiceError>;
}

pub trait SpeechOutputPort {
    fn is_available(&self) -> bool;

    /// Queue `text` for playback. Returns once queued, not once spoken.
    fn speak(&self, text: &str, voice: &VoiceConfig) -> Result<(), VoiceError>;
}

// ─── Sound Port ──────────────────────────────────────────────

pub trait SoundPort {
    /// Restart the cue from the beginning. Fire-and-forget.
    fn play(&self, cue: SoundCue) -> Result<(), SoundError>;
}
