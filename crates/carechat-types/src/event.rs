use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::sound::SoundCue;

/// Where an assistant message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// The completion service answered (including the empty-answer placeholder)
    Remote,
    /// The completion service failed; the local fallback answered
    Fallback,
    /// A fixed text appended without a remote call
    Scripted,
}

/// Events emitted by the orchestrator.
/// The page drains these to re-render and to surface notices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A message was appended to the conversation
    MessageAppended { message: Message },

    /// The "assistant is composing" flag flipped
    ComposingChanged { composing: bool },

    /// The assistant message closing a turn was appended
    ReplyDelivered { message_id: u64, source: ReplySource },

    /// A notification cue was requested
    CuePlayed { cue: SoundCue },

    /// Text the page must show to the user outside the conversation
    Notice { text: String },

    /// Speech recognition started or stopped
    ListeningChanged { listening: bool },
}
