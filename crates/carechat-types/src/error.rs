use thiserror::Error;

/// Errors returned by conversation operations.
/// None of them are fatal; the conversation is always left in a valid state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Assistant is still composing a reply")]
    Busy,

    #[error("No quick reply at index {0}")]
    UnknownQuickReply(usize),

    #[error("Speech recognition is not available")]
    VoiceUnavailable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}

/// Failure of a single call to the completion service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Decode error: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Speech capability not available")]
    Unavailable,

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoundError {
    #[error("Audio output not available")]
    Unavailable,

    #[error("Playback error: {0}")]
    Playback(String),
}
