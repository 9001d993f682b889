use serde::{Deserialize, Serialize};

/// The three notification cues. Each one is bound to its own audio asset
/// and volume (see `config::SoundConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Button press, voice start, quick reply
    Interaction,
    /// An assistant reply arrived from the completion service
    ReplySuccess,
    /// The completion service failed and a fallback reply was used
    ReplyFailure,
}

impl SoundCue {
    pub fn all() -> &'static [SoundCue] {
        &[
            SoundCue::Interaction,
            SoundCue::ReplySuccess,
            SoundCue::ReplyFailure,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            SoundCue::Interaction => "interaction",
            SoundCue::ReplySuccess => "reply-success",
            SoundCue::ReplyFailure => "reply-failure",
        }
    }
}
