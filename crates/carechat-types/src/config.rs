use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::sound::SoundCue;
use crate::Result;

/// Top-level engine configuration.
///
/// Every struct carries `#[serde(default)]`, so a partial JSON document
/// from the page overlays the defaults field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub completion: CompletionConfig,
    pub voice: VoiceConfig,
    pub sounds: SoundConfig,
    /// First assistant message of every conversation
    pub greeting: String,
    pub quick_replies: Vec<QuickReply>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            completion: CompletionConfig::default(),
            voice: VoiceConfig::default(),
            sounds: SoundConfig::default(),
            greeting: DEFAULT_GREETING.to_string(),
            quick_replies: QuickReply::defaults(),
        }
    }
}

impl ChatConfig {
    /// Parse page-supplied overrides on top of the defaults and validate.
    pub fn from_json_overrides(json: &str) -> Result<Self> {
        let config: ChatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.completion.endpoint.trim().is_empty() {
            return Err(ChatError::Config("completion endpoint is empty".to_string()));
        }
        if self.completion.model.trim().is_empty() {
            return Err(ChatError::Config("completion model is empty".to_string()));
        }
        if self.completion.timeout_ms == Some(0) {
            return Err(ChatError::Config("completion timeout must be positive".to_string()));
        }
        if self.greeting.trim().is_empty() {
            return Err(ChatError::Config("greeting is empty".to_string()));
        }
        if self.voice.lang.trim().is_empty() {
            return Err(ChatError::Config("voice language tag is empty".to_string()));
        }
        for cue in SoundCue::all() {
            let volume = self.sounds.asset(*cue).volume;
            if !(0.0..=1.0).contains(&volume) {
                return Err(ChatError::Config(format!(
                    "{} volume {} is outside 0.0..=1.0",
                    cue.label(),
                    volume
                )));
            }
        }
        if let Some(i) = self
            .quick_replies
            .iter()
            .position(|q| q.utterance.trim().is_empty())
        {
            return Err(ChatError::Config(format!("quick reply {} has no utterance", i)));
        }
        Ok(())
    }
}

/// Remote chat-completion endpoint settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub system_prompt: String,
    /// Upper bound for one request; `None` waits indefinitely
    pub timeout_ms: Option<u64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: option_env!("CARECHAT_ENDPOINT")
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: option_env!("CARECHAT_API_KEY").unwrap_or_default().to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
        }
    }
}

// Hand-written so the key never reaches a log line.
impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("system_prompt", &self.system_prompt)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Speech recognition / synthesis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// BCP 47 tag used for recognition and synthesis
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub interaction: CueAsset,
    pub reply_success: CueAsset,
    pub reply_failure: CueAsset,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            interaction: CueAsset::new("/sounds/click.mp3", 0.4),
            reply_success: CueAsset::new("/sounds/reply.mp3", 0.5),
            reply_failure: CueAsset::new("/sounds/error.mp3", 0.5),
        }
    }
}

impl SoundConfig {
    pub fn asset(&self, cue: SoundCue) -> &CueAsset {
        match cue {
            SoundCue::Interaction => &self.interaction,
            SoundCue::ReplySuccess => &self.reply_success,
            SoundCue::ReplyFailure => &self.reply_failure,
        }
    }
}

/// Audio file and playback volume for one cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueAsset {
    pub src: String,
    pub volume: f64,
}

impl CueAsset {
    pub fn new(src: impl Into<String>, volume: f64) -> Self {
        Self {
            src: src.into(),
            volume,
        }
    }
}

/// A pre-authored shortcut that injects a fixed user utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    /// Button caption
    pub label: String,
    /// Text sent as the user's message
    pub utterance: String,
}

impl QuickReply {
    pub fn new(label: impl Into<String>, utterance: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            utterance: utterance.into(),
        }
    }

    pub fn defaults() -> Vec<QuickReply> {
        vec![
            QuickReply::new("Book an appointment", "I want to book an appointment."),
            QuickReply::new("Emergency contact", "What is the emergency contact number?"),
            QuickReply::new("Healthy diet tips", "Give me some healthy diet tips."),
            QuickReply::new("How to manage stress?", "How can I manage stress and anxiety?"),
        ]
    }
}

pub const DEFAULT_ENDPOINT: &str = "https://api.aimlapi.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly hospital AI assistant. \
Give clear, short, safe health information. \
Always remind users to see a doctor for diagnosis.";

const DEFAULT_GREETING: &str = "Hello! I’m your AI Health Assistant. I can help you with health \
questions, symptoms, nutrition advice, mental health support and information about hospital \
services. How can I assist you today?";
