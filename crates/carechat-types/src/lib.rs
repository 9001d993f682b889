pub mod message;
pub mod event;
pub mod sound;
pub mod config;
pub mod error;


pub use error::{ChatError, RemoteError, SoundError, TransportError, VoiceError};
pub type Result<T> = std::result::Result<T, ChatError>;
