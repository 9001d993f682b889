//! CareChat platform: browser implementations of the core ports.
//!
//! - [`llm`]: completion service over `fetch()`
//! - [`speech`]: Web Speech API recognition and synthesis
//! - [`audio`]: notification cues on `<audio>` elements

pub mod llm;
pub mod speech;
pub mod audio;
