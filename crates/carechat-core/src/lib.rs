//! CareChat core: the conversation engine.
//!
//! Everything here is plain Rust. Browser capabilities (HTTP, speech,
//! audio) are reached only through the traits in [`ports`].

pub mod ports;
pub mod event_bus;
pub mod store;
pub mod fallback;
pub mod completion;
pub mod sounds;
pub mod voice;
pub mod orchestrator;
