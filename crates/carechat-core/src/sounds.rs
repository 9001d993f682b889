//! Notification cues. Purely cosmetic: a failure to play never reaches
//! the caller.

use std::rc::Rc;

use carechat_types::{event::ChatEvent, sound::SoundCue};

use crate::event_bus::EventBus;
use crate::ports::SoundPort;

pub struct NotificationSounds {
    port: Option<Rc<dyn SoundPort>>,
    event_bus: EventBus,
}

impl NotificationSounds {
    pub fn new(port: Rc<dyn SoundPort>, event_bus: EventBus) -> Self {
        Self {
            port: Some(port),
            event_bus,
        }
    }

    /// Cues are still announced on the bus, but nothing is played.
    pub fn silent(event_bus: EventBus) -> Self {
        Self {
            port: None,
            event_bus,
        }
    }

    pub fn play(&self, cue: SoundCue) {
        self.event_bus.emit(ChatEvent::CuePlayed { cue });
        if let Some(port) = &self.port {
            if let Err(e) = port.play(cue) {
                log::trace!("Cue {} not played: {}", cue.label(), e);
            }
        }
    }

    pub fn is_silent(&self) -> bool {
        self.port.is_none()
    }
}
