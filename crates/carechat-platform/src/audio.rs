//! Notification cues backed by preloaded `<audio>` elements.

use carechat_core::ports::SoundPort;
use carechat_types::{config::SoundConfig, sound::SoundCue, SoundError};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

pub struct HtmlAudioCues {
    players: Vec<(SoundCue, HtmlAudioElement)>,
}

impl HtmlAudioCues {
    /// Build one element per cue. Cues whose element cannot be created are
    /// left out and later report `SoundError::Unavailable`.
    pub fn new(config: &SoundConfig) -> Self {
        let mut players = Vec::new();
        for cue in SoundCue::all() {
            let asset = config.asset(*cue);
            match HtmlAudioElement::new_with_src(&asset.src) {
                Ok(player) => {
                    player.set_preload("auto");
                    player.set_volume(asset.volume);
                    players.push((*cue, player));
                }
                Err(e) => log::warn!("No audio element for cue {}: {:?}", cue.label(), e),
            }
        }
        Self { players }
    }

    pub fn loaded(&self) -> usize {
        self.players.len()
    }
}

impl SoundPort for HtmlAudioCues {
    fn play(&self, cue: SoundCue) -> Result<(), SoundError> {
        let player = self
            .players
            .iter()
            .find(|(c, _)| *c == cue)
            .map(|(_, p)| p)
            .ok_or(SoundError::Unavailable)?;

        player.set_current_time(0.0);
        let promise = player
            .play()
            .map_err(|e| SoundError::Playback(format!("{:?}", e)))?;

        // Autoplay rejections arrive asynchronously and are not actionable.
        let label = cue.label().to_string();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::trace!("Cue {} rejected: {:?}", label, e);
            }
        });
        Ok(())
    }
}
