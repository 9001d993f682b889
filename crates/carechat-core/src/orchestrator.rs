//! Conversation orchestrator. One send cycle:
//! 1. Append the user message and raise the composing flag
//! 2. Ask the completion service (the only await point)
//! 3. On failure, answer locally with the fallback responder
//! 4. Append exactly one assistant message and play the matching cue
//! 5. Lower the composing flag
//!
//! State lives behind `Rc<RefCell<..>>` and no borrow is held across the
//! await, so the page can read messages and the flag while a reply is
//! pending.

use std::cell::RefCell;
use std::rc::Rc;

use carechat_types::{
    ChatError, Result,
    config::{ChatConfig, QuickReply},
    event::{ChatEvent, ReplySource},
    message::{Message, Sender},
    sound::SoundCue,
};

use crate::completion::NO_ANSWER_PLACEHOLDER;
use crate::event_bus::EventBus;
use crate::fallback::FallbackResponder;
use crate::ports::CompletionPort;
use crate::sounds::NotificationSounds;
use crate::store::ConversationStore;

/// Assistant notice shown by the visualisation shortcut
pub const VISUALISATION_NOTICE: &str = "In the full app, this would open an AR visualisation \
showing what happens in the heart during a possible heart attack.";

/// Mutable conversation state, owned by the orchestrator
#[derive(Debug)]
pub struct ConversationState {
    store: ConversationStore,
    is_composing: bool,
    draft: String,
}

impl ConversationState {
    pub fn new(greeting: &str) -> Self {
        Self {
            store: ConversationStore::seeded(greeting),
            is_composing: false,
            draft: String::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.store.all()
    }

    pub fn is_composing(&self) -> bool {
        self.is_composing
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply,
}

/// The assistant message that closed a turn
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub message: Message,
    pub source: ReplySource,
}

pub struct Orchestrator {
    state: Rc<RefCell<ConversationState>>,
    completion: Rc<dyn CompletionPort>,
    fallback: FallbackResponder,
    sounds: NotificationSounds,
    quick_replies: Vec<QuickReply>,
    event_bus: EventBus,
}

impl Orchestrator {
    pub fn new(
        config: &ChatConfig,
        completion: Rc<dyn CompletionPort>,
        sounds: NotificationSounds,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(ConversationState::new(&config.greeting))),
            completion,
            fallback: FallbackResponder::new(),
            sounds,
            quick_replies: config.quick_replies.clone(),
            event_bus,
        }
    }

    /// Run one full turn for `text`.
    ///
    /// Empty or whitespace-only text is rejected with no state change, as
    /// is any send while a previous reply is still pending. Remote failures
    /// never surface here: they become a fallback reply.
    pub async fn send(&self, text: &str) -> Result<Reply> {
        let (user, guard) = self.begin_turn(text)?;
        Ok(self.complete_turn(user, guard).await)
    }

    /// Send the trimmed draft. The draft is cleared only once the user
    /// message has been accepted.
    pub async fn submit_draft(&self) -> Result<Reply> {
        let text = self.state.borrow().draft.trim().to_string();
        if text.is_empty() {
            log::debug!("Ignoring empty draft");
            return Err(ChatError::EmptyInput);
        }
        if self.is_composing() {
            return Err(ChatError::Busy);
        }

        self.sounds.play(SoundCue::Interaction);
        let (user, guard) = self.begin_turn(&text)?;
        self.state.borrow_mut().draft.clear();
        Ok(self.complete_turn(user, guard).await)
    }

    /// Send the utterance of the quick reply at `index`.
    pub async fn quick_reply(&self, index: usize) -> Result<Reply> {
        let utterance = self
            .quick_replies
            .get(index)
            .map(|q| q.utterance.clone())
            .ok_or(ChatError::UnknownQuickReply(index))?;
        if self.is_composing() {
            return Err(ChatError::Busy);
        }

        self.sounds.play(SoundCue::Interaction);
        self.send(&utterance).await
    }

    /// Append the scripted visualisation notice without a remote call.
    pub fn show_visualisation(&self) -> Result<Message> {
        if self.is_composing() {
            return Err(ChatError::Busy);
        }

        self.sounds.play(SoundCue::Interaction);
        let message = self.append(VISUALISATION_NOTICE, Sender::Assistant);
        self.event_bus.emit(ChatEvent::ReplyDelivered {
            message_id: message.id,
            source: ReplySource::Scripted,
        });
        self.sounds.play(SoundCue::ReplySuccess);
        Ok(message)
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn set_draft(&self, text: impl Into<String>) {
        self.state.borrow_mut().draft = text.into();
    }

    pub fn draft(&self) -> String {
        self.state.borrow().draft.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages().to_vec()
    }

    pub fn message(&self, id: u64) -> Option<Message> {
        self.state.borrow().store.get(id).cloned()
    }

    pub fn message_count(&self) -> usize {
        self.state.borrow().store.len()
    }

    pub fn is_composing(&self) -> bool {
        self.state.borrow().is_composing
    }

    pub fn state(&self) -> TurnState {
        if self.is_composing() {
            TurnState::AwaitingReply
        } else {
            TurnState::Idle
        }
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }

    pub fn sounds(&self) -> &NotificationSounds {
        &self.sounds
    }

    pub fn events(&self) -> &EventBus {
        &self.event_bus
    }

    // ─── Turn internals ──────────────────────────────────────

    fn begin_turn(&self, text: &str) -> Result<(Message, ComposingGuard)> {
        if text.trim().is_empty() {
            log::debug!("Ignoring empty input");
            return Err(ChatError::EmptyInput);
        }

        let message = {
            let mut state = self.state.borrow_mut();
            if state.is_composing {
                log::debug!("Ignoring send while a reply is pending");
                return Err(ChatError::Busy);
            }
            state.is_composing = true;
            state.store.append(text, Sender::User)
        };

        self.event_bus.emit(ChatEvent::MessageAppended {
            message: message.clone(),
        });
        self.event_bus
            .emit(ChatEvent::ComposingChanged { composing: true });

        let guard = ComposingGuard {
            state: self.state.clone(),
            event_bus: self.event_bus.clone(),
        };
        Ok((message, guard))
    }

    async fn complete_turn(&self, user: Message, guard: ComposingGuard) -> Reply {
        let (text, source, cue) = match self.completion.complete(&user.text).await {
            Ok(text) if text.trim().is_empty() => (
                NO_ANSWER_PLACEHOLDER.to_string(),
                ReplySource::Remote,
                SoundCue::ReplySuccess,
            ),
            Ok(text) => (text, ReplySource::Remote, SoundCue::ReplySuccess),
            Err(e) => {
                log::warn!("Completion failed ({}), answering with fallback", e);
                (
                    self.fallback.reply(&user.text).to_string(),
                    ReplySource::Fallback,
                    SoundCue::ReplyFailure,
                )
            }
        };

        let message = self.append(text, Sender::Assistant);
        self.event_bus.emit(ChatEvent::ReplyDelivered {
            message_id: message.id,
            source,
        });
        self.sounds.play(cue);

        drop(guard);
        Reply { message, source }
    }

    fn append(&self, text: impl Into<String>, sender: Sender) -> Message {
        let message = self.state.borrow_mut().store.append(text, sender);
        self.event_bus.emit(ChatEvent::MessageAppended {
            message: message.clone(),
        });
        message
    }
}

/// Lowers the composing flag when dropped: on normal completion, on an
/// unwinding panic, and when the in-flight future is dropped.
struct ComposingGuard {
    state: Rc<RefCell<ConversationState>>,
    event_bus: EventBus,
}

impl Drop for ComposingGuard {
    fn drop(&mut self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            log::error!("Conversation state borrowed while ending a turn");
            return;
        };
        if state.is_composing {
            state.is_composing = false;
            drop(state);
            self.event_bus
                .emit(ChatEvent::ComposingChanged { composing: false });
        }
    }
}
