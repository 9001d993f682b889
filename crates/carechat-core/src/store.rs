//! Append-only conversation log.

use carechat_types::message::{Message, Sender};

/// Ordered log of messages. Ids are 1-based and equal to the position.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `greeting` as its first assistant message
    pub fn seeded(greeting: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.append(greeting, Sender::Assistant);
        store
    }

    pub fn append(&mut self, text: impl Into<String>, sender: Sender) -> Message {
        let id = self.messages.len() as u64 + 1;
        let message = Message::new(id, sender, text);
        self.messages.push(message.clone());
        message
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: u64) -> Option<&Message> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
