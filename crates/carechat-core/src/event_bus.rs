//! Event feed from the engine to the page.
//!
//! Single-threaded (WASM constraint), interior mutability via RefCell.
//! The page polls it after each call. Notices are the only events the
//! page must surface to the user, so they can be taken on their own
//! without disturbing the rest of the feed.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use carechat_types::event::ChatEvent;

/// Oldest events are discarded beyond this many undrained entries.
pub const MAX_PENDING_EVENTS: usize = 512;

/// Shared event feed, cheap to clone.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        let mut queue = self.inner.borrow_mut();
        if queue.len() == MAX_PENDING_EVENTS {
            if let Some(dropped) = queue.pop_front() {
                log::trace!("Event feed full, dropping {:?}", dropped);
            }
        }
        queue.push_back(event);
    }

    /// Take every pending event in emission order.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Take only the pending `Notice` texts; other events stay queued.
    pub fn drain_notices(&self) -> Vec<String> {
        let mut queue = self.inner.borrow_mut();
        let mut notices = Vec::new();
        queue.retain(|event| match event {
            ChatEvent::Notice { text } => {
                notices.push(text.clone());
                false
            }
            _ => true,
        });
        notices
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
