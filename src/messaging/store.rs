use crate::catalog::Message;
use std::collections::HashMap;

/// Read-only message history keyed by contact id.
#[derive(Debug, Default)]
pub struct MessageStore {
    threads: HashMap<String, Vec<Message>>,
}

impl MessageStore {
    pub fn new(threads: HashMap<String, Vec<Message>>) -> Self {
        Self { threads }
    }

    /// Messages exchanged with `contact_id`, oldest first. Empty if the
    /// contact has no thread.
    pub fn history(&self, contact_id: &str) -> &[Message] {
        self.threads
            .get(contact_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn unread_in(&self, contact_id: &str) -> usize {
        self.history(contact_id).iter().filter(|m| !m.read).count()
    }
}
