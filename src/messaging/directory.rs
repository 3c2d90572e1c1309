//! Contact list with a free-text filter and a selected contact.

use crate::catalog::Contact;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("no contact with id '{0}'")]
    UnknownContact(String),
}

/// Contacts whose name or specialty contains `query`, ignoring case.
///
/// Source order is preserved and an empty query keeps every contact.
pub fn filter_contacts<'a, I>(contacts: I, query: &str) -> Vec<&'a Contact>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let needle = query.to_lowercase();
    contacts
        .into_iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.specialty.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
    filter: String,
    selected: Option<String>,
    /// Keyboard cursor into the visible list.
    pub highlighted: usize,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            filter: String::new(),
            selected: None,
            highlighted: 0,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter_text(&mut self, text: &str) {
        self.filter = text.to_string();
        self.clamp_highlight();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.clamp_highlight();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.clamp_highlight();
    }

    pub fn visible_contacts(&self) -> Vec<&Contact> {
        filter_contacts(&self.contacts, &self.filter)
    }

    pub fn select_contact(&mut self, id: &str) -> Result<&Contact, DirectoryError> {
        let contact = self
            .contacts
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DirectoryError::UnknownContact(id.to_string()))?;
        self.selected = Some(contact.id.clone());
        Ok(contact)
    }

    pub fn selected(&self) -> Option<&Contact> {
        let id = self.selected.as_deref()?;
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn highlighted_contact(&self) -> Option<&Contact> {
        self.visible_contacts().get(self.highlighted).copied()
    }

    /// Select whichever contact the keyboard cursor is on.
    pub fn select_highlighted(&mut self) -> Option<&Contact> {
        let id = self.highlighted_contact()?.id.clone();
        self.select_contact(&id).ok()
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.visible_contacts().len();
        if self.highlighted + 1 < len {
            self.highlighted += 1;
        }
    }

    fn clamp_highlight(&mut self) {
        let len = self.visible_contacts().len();
        self.highlighted = self.highlighted.min(len.saturating_sub(1));
    }
}
