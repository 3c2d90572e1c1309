use crate::assessment::Wizard;
use crate::catalog::{BodyArea, Catalog, Role, Symptom, UserProfile};
use crate::config::AppConfig;
use crate::messaging::{ContactDirectory, Draft, MessageStore};
use crate::ui::theme::ThemeService;
use chrono::{DateTime, Local, Utc};
use std::collections::HashMap;

/// Ticks a status message stays visible (50ms per tick).
const STATUS_TTL_TICKS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Messages,
    Assessment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Contacts,
    Composer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: u64,
}

pub struct AppState {
    pub config: AppConfig,
    pub role: Role,
    pub profile: UserProfile,
    pub catalog: Catalog,
    pub directory: ContactDirectory,
    pub messages: MessageStore,
    pub draft: Draft,
    /// Unsent drafts of contacts other than the selected one.
    parked_drafts: HashMap<String, String>,
    pub wizard: Wizard,
    /// Row under the keyboard cursor in the symptom list.
    pub symptom_cursor: usize,
    pub theme: ThemeService,
    pub view: View,
    pub focus: FocusPanel,
    pub status: Option<StatusMessage>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog, theme: ThemeService) -> Self {
        let role = config.role;
        let profile = catalog.profile_for(role).clone();
        let directory = ContactDirectory::new(catalog.contacts_for(role).to_vec());
        let messages = MessageStore::new(catalog.threads.clone());
        Self {
            config,
            role,
            profile,
            catalog,
            directory,
            messages,
            draft: Draft::new(),
            parked_drafts: HashMap::new(),
            wizard: Wizard::new(),
            symptom_cursor: 0,
            theme,
            view: View::Messages,
            focus: FocusPanel::Contacts,
            status: None,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.push_status(text.into(), StatusKind::Info);
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.push_status(text.into(), StatusKind::Error);
    }

    fn push_status(&mut self, text: String, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text,
            kind,
            expires_at: self.tick_count + STATUS_TTL_TICKS,
        });
        self.dirty = true;
    }

    pub fn expire_status(&mut self) {
        if let Some(ref status) = self.status {
            if self.tick_count >= status.expires_at {
                self.status = None;
                self.dirty = true;
            }
        }
    }

    pub fn switch_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.dirty = true;
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Contacts => FocusPanel::Composer,
            FocusPanel::Composer => FocusPanel::Contacts,
        };
        self.dirty = true;
    }

    /// Select the highlighted contact. The draft follows the contact: the
    /// current one is parked under the previous contact and any draft left
    /// for the new contact is restored.
    pub fn select_highlighted_contact(&mut self) -> Option<String> {
        let previous = self.directory.selected_id().map(str::to_string);
        let id = self.directory.select_highlighted()?.id.clone();
        if let Some(previous) = previous.filter(|p| *p != id) {
            if self.draft.is_empty() {
                self.parked_drafts.remove(&previous);
            } else {
                self.parked_drafts
                    .insert(previous, std::mem::take(&mut self.draft.text));
            }
            let restored = self.parked_drafts.remove(&id).unwrap_or_default();
            self.draft.compose(&restored);
        }
        self.dirty = true;
        Some(id)
    }

    pub fn symptom_rows(&self) -> Vec<(&BodyArea, &Symptom)> {
        self.catalog.symptoms_in_order()
    }

    pub fn symptom_under_cursor(&self) -> Option<&Symptom> {
        self.symptom_rows()
            .get(self.symptom_cursor)
            .map(|(_, symptom)| *symptom)
    }

    pub fn symptom_cursor_up(&mut self) {
        self.symptom_cursor = self.symptom_cursor.saturating_sub(1);
    }

    pub fn symptom_cursor_down(&mut self) {
        let len = self.symptom_rows().len();
        if self.symptom_cursor + 1 < len {
            self.symptom_cursor += 1;
        }
    }

    /// Names of the selected symptoms in catalog order.
    pub fn selected_symptom_names(&self) -> Vec<&str> {
        let selected = self.wizard.selected();
        self.symptom_rows()
            .into_iter()
            .filter(|(_, s)| selected.contains(&s.id))
            .map(|(_, s)| s.name.as_str())
            .collect()
    }

    pub fn format_time(&self, ts: &DateTime<Utc>) -> String {
        ts.with_timezone(&Local)
            .format(&self.config.ui.timestamp_format)
            .to_string()
    }

    /// Display name for a message sender in the active thread.
    pub fn sender_name(&self, sender_id: &str) -> String {
        if sender_id == self.profile.id {
            return "You".to_string();
        }
        self.directory
            .contacts()
            .iter()
            .find(|c| c.id == sender_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| sender_id.to_string())
    }

    pub fn status_line(&self) -> String {
        if let Some(ref status) = self.status {
            return status.text.clone();
        }
        match self.view {
            View::Messages => {
                let online = self
                    .directory
                    .contacts()
                    .iter()
                    .filter(|c| c.status == crate::catalog::ContactStatus::Online)
                    .count();
                format!(
                    "{} {}/{} online",
                    self.role.contacts_title(),
                    online,
                    self.directory.contacts().len()
                )
            }
            View::Assessment => format!(
                "Symptom checker: {} selected",
                self.wizard.selected().len()
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ThemeMode;

    pub(crate) fn test_state(role: Role) -> AppState {
        let config = AppConfig {
            role,
            ..AppConfig::default()
        };
        AppState::new(
            config,
            Catalog::builtin().unwrap(),
            ThemeService::new(ThemeMode::Dark),
        )
    }

    #[test]
    fn test_role_picks_contact_list() {
        let patient = test_state(Role::Patient);
        assert_eq!(patient.directory.contacts()[0].id, "doc1");
        assert_eq!(patient.profile.id, "patient");

        let doctor = test_state(Role::Doctor);
        assert_eq!(doctor.directory.contacts()[0].id, "pat1");
        assert_eq!(doctor.sender_name("doctor"), "You");
        assert_eq!(doctor.sender_name("pat1"), "Alex Morgan");
        assert_eq!(doctor.sender_name("stranger"), "stranger");
    }

    #[test]
    fn test_draft_follows_selected_contact() {
        let mut state = test_state(Role::Patient);
        assert_eq!(state.select_highlighted_contact().as_deref(), Some("doc1"));
        state.draft.compose("Can we move my appointment?");

        state.directory.move_down();
        assert_eq!(state.select_highlighted_contact().as_deref(), Some("doc2"));
        assert!(state.draft.is_empty());
        state.draft.compose("Photo attached");

        state.directory.move_up();
        state.select_highlighted_contact();
        assert_eq!(state.draft.text, "Can we move my appointment?");
        assert_eq!(state.draft.cursor, state.draft.text.len());

        state.draft.send();
        state.directory.move_down();
        state.select_highlighted_contact();
        assert_eq!(state.draft.text, "Photo attached");
        state.directory.move_up();
        state.select_highlighted_contact();
        assert!(state.draft.is_empty());
    }

    #[test]
    fn test_status_expires() {
        let mut state = test_state(Role::Patient);
        state.set_error("boom");
        assert_eq!(state.status_line(), "boom");
        state.tick_count += STATUS_TTL_TICKS - 1;
        state.expire_status();
        assert!(state.status.is_some());
        state.tick_count += 1;
        state.expire_status();
        assert!(state.status.is_none());
        assert_eq!(state.status_line(), "Doctors 2/4 online");
    }

    #[test]
    fn test_symptom_cursor_bounds() {
        let mut state = test_state(Role::Patient);
        state.symptom_cursor_up();
        assert_eq!(state.symptom_cursor, 0);
        assert_eq!(state.symptom_under_cursor().map(|s| s.id.as_str()), Some("headache"));
        for _ in 0..100 {
            state.symptom_cursor_down();
        }
        assert_eq!(state.symptom_cursor, state.symptom_rows().len() - 1);
    }

    #[test]
    fn test_selected_symptom_names_in_catalog_order() {
        let mut state = test_state(Role::Patient);
        state.wizard.toggle_symptom("fever").unwrap();
        state.wizard.toggle_symptom("headache").unwrap();
        assert_eq!(state.selected_symptom_names(), vec!["Headache", "Fever"]);
    }
}
