use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::assessment::{WizardEffect, WizardEvent, WizardStep};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::AssessmentFinished {
            request_id,
            outcome,
        } => {
            state.dirty = true;
            let effects = match state
                .wizard
                .handle(WizardEvent::Completed { request_id, outcome })
            {
                Ok(effects) => effects,
                Err(e) => {
                    tracing::warn!(error = %e, "completion rejected by wizard");
                    return vec![];
                }
            };
            if state.wizard.result().is_some() && state.view != View::Assessment {
                state.set_status("Assessment ready: press F2 to view");
            }
            apply_wizard_effects(state, effects)
        }
        AppEvent::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            state.expire_status();
            // Keep the loading spinner moving.
            if state.wizard.is_submitting() && state.view == View::Assessment {
                state.dirty = true;
            }
            vec![]
        }
    }
}

fn apply_wizard_effects(state: &mut AppState, effects: Vec<WizardEffect>) -> Vec<Action> {
    let mut actions = Vec::new();
    for effect in effects {
        match effect {
            WizardEffect::StartAssessment {
                request_id,
                symptoms,
            } => actions.push(Action::StartAssessment {
                request_id,
                symptoms,
            }),
            WizardEffect::ReportFailure(err) => {
                state.set_error(format!("Assessment failed: {}", err));
            }
        }
    }
    actions
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return vec![Action::Quit];
    }

    match key.code {
        KeyCode::F(1) => {
            state.switch_view(View::Messages);
            return vec![];
        }
        KeyCode::F(2) => {
            state.switch_view(View::Assessment);
            return vec![];
        }
        KeyCode::F(5) => return toggle_theme(state),
        _ => {}
    }

    match state.view {
        View::Messages => match state.focus {
            FocusPanel::Contacts => handle_contacts_key(state, key),
            FocusPanel::Composer => handle_composer_key(state, key),
        },
        View::Assessment => handle_wizard_key(state, key),
    }
}

fn toggle_theme(state: &mut AppState) -> Vec<Action> {
    let mode = state.theme.toggle();
    state.config.ui.theme = Some(mode);
    state.set_status(format!("Theme: {}", mode.label()));
    tracing::info!(theme = mode.label(), "theme toggled");
    vec![Action::SaveConfig]
}

fn handle_contacts_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up => state.directory.move_up(),
        KeyCode::Down => state.directory.move_down(),
        KeyCode::Enter => {
            if let Some(id) = state.select_highlighted_contact() {
                tracing::debug!(contact = %id, "contact selected");
                state.focus = FocusPanel::Composer;
            }
        }
        KeyCode::Tab => state.cycle_focus(),
        KeyCode::Esc => state.directory.set_filter_text(""),
        KeyCode::Backspace => state.directory.pop_filter_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.directory.push_filter_char(c)
        }
        _ => {}
    }
    vec![]
}

fn handle_composer_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => send_draft(state),
        KeyCode::Tab | KeyCode::Esc => state.cycle_focus(),
        _ => edit_text(&mut state.draft, key),
    }
    vec![]
}

/// Clears the draft. There is no transport, so nothing is appended to the
/// thread and nobody is notified.
fn send_draft(state: &mut AppState) {
    let Some(text) = state.draft.send() else {
        return;
    };
    let recipient = state
        .directory
        .selected()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "nobody".to_string());
    tracing::info!(to = %recipient, chars = text.chars().count(), "draft discarded, no transport");
    state.set_status(format!("Message to {} not delivered: messaging is offline", recipient));
}

fn edit_text(draft: &mut crate::messaging::Draft, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                draft.delete_word_back();
            } else {
                draft.delete_back();
            }
        }
        KeyCode::Delete => draft.delete_forward(),
        KeyCode::Left => draft.move_left(),
        KeyCode::Right => draft.move_right(),
        KeyCode::Home => draft.move_home(),
        KeyCode::End => draft.move_end(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => draft.move_home(),
                    'e' => draft.move_end(),
                    'w' => draft.delete_word_back(),
                    'u' => draft.clear(),
                    _ => {}
                }
            } else {
                draft.insert_char(c);
            }
        }
        _ => {}
    }
}

fn handle_wizard_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let outcome = match (state.wizard.step(), key.code) {
        (WizardStep::Select, KeyCode::Up) => {
            state.symptom_cursor_up();
            return vec![];
        }
        (WizardStep::Select, KeyCode::Down) => {
            state.symptom_cursor_down();
            return vec![];
        }
        (WizardStep::Select, KeyCode::Char(' ')) => {
            let Some(id) = state.symptom_under_cursor().map(|s| s.id.clone()) else {
                return vec![];
            };
            state.wizard.toggle_symptom(&id).map(|_| vec![])
        }
        (WizardStep::Select, KeyCode::Enter) => state.wizard.handle(WizardEvent::Continue),
        (WizardStep::Details, KeyCode::Esc) => state.wizard.handle(WizardEvent::Back),
        (WizardStep::Details, KeyCode::Enter) => state.wizard.submit(),
        (WizardStep::Details, code) => {
            if let Some(details) = state.wizard.details_mut() {
                match code {
                    KeyCode::Up => details.duration = details.duration.prev(),
                    KeyCode::Down => details.duration = details.duration.next(),
                    _ => edit_text(&mut details.notes, key),
                }
            }
            return vec![];
        }
        (WizardStep::Result(_), KeyCode::Enter | KeyCode::Char('n')) => {
            let restarted = state.wizard.handle(WizardEvent::Restart);
            if restarted.is_ok() {
                state.symptom_cursor = 0;
            }
            restarted
        }
        _ => return vec![],
    };

    match outcome {
        Ok(effects) => apply_wizard_effects(state, effects),
        Err(e) => {
            state.set_error(e.to_string());
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::assessment::engine::fixed_result;
    use crate::catalog::Role;
    use crate::config::ThemeMode;

    fn press(state: &mut AppState, code: KeyCode) -> Vec<Action> {
        handle_event(
            state,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut state = test_state(Role::Patient);
        let actions = handle_event(
            &mut state,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert_eq!(actions, vec![Action::Quit]);
    }

    #[test]
    fn test_filter_select_and_send() {
        let mut state = test_state(Role::Patient);
        type_text(&mut state, "santos");
        let visible: Vec<String> = state
            .directory
            .visible_contacts()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(visible, vec!["Dr. Maria Santos"]);

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.directory.selected_id(), Some("doc2"));
        assert_eq!(state.focus, FocusPanel::Composer);
        assert!(state.messages.history("doc2").is_empty());

        type_text(&mut state, "Is the rash contagious?");
        press(&mut state, KeyCode::Enter);
        assert!(state.draft.is_empty());
        assert!(state.messages.history("doc2").is_empty());
        assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[test]
    fn test_empty_send_is_noop() {
        let mut state = test_state(Role::Patient);
        state.focus = FocusPanel::Composer;
        press(&mut state, KeyCode::Enter);
        assert!(state.draft.is_empty());
        assert!(state.status.is_none());
    }

    #[test]
    fn test_select_doc3_shows_history() {
        let mut state = test_state(Role::Patient);
        state.directory.select_contact("doc3").unwrap();
        let history = state.messages.history("doc3");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].text, "Your ECG results came back normal.");
    }

    #[test]
    fn test_wizard_keys_full_cycle() {
        let mut state = test_state(Role::Patient);
        press(&mut state, KeyCode::F(2));
        assert_eq!(state.view, View::Assessment);

        // Continue with nothing selected is refused.
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.wizard.step(), &WizardStep::Select);
        assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));

        // Headache is the first row.
        press(&mut state, KeyCode::Char(' '));
        assert!(state.wizard.selected().contains("headache"));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.wizard.step(), &WizardStep::Details);

        press(&mut state, KeyCode::Down);
        type_text(&mut state, "since monday");
        assert_eq!(state.wizard.details().notes.text, "since monday");

        let actions = press(&mut state, KeyCode::Enter);
        let request_id = match actions.as_slice() {
            [Action::StartAssessment { request_id, symptoms }] => {
                assert!(symptoms.contains("headache"));
                *request_id
            }
            other => panic!("expected StartAssessment, got {:?}", other),
        };
        // Keys are ignored while waiting.
        assert!(press(&mut state, KeyCode::Enter).is_empty());

        handle_event(
            &mut state,
            AppEvent::AssessmentFinished {
                request_id,
                outcome: Ok(fixed_result()),
            },
        );
        assert_eq!(state.wizard.result(), Some(&fixed_result()));

        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.wizard.step(), &WizardStep::Select);
        assert!(state.wizard.selected().is_empty());
        assert_eq!(state.symptom_cursor, 0);
    }

    #[test]
    fn test_result_while_in_messages_sets_status() {
        let mut state = test_state(Role::Patient);
        state.wizard.toggle_symptom("fever").unwrap();
        state.wizard.handle(WizardEvent::Continue).unwrap();
        let request_id = match state.wizard.submit().unwrap().as_slice() {
            [WizardEffect::StartAssessment { request_id, .. }] => *request_id,
            other => panic!("unexpected effects {:?}", other),
        };
        handle_event(
            &mut state,
            AppEvent::AssessmentFinished {
                request_id,
                outcome: Ok(fixed_result()),
            },
        );
        assert!(state.status_line().contains("F2"));
    }

    #[test]
    fn test_theme_toggle_requests_save() {
        let mut state = test_state(Role::Patient);
        let actions = press(&mut state, KeyCode::F(5));
        assert_eq!(actions, vec![Action::SaveConfig]);
        assert_eq!(state.config.ui.theme, Some(ThemeMode::Light));
        assert_eq!(state.theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_tab_switches_focus() {
        let mut state = test_state(Role::Doctor);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, FocusPanel::Composer);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.focus, FocusPanel::Contacts);
    }
}
