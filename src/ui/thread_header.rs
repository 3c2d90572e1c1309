use crate::app::state::AppState;
use crate::ui::badges::status_badge;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let bg = Style::default().bg(palette.elevated);

    let line = match state.directory.selected() {
        Some(contact) => {
            let badge = status_badge(contact.status);
            let mut spans = vec![
                Span::styled(format!(" {} ", badge.glyph), Style::default().fg(palette.tone(badge.tone))),
                Span::styled(contact.name.as_str(), palette.title()),
                Span::styled(" │ ", palette.muted()),
                Span::styled(contact.specialty.as_str(), palette.secondary()),
            ];
            let unread = state.messages.unread_in(&contact.id);
            if unread > 0 {
                spans.push(Span::styled(
                    format!(" │ {} unread", unread),
                    Style::default().fg(palette.warning),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            " No conversation selected",
            palette.muted().add_modifier(Modifier::ITALIC),
        )),
    };

    frame.render_widget(Paragraph::new(line).style(bg), area);
}
