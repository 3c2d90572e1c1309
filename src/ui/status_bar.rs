use crate::app::state::*;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let mut parts: Vec<Span> = Vec::new();

    let text_style = match state.status.as_ref().map(|s| s.kind) {
        Some(StatusKind::Error) => palette.status_bar().fg(palette.danger),
        Some(StatusKind::Info) => palette.status_bar().fg(palette.accent),
        None => palette.status_bar(),
    };
    parts.push(Span::styled(format!(" {} ", state.status_line()), text_style));

    let hints = match (state.view, state.focus) {
        (View::Messages, FocusPanel::Contacts) => "↑↓ Move  Enter Open  Tab Compose  F5 Theme",
        (View::Messages, FocusPanel::Composer) => "Enter Send  Esc Contacts  F5 Theme",
        (View::Assessment, _) => "F1 Messages  F5 Theme  Ctrl+Q Quit",
    };

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.chars().count()).sum();
    let remaining = (area.width as usize).saturating_sub(used + hints.chars().count() + 2);
    parts.push(Span::styled(" ".repeat(remaining), palette.status_bar()));
    parts.push(Span::styled(
        format!(" {} ", hints),
        palette.status_bar().fg(palette.text_secondary),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
