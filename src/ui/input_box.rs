use crate::app::state::*;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let focused = state.focus == FocusPanel::Composer;
    let (border_style, border_type, bg) = palette.panel(focused);

    let title = match state.directory.selected() {
        Some(contact) => format!(" Message {} ", contact.name),
        None => " Message ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(if focused { palette.title() } else { palette.muted() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1))
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = &state.draft;

    if focused {
        // Prompt chevron + draft text
        let line = Line::from(vec![
            Span::styled("❯ ", palette.key_hint()),
            Span::styled(draft.text.as_str(), palette.text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        let prompt_offset = 2u16;
        let cursor_x = inner.x + prompt_offset + draft.cursor_width() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    } else if draft.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Tab to write a message", palette.muted())),
            inner,
        );
    } else {
        frame.render_widget(Paragraph::new(draft.text.as_str()).style(palette.text()), inner);
    }
}
