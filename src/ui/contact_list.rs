use crate::app::state::*;
use crate::ui::badges::status_badge;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let focused = state.view == View::Messages && state.focus == FocusPanel::Contacts;
    let (border_style, border_type, bg) = palette.panel(focused);

    let visible = state.directory.visible_contacts();
    let title = format!(
        " {} ({}/{}) ",
        state.role.contacts_title(),
        visible.len(),
        state.directory.contacts().len()
    );

    let block = Block::default()
        .title(title)
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    // Filter bar
    let filter = state.directory.filter();
    let filter_line = Line::from(vec![
        Span::styled(" ⌕ ", palette.key_hint()),
        if filter.is_empty() {
            Span::styled("type to filter", palette.muted())
        } else {
            Span::styled(filter, palette.text())
        },
    ]);
    frame.render_widget(
        Paragraph::new(filter_line),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let list_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    let name_width = (inner.width as usize).saturating_sub(9);

    let mut items: Vec<ListItem> = Vec::new();
    for (i, contact) in visible.iter().enumerate() {
        let badge = status_badge(contact.status);
        let is_selected = state.directory.selected_id() == Some(contact.id.as_str());
        let is_highlighted = focused && i == state.directory.highlighted;

        let name_style = if is_highlighted {
            palette.selected()
        } else if is_selected {
            palette.key_hint()
        } else {
            palette.text()
        };

        let mut first = vec![
            Span::styled(if is_selected { "›" } else { " " }, palette.key_hint()),
            Span::styled(
                format!("{} ", badge.glyph),
                Style::default().fg(palette.tone(badge.tone)),
            ),
            Span::styled(truncate(&contact.name, name_width), name_style),
        ];
        if contact.unread_count > 0 {
            first.push(Span::styled(
                format!(" {}", contact.unread_count),
                Style::default()
                    .fg(palette.bg)
                    .bg(palette.warning)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let second = Line::from(vec![
            Span::raw("   "),
            Span::styled(truncate(&contact.specialty, name_width), palette.secondary()),
        ]);
        let third = Line::from(Span::styled(
            format!("   {} · {}", badge.label, state.format_time(&contact.last_seen)),
            palette.muted(),
        ));

        items.push(ListItem::new(vec![Line::from(first), second, third]));
    }

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            " No contacts match filter.",
            palette.muted(),
        )));
    }

    frame.render_widget(List::new(items), list_area);
}

/// Cut `text` to at most `max` terminal columns, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max - 1 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dr. Maria Santos", 40), "Dr. Maria Santos");
        assert_eq!(truncate("Dermatologist", 5), "Derm…");
        assert_eq!(truncate("", 3), "");
        assert_eq!(truncate("Dermatologist", 0), "");
        assert_eq!(truncate("Dermatologist", 1), "…");
        assert_eq!(truncate("診療所の先生", 6), "診療…");
        assert!(truncate("診療所の先生", 6).width() <= 6);
    }
}
