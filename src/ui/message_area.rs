use crate::app::state::*;
use crate::ui::badges::attachment_badge;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let (border_style, border_type, bg) = palette.panel(false);

    let block = Block::default()
        .title(" Messages ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(contact) = state.directory.selected() else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Pick a contact on the left and press Enter.",
                palette.secondary(),
            )),
        ]);
        frame.render_widget(hint, inner);
        return;
    };

    let history = state.messages.history(&contact.id);
    let mut lines: Vec<Line> = Vec::new();

    if history.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  No messages with {} yet.", contact.name),
            palette.muted(),
        )));
    }

    for msg in history {
        let is_self = msg.sender_id == state.profile.id;
        let sender_style = if is_self {
            Style::default().fg(palette.success).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        };

        let mut header = vec![
            Span::styled(format!(" {} ", state.format_time(&msg.timestamp)), palette.muted()),
            Span::styled(state.sender_name(&msg.sender_id), sender_style),
        ];
        if !msg.read && !is_self {
            header.push(Span::styled(" • new", Style::default().fg(palette.warning)));
        }
        lines.push(Line::from(header));
        lines.push(Line::from(Span::styled(format!("   {}", msg.text), palette.text())));

        if let Some(ref attachment) = msg.attachment {
            let badge = attachment_badge(attachment.kind);
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(
                    format!("{} {} ", badge.glyph, badge.label),
                    Style::default().fg(palette.tone(badge.tone)),
                ),
                Span::styled(attachment.filename.as_str(), palette.secondary()),
            ]));
        }
        lines.push(Line::from(""));
    }

    // Pin the newest messages to the bottom.
    let overflow = lines.len().saturating_sub(inner.height as usize);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((overflow as u16, 0));
    frame.render_widget(paragraph, inner);
}
