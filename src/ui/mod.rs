mod badges;
mod contact_list;
mod input_box;
mod layout;
mod message_area;
mod status_bar;
pub mod theme;
mod thread_header;
mod wizard_view;

use crate::app::state::{AppState, View};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState) {
    let palette = state.theme.palette();
    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), frame.area());

    let app_layout = layout::compute_layout(frame.area());
    render_tab_bar(frame, app_layout.tab_bar, state);

    match state.view {
        View::Messages => {
            let messages_layout = layout::compute_messages_layout(app_layout.content);
            contact_list::render(frame, messages_layout.contact_list, state);
            thread_header::render(frame, messages_layout.thread_header, state);
            message_area::render(frame, messages_layout.message_area, state);
            input_box::render(frame, messages_layout.input_box, state);
        }
        View::Assessment => wizard_view::render(frame, app_layout.content, state),
    }

    status_bar::render(frame, app_layout.status_bar, state);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let tab = |key: &'static str, label: &'static str, active: bool| {
        let style = if active {
            palette.selected()
        } else {
            palette.secondary()
        };
        vec![
            Span::styled(format!(" {} ", key), palette.key_hint()),
            Span::styled(format!("{} ", label), style),
        ]
    };

    let mut spans = vec![Span::styled(" ✚ Telecare ", palette.title())];
    spans.extend(tab("F1", "Messages", state.view == View::Messages));
    spans.extend(tab("F2", "Symptom checker", state.view == View::Assessment));
    spans.push(Span::styled(
        format!("  {} ({})", state.profile.name, state.role.label()),
        palette.muted(),
    ));
    spans.push(Span::styled("  F5 ", palette.key_hint()));
    spans.push(Span::styled(
        format!("{} theme", state.theme.mode().label()),
        palette.secondary(),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.surface)),
        area,
    );
}
