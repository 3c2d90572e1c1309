use crate::app::state::AppState;
use crate::assessment::{AssessmentResult, Severity, WizardStep};
use crate::ui::badges::severity_badge;
use crate::ui::theme::Palette;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let (border_style, border_type, bg) = palette.panel(true);

    let (step_no, step_title) = match state.wizard.step() {
        WizardStep::Select => (1, "Select your symptoms"),
        WizardStep::Details => (2, "Tell us more"),
        WizardStep::Submitting { .. } | WizardStep::Result(_) => (3, "Results"),
    };

    let block = Block::default()
        .title(format!(" Symptom checker · Step {} of 3 · {} ", step_no, step_title))
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (lines, focus_line) = match state.wizard.step() {
        WizardStep::Select => select_lines(state, &palette),
        WizardStep::Details => (details_lines(state, &palette), 0),
        WizardStep::Submitting { .. } => (submitting_lines(state, &palette), 0),
        WizardStep::Result(result) => (result_lines(result, &palette), 0),
    };

    // The symptom list scrolls by cursor row, so it must not wrap.
    let paragraph = match state.wizard.step() {
        WizardStep::Select => Paragraph::new(lines)
            .scroll((scroll_offset(focus_line, inner.height as usize) as u16, 0)),
        _ => Paragraph::new(lines).wrap(Wrap { trim: false }),
    };
    frame.render_widget(paragraph, inner);
}

/// First row to show so that `focus_line` is visible in `height` rows.
fn scroll_offset(focus_line: usize, height: usize) -> usize {
    if height == 0 || focus_line < height {
        0
    } else {
        focus_line + 1 - height
    }
}

fn hint_line<'a>(palette: &Palette, hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(*key, palette.key_hint()));
        spans.push(Span::styled(format!(" {}  ", label), palette.secondary()));
    }
    Line::from(spans)
}

/// Lines for the symptom list plus the index of the line under the cursor.
fn select_lines<'a>(state: &'a AppState, palette: &Palette) -> (Vec<Line<'a>>, usize) {
    let selected = state.wizard.selected();
    let mut lines = vec![
        hint_line(palette, &[("↑↓", "Move"), ("Space", "Toggle"), ("Enter", "Continue")]),
        Line::from(""),
    ];
    let mut focus_line = 0;
    let mut current_area = None;

    for (i, (area, symptom)) in state.symptom_rows().into_iter().enumerate() {
        if current_area != Some(area.id.as_str()) {
            current_area = Some(area.id.as_str());
            lines.push(Line::from(Span::styled(format!(" {}", area.name), palette.title())));
        }
        let checked = selected.contains(&symptom.id);
        let is_cursor = i == state.symptom_cursor;
        if is_cursor {
            focus_line = lines.len();
        }
        let style = if is_cursor {
            palette.selected()
        } else if checked {
            palette.text()
        } else {
            palette.secondary()
        };
        lines.push(Line::from(vec![
            Span::styled(if is_cursor { " › " } else { "   " }, palette.key_hint()),
            Span::styled(
                if checked { "[x] " } else { "[ ] " },
                if checked { Style::default().fg(palette.success) } else { palette.muted() },
            ),
            Span::styled(symptom.name.as_str(), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {} selected", selected.len()),
        if state.wizard.can_continue() { palette.text() } else { palette.muted() },
    )));
    (lines, focus_line)
}

fn details_lines<'a>(state: &'a AppState, palette: &Palette) -> Vec<Line<'a>> {
    let details = state.wizard.details();
    vec![
        hint_line(
            palette,
            &[("↑↓", "Duration"), ("Enter", "Submit"), ("Esc", "Back")],
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Symptoms: ", palette.title()),
            Span::styled(state.selected_symptom_names().join(", "), palette.text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" How long have you had them? ", palette.title()),
            Span::styled("◀ ", palette.key_hint()),
            Span::styled(details.duration.label(), palette.selected()),
            Span::styled(" ▶", palette.key_hint()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Anything else we should know?", palette.title())),
        Line::from(vec![
            Span::styled(" ❯ ", palette.key_hint()),
            if details.notes.is_empty() {
                Span::styled("type notes here", palette.muted())
            } else {
                Span::styled(details.notes.text.as_str(), palette.text())
            },
            Span::styled("█", palette.key_hint()),
        ]),
    ]
}

fn submitting_lines<'a>(state: &AppState, palette: &Palette) -> Vec<Line<'a>> {
    let frame = SPINNER[(state.tick_count as usize / 2) % SPINNER.len()];
    vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", frame), palette.key_hint()),
            Span::styled("Analyzing your symptoms...", palette.text()),
        ]),
    ]
}

fn probability_bar(probability: f32) -> String {
    let filled = ((probability.clamp(0.0, 1.0) * BAR_WIDTH as f32).round()) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn result_lines<'a>(result: &'a AssessmentResult, palette: &Palette) -> Vec<Line<'a>> {
    let urgency = severity_badge(result.urgency);
    let mut lines = vec![
        hint_line(palette, &[("Enter", "New assessment")]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Urgency: ", palette.title()),
            Span::styled(
                format!("{} {}", urgency.glyph, urgency.label),
                Style::default()
                    .fg(palette.tone(urgency.tone))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Possible conditions", palette.title())),
    ];

    for condition in &result.possible_conditions {
        let badge = severity_badge(condition.severity);
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<20}", condition.name), palette.text()),
            Span::styled(probability_bar(condition.probability), Style::default().fg(palette.accent)),
            Span::styled(
                format!(" {:>3.0}% ", condition.probability * 100.0),
                palette.secondary(),
            ),
            Span::styled(
                format!("{} {}", badge.glyph, badge.label),
                Style::default().fg(palette.tone(badge.tone)),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", condition.description),
            palette.secondary(),
        )));
        for rec in &condition.recommendations {
            lines.push(Line::from(Span::styled(format!("    · {}", rec), palette.muted())));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Recommendations", palette.title())));
    for rec in &result.recommendations {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(palette.success)),
            Span::styled(rec.as_str(), palette.text()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(severity_legend(palette));
    lines.push(Line::from(Span::styled(
        " This is not a diagnosis. Contact a doctor if you are worried.",
        palette.muted().add_modifier(Modifier::ITALIC),
    )));
    lines
}

fn severity_legend<'a>(palette: &Palette) -> Line<'a> {
    let mut spans = vec![Span::styled(" Severity: ", palette.muted())];
    for severity in Severity::ALL {
        let badge = severity_badge(severity);
        spans.push(Span::styled(
            format!("{} {}  ", badge.glyph, badge.label),
            Style::default().fg(palette.tone(badge.tone)),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::catalog::Role;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(12, 5), 8);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    #[test]
    fn test_cursor_row_visible_in_narrow_terminal() {
        let mut state = test_state(Role::Patient);
        for _ in 0..state.symptom_rows().len() {
            state.symptom_cursor_down();
        }
        let screen = draw(&state, 16, 8);
        assert!(screen.contains('›'), "cursor row scrolled off screen");
    }

    #[test]
    fn test_result_screen_shows_severity_legend() {
        let mut state = test_state(Role::Patient);
        state.wizard.toggle_symptom("fever").unwrap();
        state
            .wizard
            .handle(crate::assessment::WizardEvent::Continue)
            .unwrap();
        state.wizard.submit().unwrap();
        state
            .wizard
            .handle(crate::assessment::WizardEvent::Completed {
                request_id: 1,
                outcome: Ok(crate::assessment::engine::fixed_result()),
            })
            .unwrap();
        let screen = draw(&state, 120, 60);
        assert!(screen.contains("High"));
        assert!(screen.contains("Medium"));
    }

    #[test]
    fn test_probability_bar() {
        assert_eq!(probability_bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(probability_bar(1.0), "█".repeat(BAR_WIDTH));
        assert_eq!(probability_bar(0.85).chars().filter(|c| *c == '█').count(), 17);
        assert_eq!(probability_bar(1.5).chars().count(), BAR_WIDTH);
    }
}
