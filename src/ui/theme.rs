//! Light/dark palettes and the session theme service.

use crate::config::ThemeMode;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Semantic colour slot used by display descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Accent,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub elevated: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

const DARK: Palette = Palette {
    bg: Color::Rgb(22, 24, 30),
    surface: Color::Rgb(30, 33, 41),
    elevated: Color::Rgb(42, 46, 57),
    text: Color::Rgb(226, 230, 238),
    text_secondary: Color::Rgb(160, 168, 184),
    muted: Color::Rgb(100, 108, 124),
    border: Color::Rgb(62, 68, 82),
    border_focused: Color::Rgb(80, 200, 210),
    accent: Color::Rgb(80, 200, 210),
    success: Color::Rgb(90, 210, 130),
    warning: Color::Rgb(230, 180, 80),
    danger: Color::Rgb(235, 100, 100),
};

const LIGHT: Palette = Palette {
    bg: Color::Rgb(250, 250, 252),
    surface: Color::Rgb(241, 243, 247),
    elevated: Color::Rgb(226, 231, 240),
    text: Color::Rgb(28, 32, 40),
    text_secondary: Color::Rgb(72, 80, 96),
    muted: Color::Rgb(130, 138, 152),
    border: Color::Rgb(200, 205, 215),
    border_focused: Color::Rgb(0, 120, 140),
    accent: Color::Rgb(0, 120, 140),
    success: Color::Rgb(20, 140, 70),
    warning: Color::Rgb(176, 110, 0),
    danger: Color::Rgb(190, 40, 40),
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
            Tone::Accent => self.accent,
            Tone::Muted => self.muted,
        }
    }

    pub fn panel(&self, focused: bool) -> (Style, BorderType, Style) {
        if focused {
            (
                Style::default().fg(self.border_focused),
                BorderType::Thick,
                Style::default().bg(self.surface),
            )
        } else {
            (
                Style::default().fg(self.border),
                BorderType::Rounded,
                Style::default().bg(self.bg),
            )
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.elevated)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.elevated)
    }
}

/// Session-wide theme, injected into the app state.
#[derive(Debug, Clone, Copy)]
pub struct ThemeService {
    mode: ThemeMode,
}

impl ThemeService {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    /// Saved preference first, then whatever the terminal suggests.
    pub fn init(saved: Option<ThemeMode>) -> Self {
        Self::new(saved.unwrap_or_else(platform_default))
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.mode)
    }
}

pub fn platform_default() -> ThemeMode {
    mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`). Background colours
/// 7 and 15 are light; anything else, or no hint, means dark.
fn mode_from_colorfgbg(value: Option<&str>) -> ThemeMode {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7) | Some(15) => ThemeMode::Light,
        _ => ThemeMode::Dark,
    }
}
