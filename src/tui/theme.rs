//! TUI theming support.
//!
//! The `Theme` struct is an immutable color palette constructed once at
//! startup and passed by reference into the rendering functions. It supports
//! dark and light palettes plus automatic detection from the terminal
//! environment.

use ratatui::style::Color;

use crate::model::ModuleStatus;

/// A collection of colors used for TUI components.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Headers, titles, selection highlights.
    pub primary: Color,
    /// Secondary accents.
    pub secondary: Color,
    /// In-process badges and warnings.
    pub warning: Color,
    /// Errors and the caveat block background.
    pub danger: Color,
    /// Secondary text, help lines, labels.
    pub subtle: Color,
    /// Main text.
    pub normal: Color,
    /// Text on colored badge backgrounds.
    pub inverted_fg: Color,
    /// Hyperlinks.
    pub url: Color,
    /// Active-status badge background.
    pub active: Color,
    /// Historical-status badge background.
    pub historical: Color,
    /// In-process-status badge background.
    pub in_process: Color,
    /// Algorithm tag background.
    pub algorithm_bg: Color,
    /// Caveat block background.
    pub caveat_bg: Color,
    /// Security level badge backgrounds, levels 1 through 4.
    pub levels: [Color; 4],
}

impl Theme {
    /// Dark theme (default), carrying the classic CMVP browser palette.
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(0x7d, 0x56, 0xf4),
            secondary: Color::Rgb(0x04, 0xb5, 0x75),
            warning: Color::Rgb(0xff, 0xcc, 0x00),
            danger: Color::Rgb(0xff, 0x5f, 0x56),
            subtle: Color::Rgb(0x62, 0x62, 0x62),
            normal: Color::Rgb(0xfa, 0xfa, 0xfa),
            inverted_fg: Color::Black,
            url: Color::Rgb(0x00, 0xaa, 0xff),
            active: Color::Rgb(0x04, 0xb5, 0x75),
            historical: Color::Rgb(0x62, 0x62, 0x62),
            in_process: Color::Rgb(0xff, 0xcc, 0x00),
            algorithm_bg: Color::Rgb(0x5b, 0x5f, 0xc7),
            caveat_bg: Color::Rgb(0xff, 0x6b, 0x6b),
            levels: [
                Color::Rgb(0x04, 0xb5, 0x75),
                Color::Rgb(0xff, 0xcc, 0x00),
                Color::Rgb(0xff, 0x95, 0x00),
                Color::Rgb(0xff, 0x5f, 0x56),
            ],
        }
    }

    /// High-contrast light theme.
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(0x5b, 0x2f, 0xd6),
            secondary: Color::Rgb(0x02, 0x7a, 0x4f),
            warning: Color::Rgb(0xb3, 0x8f, 0x00),
            danger: Color::Rgb(0xd6, 0x33, 0x2b),
            subtle: Color::Gray,
            normal: Color::Black,
            inverted_fg: Color::White,
            url: Color::Rgb(0x00, 0x66, 0xcc),
            active: Color::Rgb(0x02, 0x7a, 0x4f),
            historical: Color::Gray,
            in_process: Color::Rgb(0xb3, 0x8f, 0x00),
            algorithm_bg: Color::Rgb(0x44, 0x48, 0xa8),
            caveat_bg: Color::Rgb(0xd6, 0x33, 0x2b),
            levels: [
                Color::Rgb(0x02, 0x7a, 0x4f),
                Color::Rgb(0xb3, 0x8f, 0x00),
                Color::Rgb(0xcc, 0x6a, 0x00),
                Color::Rgb(0xd6, 0x33, 0x2b),
            ],
        }
    }

    /// Detect terminal theme or return the dark theme as default.
    pub fn auto() -> Self {
        if is_light_terminal() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Check if this is the light theme.
    pub fn is_light(&self) -> bool {
        self.normal == Color::Black
    }

    /// Badge background for a module status.
    pub fn status_color(&self, status: ModuleStatus) -> Color {
        match status {
            ModuleStatus::Active => self.active,
            ModuleStatus::Historical => self.historical,
            ModuleStatus::InProcess => self.in_process,
        }
    }

    /// Badge background for a security level (1-4); `None` when unrated.
    pub fn level_color(&self, level: u8) -> Option<Color> {
        match level {
            1..=4 => Some(self.levels[usize::from(level) - 1]),
            _ => None,
        }
    }
}

/// Simple heuristic to detect if the terminal is light-themed.
///
/// COLORFGBG is set by some terminals (e.g. rxvt, konsole) as "fg;bg",
/// where bg is typically a 0-15 color index.
fn is_light_terminal() -> bool {
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        let parts: Vec<&str> = colorfgbg.split(';').collect();
        if let Some(bg) = parts.last() {
            if let Ok(bg_num) = bg.parse::<u32>() {
                // 0=black, 7=gray, 15=white; 8 is usually dark gray
                return bg_num >= 7 && bg_num != 8;
            }
        }
    }
    false
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_is_default() {
        assert!(!Theme::default().is_light());
    }

    #[test]
    fn light_detected_by_normal_text_color() {
        assert!(Theme::light().is_light());
    }

    #[test]
    fn status_colors_distinct() {
        let theme = Theme::dark();
        assert_ne!(
            theme.status_color(ModuleStatus::Active),
            theme.status_color(ModuleStatus::Historical)
        );
        assert_ne!(
            theme.status_color(ModuleStatus::Active),
            theme.status_color(ModuleStatus::InProcess)
        );
    }

    #[test]
    fn level_color_bounds() {
        let theme = Theme::dark();
        assert!(theme.level_color(0).is_none());
        assert!(theme.level_color(1).is_some());
        assert!(theme.level_color(4).is_some());
        assert!(theme.level_color(5).is_none());
    }
}
