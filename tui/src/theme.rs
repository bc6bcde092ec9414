//! Color palette and glyphs for the churn form.
//!
//! Every palette is derived from three base colors (background, accent, text)
//! so a custom theme only has to name those.

use ratatui::style::{Color, Modifier, Style};

use churn_config::{HexColor, ThemeColors};
use churn_engine::UiOptions;

/// Fixed semantic colors that don't follow the theme.
mod colors {
    use churn_config::HexColor;

    pub const ERROR: HexColor = HexColor::new(220, 53, 69);
    pub const SUCCESS: HexColor = HexColor::new(40, 167, 69);
    pub const WHITE: HexColor = HexColor::new(255, 255, 255);
    pub const BLACK: HexColor = HexColor::new(0, 0, 0);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub bg_panel: Color,
    pub bg_input: Color,
    pub bg_highlight: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub accent_dim: Color,
    /// Text drawn on top of `accent`.
    pub on_accent: Color,
    pub error: Color,
    pub success: Color,
}

const fn rgb(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

impl Palette {
    #[must_use]
    pub fn from_colors(base: ThemeColors) -> Self {
        let ThemeColors {
            background,
            accent,
            text,
        } = base;
        let on_accent = if accent.luma() > 0.6 {
            colors::BLACK
        } else {
            colors::WHITE
        };
        Self {
            bg: rgb(background),
            bg_panel: rgb(background.mix(text, 0.04)),
            bg_input: rgb(background.mix(text, 0.08)),
            bg_highlight: rgb(background.mix(accent, 0.15)),
            border: rgb(background.mix(text, 0.3)),
            text_primary: rgb(text),
            text_muted: rgb(text.mix(background, 0.45)),
            accent: rgb(accent),
            accent_dim: rgb(accent.mix(background, 0.4)),
            on_accent: rgb(on_accent),
            error: rgb(colors::ERROR),
            success: rgb(colors::SUCCESS),
        }
    }
}

#[must_use]
pub fn palette(colors: ThemeColors) -> Palette {
    Palette::from_colors(colors)
}

/// ASCII/Unicode glyphs for focus markers and controls.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub focus: &'static str,
    pub track_filled: &'static str,
    pub track_empty: &'static str,
    pub thumb: &'static str,
    pub select_prev: &'static str,
    pub select_next: &'static str,
    pub cursor: &'static str,
    pub rule: &'static str,
    pub warning: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            focus: ">",
            track_filled: "=",
            track_empty: "-",
            thumb: "O",
            select_prev: "<",
            select_next: ">",
            cursor: "_",
            rule: "-",
            warning: "!",
        }
    } else {
        Glyphs {
            focus: "›",
            track_filled: "━",
            track_empty: "─",
            thumb: "●",
            select_prev: "‹",
            select_next: "›",
            cursor: "▏",
            rule: "─",
            warning: "⚠",
        }
    }
}

/// Slider track: `width` cells with the thumb at `fraction` of the way along.
#[must_use]
pub fn slider_track(fraction: f64, width: usize, glyphs: &Glyphs) -> (String, String, String) {
    if width == 0 {
        return (String::new(), String::new(), String::new());
    }
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let thumb_at = ((width - 1) as f64 * fraction).round() as usize;
    (
        glyphs.track_filled.repeat(thumb_at),
        glyphs.thumb.to_string(),
        glyphs.track_empty.repeat(width - 1 - thumb_at),
    )
}

pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn section_header(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn label(palette: &Palette, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_primary)
        }
    }

    #[must_use]
    pub fn input(palette: &Palette, focused: bool) -> Style {
        let style = Style::default().fg(palette.text_primary).bg(palette.bg_input);
        if focused {
            style.bg(palette.bg_highlight)
        } else {
            style
        }
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn error(palette: &Palette) -> Style {
        Style::default().fg(palette.error)
    }

    #[must_use]
    pub fn button(palette: &Palette, focused: bool) -> Style {
        let style = Style::default()
            .fg(palette.on_accent)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD);
        if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    #[must_use]
    pub fn result(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.success)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border(palette: &Palette, focused: bool) -> Style {
        if focused {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.border)
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use churn_config::{HexColor, ThemeColors, ThemePreset};
    use churn_engine::UiOptions;

    use super::{Palette, glyphs, slider_track};

    #[test]
    fn light_palette_uses_base_colors() {
        let palette = Palette::from_colors(ThemePreset::Light.colors());
        assert_eq!(palette.bg, Color::Rgb(255, 255, 255));
        assert_eq!(palette.accent, Color::Rgb(0, 123, 255));
        assert_eq!(palette.text_primary, Color::Rgb(0, 0, 0));
        assert_eq!(palette.on_accent, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn bright_accent_gets_dark_text() {
        let colors = ThemeColors {
            accent: HexColor::new(0xFF, 0xEE, 0x88),
            ..ThemePreset::Dark.colors()
        };
        let palette = Palette::from_colors(colors);
        assert_eq!(palette.on_accent, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn muted_text_sits_between_text_and_background() {
        let palette = Palette::from_colors(ThemePreset::Light.colors());
        let Color::Rgb(r, g, b) = palette.text_muted else {
            panic!("expected rgb");
        };
        assert!(r > 0 && r < 255 && r == g && g == b);
    }

    #[test]
    fn slider_track_places_thumb() {
        let g = glyphs(UiOptions { ascii_only: true });
        assert_eq!(
            slider_track(0.0, 5, &g),
            (String::new(), "O".to_string(), "----".to_string())
        );
        assert_eq!(
            slider_track(1.0, 5, &g),
            ("====".to_string(), "O".to_string(), String::new())
        );
        assert_eq!(
            slider_track(0.5, 5, &g),
            ("==".to_string(), "O".to_string(), "--".to_string())
        );
        assert_eq!(
            slider_track(f64::NAN, 3, &g),
            (String::new(), "O".to_string(), "--".to_string())
        );
    }
}
