//! Color scheme definitions for the demo windows.

use eframe::egui::{Color32, Context, Visuals};

/// Visual theme for the demo UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// White background, black foreground. Matches printed figures.
    #[default]
    Light,
    /// egui's default dark theme.
    Dark,
}

impl ColorScheme {
    /// All built-in schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Light, ColorScheme::Dark]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Light => {
                let mut v = Visuals::light();
                v.panel_fill = Color32::WHITE;
                v.window_fill = Color32::WHITE;
                v.extreme_bg_color = Color32::WHITE;
                v.override_text_color = Some(Color32::BLACK);
                ctx.set_visuals(v);
            }
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
        }
    }
}
