//! Visual theme
//!
//! The dark green-on-black terminal look, plus the stock light and system
//! themes for people who value their eyes.

use eframe::egui;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x1a, 0x1a, 0x1a);
pub const FIELD: egui::Color32 = egui::Color32::from_rgb(0x0d, 0x0d, 0x0d);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0x7f);
pub const DISABLED_FILL: egui::Color32 = egui::Color32::from_rgb(0x55, 0x55, 0x55);
pub const DISABLED_TEXT: egui::Color32 = egui::Color32::from_rgb(0x88, 0x88, 0x88);

pub const BODY_SIZE: f32 = 14.0;
pub const BUTTON_SIZE: f32 = 16.0;
pub const VERDICT_SIZE: f32 = 16.0;

/// Which theme the window uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Encabulator,
    Light,
    System,
}

impl ThemeChoice {
    /// Parse the config value; unknown names fall back to the encabulator theme
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::Light,
            "system" => Self::System,
            _ => Self::Encabulator,
        }
    }

    pub fn accent(self) -> egui::Color32 {
        match self {
            Self::Encabulator => ACCENT,
            Self::Light | Self::System => egui::Color32::from_rgb(0x00, 0x99, 0x4c),
        }
    }
}

/// Visuals for the dark encabulator look
pub fn encabulator_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();

    visuals.override_text_color = Some(ACCENT);
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.extreme_bg_color = FIELD;
    visuals.faint_bg_color = FIELD;

    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);

    visuals.widgets.noninteractive.bg_fill = BACKGROUND;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, ACCENT);

    // Text fields draw their frame from the inactive and focused strokes
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, ACCENT);

    visuals
}

/// Apply the chosen theme and the monospace font to a context
pub fn apply(ctx: &egui::Context, choice: ThemeChoice) {
    match choice {
        ThemeChoice::Encabulator => ctx.set_visuals(encabulator_visuals()),
        ThemeChoice::Light => ctx.set_visuals(egui::Visuals::light()),
        ThemeChoice::System => {}
    }

    let mut style = (*ctx.style()).clone();
    style.override_font_id = Some(egui::FontId::monospace(BODY_SIZE));
    style.spacing.button_padding = egui::vec2(10.0, 10.0);
    ctx.set_style(style);
}

/// Button fills for the primary action: accent at rest, white under the pointer
pub fn style_primary_button(visuals: &mut egui::Visuals, accent: egui::Color32) {
    let widgets = &mut visuals.widgets;
    widgets.inactive.weak_bg_fill = accent;
    widgets.hovered.weak_bg_fill = egui::Color32::WHITE;
    widgets.active.weak_bg_fill = accent;
    for state in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.active] {
        state.bg_stroke = egui::Stroke::NONE;
    }
}

/// The big primary action button. Fills come from [`style_primary_button`]
/// unless disabled.
pub fn primary_button(label: &str, enabled: bool) -> egui::Button<'static> {
    let text = if enabled { egui::Color32::BLACK } else { DISABLED_TEXT };

    let button = egui::Button::new(
        egui::RichText::new(label.to_string())
            .size(BUTTON_SIZE)
            .strong()
            .color(text),
    )
    .stroke(egui::Stroke::NONE);

    if enabled {
        button
    } else {
        button.fill(DISABLED_FILL)
    }
}
