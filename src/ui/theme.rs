use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(21, 23, 30);
pub const BG_PANEL: Color32 = Color32::from_rgb(27, 30, 39);
pub const BG_HEADER: Color32 = Color32::from_rgb(32, 36, 47);
pub const BG_FIELD: Color32 = Color32::from_rgb(17, 19, 26);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(47, 51, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(86, 156, 214);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 229, 238);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 155, 175);
pub const TEXT_DIM: Color32 = Color32::from_rgb(96, 102, 120);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;

pub const ACCENT: Color32 = Color32::from_rgb(86, 156, 214);
pub const TODAY_LINE: Color32 = Color32::from_rgb(235, 87, 87);
pub const GRID_LINE: Color32 = Color32::from_rgb(41, 44, 56);
pub const HANDLE_COLOR: Color32 = Color32::WHITE;

pub const DEFAULT_BAR_COLOR: Color32 = Color32::from_rgb(73, 126, 176);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const LANE_HEIGHT: f32 = 30.0;
pub const LANE_GAP: f32 = 2.0;
pub const HEADER_HEIGHT: f32 = 44.0;
pub const HANDLE_WIDTH: f32 = 7.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 3.0; // vertical inset so bars don't touch lane edges

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Item color palette ───────────────────────────────────────────────────────

pub const ITEM_COLORS: &[Color32] = &[
    Color32::from_rgb(86, 156, 214),  // Blue
    Color32::from_rgb(78, 201, 126),  // Green
    Color32::from_rgb(197, 134, 192), // Orchid
    Color32::from_rgb(229, 151, 64),  // Orange
    Color32::from_rgb(86, 182, 194),  // Teal
    Color32::from_rgb(224, 108, 117), // Coral
    Color32::from_rgb(209, 154, 102), // Tan
    Color32::from_rgb(152, 129, 222), // Violet
];

pub fn item_color(index: usize) -> Color32 {
    ITEM_COLORS[index % ITEM_COLORS.len()]
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD; // TextEdit bg

    let rounding = Rounding::same(4.0);
    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.rounding = rounding;
    }
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(38, 42, 54);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(48, 53, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.bg_fill = Color32::from_rgb(56, 61, 78);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);

    visuals.selection.bg_fill = Color32::from_rgba_premultiplied(86, 156, 214, 45);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
