use eframe::egui::{Color32, Vec2};

// Primary Colors
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(76, 154, 255);

// Text Colors
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255);
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(138, 138, 143);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(220, 38, 38);
pub const TEXT_SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);

// UI Elements
pub const BORDER_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 67, 15);
pub const PANEL_BG: Color32 = Color32::from_rgb(248, 248, 248);

// Sizing & Spacing
pub const ROUNDING_FRAME: f32 = 8.0;
pub const ROUNDING_BUTTON: f32 = 6.0;
pub const MIN_SIZE_BUTTON: Vec2 = Vec2::new(160.0, 40.0);
pub const COMBO_WIDTH: f32 = 220.0;

pub const BUTTON_FONT_SIZE: f32 = 16.0;
