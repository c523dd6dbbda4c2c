use raylib::prelude::Color;

pub mod background;
pub mod engine;
pub mod layout;
pub mod transition;

/// `color` with its alpha scaled by `alpha`.
pub fn fade(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8)
}
