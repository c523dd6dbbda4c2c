use raylib::prelude::Color;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Default frames per second

pub const VIDEO_WIDTH: i32 = 960;             // Default decode width of background videos
pub const VIDEO_HEIGHT: i32 = 540;            // Default decode height of background videos
pub const VIDEO_ZOOM: f32 = 1.02;             // Background videos are slightly overscanned

pub const WHEEL_COOLDOWN_MS: u64 = 1000;      // Wheel events ignored for this long after an accepted one

pub const CROSSFADE_DURATION: f32 = 1.0;      // Background video opacity transition (seconds)
pub const OVERLAY_ALPHA: f32 = 0.4;           // Dark overlay above every background layer

pub const CARD_DELAY: f32 = 0.3;              // Text card waits this long before entering (seconds)
pub const CARD_DURATION: f32 = 0.8;           // Text card fade + slide-in (seconds)
pub const CARD_OFFSET_X: f32 = -50.0;         // Text card starts this far left of its resting place

pub const DOT_RESIZE_DURATION: f32 = 0.3;     // Progress dot height transition (seconds)

// Layout of the virtual canvas
pub const MARGIN_X: f32 = 96.0;
pub const CARD_MAX_WIDTH: f32 = 576.0;
pub const CARD_PADDING: f32 = 32.0;
pub const DOT_WIDTH: f32 = 6.0;
pub const DOT_HEIGHT: f32 = 12.0;
pub const DOT_ACTIVE_HEIGHT: f32 = 48.0;
pub const DOT_GAP: f32 = 12.0;
pub const BUTTON_RADIUS: f32 = 32.0;
pub const BUTTON_GAP: f32 = 16.0;
pub const DOTS_TO_BUTTONS: f32 = 64.0;

pub const SPEAKER_FONT_SIZE: i32 = 16;
pub const COUNTER_FONT_SIZE: i32 = 20;
pub const TITLE_FONT_SIZE: i32 = 48;
pub const BODY_FONT_SIZE: i32 = 26;
pub const BODY_LINE_SPACING: i32 = 10;

pub const AMBER: Color = Color::new(245, 158, 11, 255);
pub const AMBER_LIGHT: Color = Color::new(253, 230, 138, 255);
pub const MUTED_TEXT: Color = Color::new(209, 213, 219, 255);
pub const BODY_TEXT: Color = Color::new(243, 244, 246, 255);
