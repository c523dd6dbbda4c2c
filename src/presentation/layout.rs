use raylib::prelude::*;

use crate::constants::*;
use crate::input::Control;

const DOT_HIT_SLOP: f32 = 10.0;
const CONTROLS_MARGIN_Y: f32 = 48.0;
const HEADER_HEIGHT: f32 = 28.0;
const HEADER_GAP: f32 = 16.0;
const TITLE_GAP: f32 = 24.0;
const TITLE_LINE_HEIGHT: f32 = TITLE_FONT_SIZE as f32 + 8.0;
const BODY_LINE_HEIGHT: f32 = (BODY_FONT_SIZE + BODY_LINE_SPACING) as f32;

pub fn contains(rect: &Rectangle, p: Vector2) -> bool {
    p.x >= rect.x && p.x <= rect.x + rect.width && p.y >= rect.y && p.y <= rect.y + rect.height
}

// --- Letterbox the fixed-size canvas into the window ---
pub fn fit_canvas(screen_width: f32, screen_height: f32) -> Rectangle {
    let scale = (screen_width / RENDER_WIDTH as f32).min(screen_height / RENDER_HEIGHT as f32);
    let width = RENDER_WIDTH as f32 * scale;
    let height = RENDER_HEIGHT as f32 * scale;
    Rectangle::new((screen_width - width) * 0.5, (screen_height - height) * 0.5, width, height)
}

/// Maps a window position into canvas coordinates, given where the canvas is drawn.
pub fn window_to_canvas(p: Vector2, canvas: &Rectangle) -> Vector2 {
    Vector2::new(
        (p.x - canvas.x) * RENDER_WIDTH as f32 / canvas.width,
        (p.y - canvas.y) * RENDER_HEIGHT as f32 / canvas.height,
    )
}

#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f32,
}

impl Circle {
    pub fn contains(&self, p: Vector2) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Progress dots and previous/next buttons in the right-hand column.
#[derive(Debug, Clone)]
pub struct Controls {
    pub dots: Vec<Rectangle>,
    pub previous: Circle,
    pub next: Circle,
    // Gap between dots after shrinking the column to fit
    dot_gap: f32,
}

impl Controls {
    /// Stacks the dots above the buttons, centred vertically. A column too
    /// tall for the canvas is shrunk evenly until it fits.
    pub fn layout(dot_heights: &[f32]) -> Self {
        let center_x = RENDER_WIDTH as f32 - MARGIN_X - BUTTON_RADIUS;
        let buttons_height = BUTTON_RADIUS * 4.0 + BUTTON_GAP;
        let gap_count = dot_heights.len().saturating_sub(1) as f32;
        let natural_height = dot_heights.iter().sum::<f32>() + gap_count * DOT_GAP;
        let available = RENDER_HEIGHT as f32 - CONTROLS_MARGIN_Y * 2.0 - DOTS_TO_BUTTONS - buttons_height;
        let scale = if natural_height > available { available / natural_height } else { 1.0 };

        let dot_gap = DOT_GAP * scale;
        let dots_height = natural_height * scale;
        let total = dots_height + DOTS_TO_BUTTONS + buttons_height;
        let top = (RENDER_HEIGHT as f32 - total) * 0.5;

        let mut y = top;
        let mut dots = Vec::with_capacity(dot_heights.len());
        for &height in dot_heights {
            let height = height * scale;
            dots.push(Rectangle::new(center_x - DOT_WIDTH * 0.5, y, DOT_WIDTH, height));
            y += height + dot_gap;
        }

        let first_button_y = top + dots_height + DOTS_TO_BUTTONS + BUTTON_RADIUS;
        let previous = Circle { center: Vector2::new(center_x, first_button_y), radius: BUTTON_RADIUS };
        let next = Circle {
            center: Vector2::new(center_x, first_button_y + BUTTON_RADIUS * 2.0 + BUTTON_GAP),
            radius: BUTTON_RADIUS,
        };

        Self { dots, previous, next, dot_gap }
    }

    pub fn hit(&self, p: Vector2) -> Option<Control> {
        if self.previous.contains(p) {
            return Some(Control::Previous);
        }
        if self.next.contains(p) {
            return Some(Control::Next);
        }
        self.dots
            .iter()
            .position(|dot| {
                let area = Rectangle::new(
                    dot.x - DOT_HIT_SLOP,
                    dot.y - self.dot_gap * 0.5,
                    dot.width + DOT_HIT_SLOP * 2.0,
                    dot.height + self.dot_gap,
                );
                contains(&area, p)
            })
            .map(Control::Dot)
    }
}

// --- Greedy word wrap; a word wider than the line gets a line of its own ---
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Geometry of the text card, relative to its resting position.
#[derive(Debug, Clone)]
pub struct CardLayout {
    pub rect: Rectangle,
    pub header_y: f32,
    pub title_y: f32,
    pub body_y: f32,
    pub title_lines: Vec<String>,
    pub body_lines: Vec<String>,
}

impl CardLayout {
    pub fn compute(title: &str, body: &str, measure: impl Fn(&str, i32) -> f32) -> Self {
        let content_width = CARD_MAX_WIDTH - CARD_PADDING * 2.0;
        let title_lines = wrap_text(title, content_width, |s| measure(s, TITLE_FONT_SIZE));
        let body_lines = wrap_text(body, content_width, |s| measure(s, BODY_FONT_SIZE));

        let title_height = title_lines.len() as f32 * TITLE_LINE_HEIGHT;
        let body_height = body_lines.len() as f32 * BODY_LINE_HEIGHT;
        let height = CARD_PADDING * 2.0 + HEADER_HEIGHT + HEADER_GAP + title_height + TITLE_GAP + body_height;

        let rect = Rectangle::new(MARGIN_X, (RENDER_HEIGHT as f32 - height) * 0.5, CARD_MAX_WIDTH, height);
        let header_y = rect.y + CARD_PADDING;
        let title_y = header_y + HEADER_HEIGHT + HEADER_GAP;
        let body_y = title_y + title_height + TITLE_GAP;

        Self { rect, header_y, title_y, body_y, title_lines, body_lines }
    }

    pub fn content_x(&self) -> f32 {
        self.rect.x + CARD_PADDING
    }

    pub fn title_line_height() -> f32 {
        TITLE_LINE_HEIGHT
    }

    pub fn body_line_height() -> f32 {
        BODY_LINE_HEIGHT
    }

    pub fn header_height() -> f32 {
        HEADER_HEIGHT
    }
}
