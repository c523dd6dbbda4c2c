use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use raylib::core::text::measure_text;
use raylib::prelude::*;

use crate::assets::resolve_video_source;
use crate::constants::*;
use crate::deck::Deck;
use crate::input::{Control, InputEvent, InputRouter, Key};
use crate::navigation::Navigator;
use crate::presentation::background::Background;
use crate::presentation::fade;
use crate::presentation::layout::{CardLayout, Controls, window_to_canvas};
use crate::presentation::transition::{CardEntrance, Crossfade, DotHeights};
use crate::video::DecoderConfig;

pub struct PresentationEngine {
    deck: Deck,
    sources: Vec<String>,
    decoder: DecoderConfig,

    nav: Navigator,
    router: InputRouter,
    // Slide the render layer last reacted to
    shown: usize,

    backgrounds: Crossfade<Background>,
    card: CardEntrance,
    card_layouts: Vec<CardLayout>,
    dots: DotHeights,
    hovered: Option<Control>,
}

impl PresentationEngine {
    pub fn new(deck: Deck, base_dir: &Path, decoder: DecoderConfig) -> Self {
        let sources = deck
            .iter()
            .map(|slide| resolve_video_source(base_dir, &slide.video))
            .collect();
        let nav = Navigator::new(deck.len());
        let dots = DotHeights::new(deck.len(), nav.current());
        Self {
            deck,
            sources,
            decoder,
            nav,
            router: InputRouter::new(),
            shown: 0,
            backgrounds: Crossfade::new(CROSSFADE_DURATION),
            card: CardEntrance::new(),
            card_layouts: Vec::new(),
            dots,
            hovered: None,
        }
    }

    fn show_current(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let index = self.nav.current();
        let source = &self.sources[index];
        let decoder = &self.decoder;
        if let Err(e) = self
            .backgrounds
            .switch_to(index, || Background::open(rl, thread, source, decoder))
        {
            warn!("Keeping previous background: {}", e);
        }
        self.card.restart(self.nav.direction());
        self.dots.select(index);
        self.shown = index;
        debug!("Showing slide {} of {} ({:?})", index + 1, self.nav.len(), self.nav.direction());
    }

    fn draw_card(&self, d: &mut impl RaylibDraw) {
        let (Some(slide), Some(layout)) = (self.deck.get(self.shown), self.card_layouts.get(self.shown)) else {
            return;
        };
        let (alpha, offset) = self.card.state();
        if alpha <= 0.0 {
            return;
        }

        let rect = Rectangle::new(layout.rect.x + offset, layout.rect.y, layout.rect.width, layout.rect.height);
        d.draw_rectangle_rounded(rect, 0.08, 16, fade(Color::WHITE, 0.10 * alpha));

        let x = layout.content_x() + offset;

        // Speaker pill and counter
        let speaker = slide.speaker.to_uppercase();
        let pill = Rectangle::new(
            x,
            layout.header_y,
            measure_text(&speaker, SPEAKER_FONT_SIZE) as f32 + 24.0,
            CardLayout::header_height(),
        );
        d.draw_rectangle_rounded(pill, 1.0, 12, fade(AMBER, 0.8 * alpha));
        let speaker_y = layout.header_y + (CardLayout::header_height() - SPEAKER_FONT_SIZE as f32) * 0.5;
        d.draw_text(&speaker, (x + 12.0) as i32, speaker_y as i32, SPEAKER_FONT_SIZE, fade(Color::BLACK, alpha));

        let counter = format!("Slide {} / {}", slide.id, self.deck.len());
        let counter_y = layout.header_y + (CardLayout::header_height() - COUNTER_FONT_SIZE as f32) * 0.5;
        d.draw_text(
            &counter,
            (pill.x + pill.width + 12.0) as i32,
            counter_y as i32,
            COUNTER_FONT_SIZE,
            fade(MUTED_TEXT, alpha),
        );

        for (i, line) in layout.title_lines.iter().enumerate() {
            let y = layout.title_y + i as f32 * CardLayout::title_line_height();
            let color = if i == 0 { AMBER_LIGHT } else { AMBER };
            d.draw_text(line, x as i32, y as i32, TITLE_FONT_SIZE, fade(color, alpha));
        }

        for (i, line) in layout.body_lines.iter().enumerate() {
            let y = layout.body_y + i as f32 * CardLayout::body_line_height();
            d.draw_text(line, x as i32, y as i32, BODY_FONT_SIZE, fade(BODY_TEXT, alpha));
        }
    }

    fn draw_controls(&self, d: &mut impl RaylibDraw) {
        let controls = Controls::layout(self.dots.heights());

        for (i, dot) in controls.dots.iter().enumerate() {
            let color = if i == self.shown {
                AMBER
            } else if self.hovered == Some(Control::Dot(i)) {
                fade(Color::WHITE, 0.5)
            } else {
                fade(Color::WHITE, 0.3)
            };
            d.draw_rectangle_rounded(*dot, 1.0, 8, color);
        }

        let previous_alpha = if self.hovered == Some(Control::Previous) { 0.2 } else { 0.1 };
        d.draw_circle_v(controls.previous.center, controls.previous.radius, fade(Color::WHITE, previous_alpha));
        draw_chevron(d, controls.previous.center, -1.0, Color::WHITE);

        let next_alpha = if self.hovered == Some(Control::Next) { 1.0 } else { 0.8 };
        d.draw_circle_v(controls.next.center, controls.next.radius, fade(AMBER, next_alpha));
        draw_chevron(d, controls.next.center, 1.0, Color::BLACK);
    }
}

impl crate::engine::Engine for PresentationEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> anyhow::Result<()> {
        // Text metrics need the default font, which only exists once the window is up
        self.card_layouts = self
            .deck
            .iter()
            .map(|slide| CardLayout::compute(&slide.title, &slide.text, |s, size| measure_text(s, size) as f32))
            .collect();

        let first = Background::open(rl, thread, &self.sources[0], &self.decoder).map_err(anyhow::Error::msg)?;
        self.backgrounds.show(0, first);
        self.card.restart(self.nav.direction());
        info!("Loaded {} slides", self.deck.len());
        Ok(())
    }

    fn handle_input(&mut self, rl: &mut RaylibHandle, canvas: &Rectangle) {
        let now = Instant::now();
        self.router.tick(now);

        let controls = Controls::layout(self.dots.heights());
        self.hovered = controls.hit(window_to_canvas(rl.get_mouse_position(), canvas));

        for event in poll_events(rl, self.hovered) {
            self.router.dispatch(event, now, &mut self.nav);
        }
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) {
        if self.nav.current() != self.shown {
            self.show_current(rl, thread);
        }

        self.backgrounds.update(dt);
        for layer in self.backgrounds.layers_mut() {
            layer.content.update();
        }
        self.card.update(dt);
        self.dots.update(dt);

        let mut d = rl.begin_texture_mode(thread, framebuffer);
        d.clear_background(Color::BLACK);
        for layer in self.backgrounds.layers() {
            layer.content.draw(&mut d, layer.opacity);
        }
        self.draw_card(&mut d);
        self.draw_controls(&mut d);
    }
}

// --- Collect this frame's raw input, in key, wheel, click order ---
fn poll_events(rl: &mut RaylibHandle, hovered: Option<Control>) -> Vec<InputEvent> {
    let mut events = Vec::new();

    while let Some(key) = rl.get_key_pressed() {
        events.push(InputEvent::Key(translate_key(key)));
    }
    events.extend(held_key_events(|key| rl.is_key_pressed_repeat(key)));

    if let Some(event) = wheel_event(rl.get_mouse_wheel_move()) {
        events.push(event);
    }

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        if let Some(control) = hovered {
            events.push(InputEvent::Click(control));
        }
    }

    events
}

fn translate_key(key: KeyboardKey) -> Key {
    match key {
        KeyboardKey::KEY_RIGHT => Key::ArrowRight,
        KeyboardKey::KEY_LEFT => Key::ArrowLeft,
        _ => Key::Other,
    }
}

/// OS auto-repeat of a held arrow, which `get_key_pressed` does not report.
fn held_key_events(is_repeat: impl Fn(KeyboardKey) -> bool) -> Vec<InputEvent> {
    [KeyboardKey::KEY_RIGHT, KeyboardKey::KEY_LEFT]
        .into_iter()
        .filter(|&key| is_repeat(key))
        .map(|key| InputEvent::Key(translate_key(key)))
        .collect()
}

/// raylib reports wheel-up as positive, the router expects scroll-down positive.
fn wheel_event(wheel_move: f32) -> Option<InputEvent> {
    if wheel_move == 0.0 {
        None
    } else {
        Some(InputEvent::Wheel { delta_y: -wheel_move })
    }
}

fn draw_chevron(d: &mut impl RaylibDraw, center: Vector2, pointing: f32, color: Color) {
    let size = 10.0;
    let tip = Vector2::new(center.x + size * 0.5 * pointing, center.y);
    let top = Vector2::new(center.x - size * 0.5 * pointing, center.y - size);
    let bottom = Vector2::new(center.x - size * 0.5 * pointing, center.y + size);
    d.draw_line_ex(top, tip, 4.0, color);
    d.draw_line_ex(bottom, tip, 4.0, color);
}
