use log::warn;
use raylib::prelude::*;

use crate::constants::*;
use crate::presentation::fade;
use crate::video::{DecoderConfig, VideoError, VideoStream};

/// What to do with a layer's texture after polling its stream.
#[derive(Debug, PartialEq)]
enum FrameAction<'a> {
    Upload(&'a [u8]),
    Keep,
    Fallback(String),
}

fn frame_action(polled: Result<Option<&[u8]>, VideoError>, frame_len: usize) -> FrameAction<'_> {
    match polled {
        Ok(Some(frame)) if frame.len() == frame_len => FrameAction::Upload(frame),
        Ok(Some(frame)) => FrameAction::Fallback(format!(
            "frame of {} bytes does not fit a {} byte texture",
            frame.len(),
            frame_len
        )),
        Ok(None) => FrameAction::Keep,
        Err(e) => FrameAction::Fallback(e.to_string()),
    }
}

/// Full-bleed video of one slide, streamed into a texture every frame.
pub struct Background {
    source: String,
    texture: Texture2D,
    frame_len: usize,
    stream: Option<VideoStream>,
    // Until the first frame arrives the texture is still blank
    has_frame: bool,
}

impl Background {
    pub fn open(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        source: &str,
        config: &DecoderConfig,
    ) -> Result<Self, String> {
        let blank = Image::gen_image_color(config.width, config.height, Color::BLACK);
        let texture = rl
            .load_texture_from_image(thread, &blank)
            .map_err(|e| format!("Failed to create video texture for {}: {}", source, e))?;

        let stream = match VideoStream::open(source, config) {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!("{}: {}", source, e);
                None
            }
        };

        Ok(Self {
            source: source.to_string(),
            texture,
            frame_len: config.frame_len(),
            stream,
            has_frame: false,
        })
    }

    /// Uploads the newest decoded frame, if any. A broken stream is dropped
    /// for good and the layer falls back to a plain gradient.
    pub fn update(&mut self) {
        let Some(stream) = self.stream.as_mut() else {
            return;
        };
        let failure = match frame_action(stream.next_frame(), self.frame_len) {
            FrameAction::Upload(frame) => match self.texture.update_texture(frame) {
                Ok(()) => {
                    self.has_frame = true;
                    None
                }
                Err(e) => Some(format!("failed to upload frame: {}", e)),
            },
            FrameAction::Keep => None,
            FrameAction::Fallback(reason) => Some(reason),
        };
        if let Some(reason) = failure {
            warn!("{}: {}, showing fallback frame", self.source, reason);
            self.stream = None;
        }
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, opacity: f32) {
        let screen_width = RENDER_WIDTH as f32;
        let screen_height = RENDER_HEIGHT as f32;

        if self.stream.is_some() && self.has_frame {
            let tex_width = self.texture.width() as f32;
            let tex_height = self.texture.height() as f32;

            let scaled_width = screen_width * VIDEO_ZOOM;
            let scaled_height = screen_height * VIDEO_ZOOM;

            // Relative to the dest rectangle (ie. the center of the canvas)
            let origin = Vector2::new(scaled_width * 0.5, scaled_height * 0.5);

            d.draw_texture_pro(
                &self.texture,
                Rectangle::new(0.0, 0.0, tex_width, tex_height),
                Rectangle::new(screen_width * 0.5, screen_height * 0.5, scaled_width, scaled_height),
                origin,
                0.0,
                fade(Color::WHITE, opacity),
            );
        } else {
            d.draw_rectangle_gradient_v(
                0,
                0,
                RENDER_WIDTH,
                RENDER_HEIGHT,
                fade(Color::new(30, 27, 24, 255), opacity),
                fade(Color::new(8, 8, 10, 255), opacity),
            );
        }

        // Dark overlay
        d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, fade(Color::BLACK, OVERLAY_ALPHA * opacity));
    }
}
