use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;
use raylib::prelude::*;

mod assets;
mod constants;
mod deck;
mod engine;
mod input;
mod navigation;
mod presentation;
mod state;
mod video;

use crate::assets::default_base_dir;
use crate::constants::*;
use crate::deck::Deck;
use crate::engine::Engine;
use crate::presentation::engine::PresentationEngine;
use crate::presentation::layout::fit_canvas;
use crate::video::DecoderConfig;

/// Full-screen slideshow with looping background videos.
#[derive(Parser, Debug)]
#[command(name = "deckplayer", version, about)]
struct Args {
    /// TOML deck file; the built-in deck is shown when omitted
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Directory video references are resolved against
    /// (defaults to the deck file's directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Open a window instead of going full screen
    #[arg(long)]
    windowed: bool,

    /// Target frames per second
    #[arg(long, default_value_t = FPS)]
    fps: u32,

    /// Width background videos are decoded at
    #[arg(long, default_value_t = VIDEO_WIDTH, value_parser = clap::value_parser!(i32).range(16..=7680))]
    video_width: i32,

    /// Height background videos are decoded at
    #[arg(long, default_value_t = VIDEO_HEIGHT, value_parser = clap::value_parser!(i32).range(16..=4320))]
    video_height: i32,

    /// ffmpeg executable used to decode videos
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: OsString,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // --- Load Deck ---
    let deck = match &args.deck {
        Some(path) => Deck::load(path).with_context(|| format!("Error loading deck '{}'", path.display()))?,
        None => Deck::builtin(),
    };
    let base_dir = args
        .base_dir
        .clone()
        .unwrap_or_else(|| default_base_dir(args.deck.as_deref()));
    info!("Presenting {} slides, videos relative to {}", deck.len(), base_dir.display());

    let decoder = DecoderConfig {
        ffmpeg: args.ffmpeg.clone(),
        width: args.video_width,
        height: args.video_height,
        fps: args.fps.max(1),
    };

    let mut builder = raylib::init();
    builder.title("Deck Player").vsync().resizable();
    if args.windowed {
        builder.size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2);
    } else {
        // Zero size picks the monitor resolution
        builder.size(0, 0).fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(args.fps.max(1));
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = PresentationEngine::new(deck, &base_dir, decoder);
    engine.initialize(&mut rl, &thread)?;

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("Failed to create render texture: {}", e))?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let canvas = fit_canvas(rl.get_screen_width() as f32, rl.get_screen_height() as f32);

        engine.handle_input(&mut rl, &canvas);
        engine.render_frame(dt, &mut rl, &thread, &mut framebuffer);

        // Draw the canvas letterboxed into the window, flipped back upright
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            canvas,
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    info!("Window closed");
    Ok(())
}
