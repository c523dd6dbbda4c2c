use raylib::prelude::*;

pub trait Engine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> anyhow::Result<()>;
    fn handle_input(&mut self, rl: &mut RaylibHandle, canvas: &Rectangle);
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D);
}
