use raylib::prelude::*;

use crate::constants::*;
use crate::state::Direction;

pub struct Layer<T> {
    pub slide: usize,
    pub opacity: f32,
    fading_in: bool,
    pub content: T,
}

/// Stack of background layers. The newest layer fades in while every older
/// one keeps fading out from wherever it was; fully faded layers are dropped.
pub struct Crossfade<T> {
    layers: Vec<Layer<T>>,
    duration: f32,
}

impl<T> Crossfade<T> {
    pub fn new(duration: f32) -> Self {
        Self { layers: Vec::new(), duration }
    }

    /// Shows `slide` at full opacity without a transition.
    pub fn show(&mut self, slide: usize, content: T) {
        self.layers.clear();
        self.layers.push(Layer { slide, opacity: 1.0, fading_in: true, content });
    }

    /// Starts a transition towards `slide`. `open` is only called when no
    /// layer for that slide is still on screen.
    pub fn switch_to<E>(&mut self, slide: usize, open: impl FnOnce() -> Result<T, E>) -> Result<(), E> {
        if self.top().is_some_and(|layer| layer.slide == slide) {
            return Ok(());
        }
        let revived = match self.layers.iter().position(|layer| layer.slide == slide) {
            // Still fading out: bring it back from its current opacity.
            Some(pos) => self.layers.remove(pos),
            None => Layer { slide, opacity: 0.0, fading_in: true, content: open()? },
        };
        for layer in self.layers.iter_mut() {
            layer.fading_in = false;
        }
        self.layers.push(Layer { fading_in: true, ..revived });
        Ok(())
    }

    pub fn update(&mut self, dt: f32) {
        let step = if self.duration > 0.0 { dt / self.duration } else { 1.0 };
        for layer in self.layers.iter_mut() {
            if layer.fading_in {
                layer.opacity = (layer.opacity + step).min(1.0);
            } else {
                layer.opacity = (layer.opacity - step).max(0.0);
            }
        }
        self.layers.retain(|layer| layer.fading_in || layer.opacity > 0.0);
    }

    pub fn top(&self) -> Option<&Layer<T>> {
        self.layers.last()
    }

    /// Bottom to top.
    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer<T>] {
        &mut self.layers
    }
}

/// Fade + slide-in of the text card, restarted whenever the slide changes.
pub struct CardEntrance {
    elapsed: f32,
    from_x: f32,
}

impl CardEntrance {
    pub fn new() -> Self {
        Self { elapsed: 0.0, from_x: CARD_OFFSET_X }
    }

    pub fn restart(&mut self, direction: Direction) {
        self.elapsed = 0.0;
        self.from_x = CARD_OFFSET_X * direction.sign();
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(CARD_DELAY + CARD_DURATION);
    }

    /// Current `(opacity, x offset)` of the card.
    pub fn state(&self) -> (f32, f32) {
        let t = (self.elapsed - CARD_DELAY).clamp(0.0, CARD_DURATION);
        let opacity = ease::cubic_out(t, 0.0, 1.0, CARD_DURATION);
        let offset = ease::cubic_out(t, self.from_x, -self.from_x, CARD_DURATION);
        (opacity, offset)
    }
}

/// Animated heights of the progress dots.
pub struct DotHeights {
    tweens: Vec<ease::Tween>,
    heights: Vec<f32>,
}

impl DotHeights {
    pub fn new(count: usize, current: usize) -> Self {
        let heights: Vec<f32> = (0..count).map(|i| Self::target(i, current)).collect();
        let tweens = heights
            .iter()
            .map(|&h| ease::Tween::new(ease::cubic_out, h, h, DOT_RESIZE_DURATION))
            .collect();
        Self { tweens, heights }
    }

    fn target(index: usize, current: usize) -> f32 {
        if index == current { DOT_ACTIVE_HEIGHT } else { DOT_HEIGHT }
    }

    pub fn select(&mut self, current: usize) {
        for (i, (tween, height)) in self.tweens.iter_mut().zip(self.heights.iter()).enumerate() {
            *tween = ease::Tween::new(ease::cubic_out, *height, Self::target(i, current), DOT_RESIZE_DURATION);
        }
    }

    pub fn update(&mut self, dt: f32) {
        for (tween, height) in self.tweens.iter_mut().zip(self.heights.iter_mut()) {
            *height = tween.apply(dt);
        }
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides<T>(fade: &Crossfade<T>) -> Vec<usize> {
        fade.layers().iter().map(|l| l.slide).collect()
    }

    fn open(name: &'static str) -> impl FnOnce() -> Result<&'static str, ()> {
        move || Ok(name)
    }

    #[test]
    fn crossfade_swaps_layers_over_duration() {
        let mut fade = Crossfade::new(1.0);
        fade.show(0, "a");
        fade.switch_to(1, open("b")).unwrap();
        assert_eq!(slides(&fade), vec![0, 1]);

        fade.update(0.5);
        assert!((fade.layers()[0].opacity - 0.5).abs() < 1e-5);
        assert!((fade.layers()[1].opacity - 0.5).abs() < 1e-5);

        fade.update(0.5);
        assert_eq!(slides(&fade), vec![1]);
        assert_eq!(fade.top().unwrap().opacity, 1.0);
        assert_eq!(fade.top().unwrap().content, "b");
    }

    #[test]
    fn same_slide_does_not_open() {
        let mut fade = Crossfade::new(1.0);
        fade.show(2, "c");
        let result: Result<(), ()> = fade.switch_to(2, || panic!("must not reopen"));
        assert!(result.is_ok());
        assert_eq!(slides(&fade), vec![2]);
    }

    #[test]
    fn rapid_switches_stack_and_drain() {
        let mut fade = Crossfade::new(1.0);
        fade.show(0, "a");
        fade.switch_to(1, open("b")).unwrap();
        fade.update(0.25);
        fade.switch_to(2, open("c")).unwrap();
        assert_eq!(slides(&fade), vec![0, 1, 2]);

        fade.update(0.25);
        // b only reached 0.25 before fading back out
        assert_eq!(slides(&fade), vec![0, 2]);
        fade.update(1.0);
        assert_eq!(slides(&fade), vec![2]);
    }

    #[test]
    fn returning_slide_is_revived() {
        let mut fade = Crossfade::new(1.0);
        fade.show(0, "a");
        fade.switch_to(1, open("b")).unwrap();
        fade.update(0.4);
        fade.switch_to(0, || -> Result<&'static str, ()> { panic!("layer still visible") }).unwrap();
        assert_eq!(slides(&fade), vec![1, 0]);
        assert!((fade.top().unwrap().opacity - 0.6).abs() < 1e-5);

        fade.update(0.4);
        assert_eq!(fade.top().unwrap().opacity, 1.0);
        assert_eq!(slides(&fade), vec![0]);
    }

    #[test]
    fn open_failure_keeps_previous_layers() {
        let mut fade = Crossfade::new(1.0);
        fade.show(0, "a");
        let result = fade.switch_to(1, || Err("broken"));
        assert_eq!(result, Err("broken"));
        assert_eq!(slides(&fade), vec![0]);
    }

    #[test]
    fn card_waits_then_slides_in() {
        let mut card = CardEntrance::new();
        card.restart(Direction::Forward);
        assert_eq!(card.state(), (0.0, CARD_OFFSET_X));

        card.update(CARD_DELAY);
        assert_eq!(card.state(), (0.0, CARD_OFFSET_X));

        card.update(CARD_DURATION / 2.0);
        let (opacity, offset) = card.state();
        assert!(opacity > 0.5 && opacity < 1.0);
        assert!(offset > CARD_OFFSET_X && offset < 0.0);

        card.update(10.0);
        let (opacity, offset) = card.state();
        assert!((opacity - 1.0).abs() < 1e-5);
        assert!(offset.abs() < 1e-4);
    }

    #[test]
    fn card_enters_from_the_right_when_going_back() {
        let mut card = CardEntrance::new();
        card.restart(Direction::Backward);
        let (_, offset) = card.state();
        assert_eq!(offset, -CARD_OFFSET_X);
    }

    #[test]
    fn dots_grow_towards_selection() {
        let mut dots = DotHeights::new(4, 0);
        assert_eq!(dots.heights(), &[DOT_ACTIVE_HEIGHT, DOT_HEIGHT, DOT_HEIGHT, DOT_HEIGHT]);

        dots.select(2);
        dots.update(DOT_RESIZE_DURATION / 2.0);
        let h = dots.heights();
        assert!(h[0] < DOT_ACTIVE_HEIGHT && h[0] > DOT_HEIGHT);
        assert!(h[2] > DOT_HEIGHT && h[2] < DOT_ACTIVE_HEIGHT);

        dots.update(DOT_RESIZE_DURATION);
        let h = dots.heights();
        assert!((h[0] - DOT_HEIGHT).abs() < 1e-4);
        assert!((h[2] - DOT_ACTIVE_HEIGHT).abs() < 1e-4);
        assert!((h[1] - DOT_HEIGHT).abs() < 1e-4);
    }
}
