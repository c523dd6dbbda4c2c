use std::time::{Duration, Instant};

use log::debug;

use crate::constants::WHEEL_COOLDOWN_MS;
use crate::navigation::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Clickable on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Dot(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Positive `delta_y` scrolls down, like a browser wheel event.
    Wheel { delta_y: f32 },
    Click(Control),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Advance,
    Retreat,
    JumpTo(usize),
}

impl Intent {
    pub fn apply(self, nav: &mut Navigator) {
        match self {
            Intent::Advance => nav.advance(),
            Intent::Retreat => nav.retreat(),
            Intent::JumpTo(index) => nav.jump_to(index),
        }
    }
}

/// Boolean latch with a single scheduled release.
#[derive(Debug, Default)]
struct WheelLatch {
    release_at: Option<Instant>,
}

impl WheelLatch {
    fn is_engaged(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(at) if now >= at => {
                self.release_at = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn engage(&mut self, now: Instant, cooldown: Duration) {
        self.release_at = Some(now + cooldown);
    }
}

/// Turns raw input into navigation intents. Only wheel input is rate limited.
#[derive(Debug)]
pub struct InputRouter {
    latch: WheelLatch,
    cooldown: Duration,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    pub fn new() -> Self {
        Self {
            latch: WheelLatch::default(),
            cooldown: Duration::from_millis(WHEEL_COOLDOWN_MS),
        }
    }

    /// Releases the wheel latch once its cooldown has expired.
    pub fn tick(&mut self, now: Instant) {
        self.latch.is_engaged(now);
    }

    pub fn route(&mut self, event: InputEvent, now: Instant) -> Option<Intent> {
        match event {
            InputEvent::Key(Key::ArrowRight) => Some(Intent::Advance),
            InputEvent::Key(Key::ArrowLeft) => Some(Intent::Retreat),
            InputEvent::Key(Key::Other) => None,
            InputEvent::Wheel { delta_y } => {
                if self.latch.is_engaged(now) {
                    return None;
                }
                // A zero delta still consumes the window.
                self.latch.engage(now, self.cooldown);
                if delta_y > 0.0 {
                    Some(Intent::Advance)
                } else if delta_y < 0.0 {
                    Some(Intent::Retreat)
                } else {
                    None
                }
            }
            InputEvent::Click(Control::Previous) => Some(Intent::Retreat),
            InputEvent::Click(Control::Next) => Some(Intent::Advance),
            InputEvent::Click(Control::Dot(index)) => Some(Intent::JumpTo(index)),
        }
    }

    /// Routes `event` and applies the resulting intent, if any.
    pub fn dispatch(&mut self, event: InputEvent, now: Instant, nav: &mut Navigator) -> Option<Intent> {
        let intent = self.route(event, now)?;
        intent.apply(nav);
        debug!("{:?} -> {:?}, now at slide {}", event, intent, nav.current() + 1);
        Some(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;
    use proptest::prelude::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn arrows_map_to_steps() {
        let mut router = InputRouter::new();
        let now = Instant::now();
        assert_eq!(router.route(InputEvent::Key(Key::ArrowRight), now), Some(Intent::Advance));
        assert_eq!(router.route(InputEvent::Key(Key::ArrowLeft), now), Some(Intent::Retreat));
        assert_eq!(router.route(InputEvent::Key(Key::Other), now), None);
    }

    #[test]
    fn clicks_map_to_steps_and_jumps() {
        let mut router = InputRouter::new();
        let now = Instant::now();
        assert_eq!(router.route(InputEvent::Click(Control::Previous), now), Some(Intent::Retreat));
        assert_eq!(router.route(InputEvent::Click(Control::Next), now), Some(Intent::Advance));
        assert_eq!(router.route(InputEvent::Click(Control::Dot(3)), now), Some(Intent::JumpTo(3)));
    }

    #[test]
    fn wheel_sign_picks_direction() {
        let start = Instant::now();
        let mut router = InputRouter::new();
        assert_eq!(router.route(InputEvent::Wheel { delta_y: 120.0 }, start), Some(Intent::Advance));

        let mut router = InputRouter::new();
        assert_eq!(router.route(InputEvent::Wheel { delta_y: -3.0 }, start), Some(Intent::Retreat));
    }

    #[test]
    fn zero_wheel_delta_engages_latch() {
        let start = Instant::now();
        let mut router = InputRouter::new();
        assert_eq!(router.route(InputEvent::Wheel { delta_y: 0.0 }, start), None);
        assert_eq!(router.route(InputEvent::Wheel { delta_y: 1.0 }, start + ms(500)), None);
        assert_eq!(
            router.route(InputEvent::Wheel { delta_y: 1.0 }, start + ms(1000)),
            Some(Intent::Advance)
        );
    }

    #[test]
    fn wheel_burst_advances_once() {
        let start = Instant::now();
        let mut router = InputRouter::new();
        let mut nav = Navigator::new(6);

        for i in 0..20 {
            router.dispatch(InputEvent::Wheel { delta_y: 100.0 }, start + ms(i * 40), &mut nav);
        }
        assert_eq!(nav.current(), 1);

        router.dispatch(InputEvent::Wheel { delta_y: 100.0 }, start + ms(1001), &mut nav);
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn tick_releases_latch() {
        let start = Instant::now();
        let mut router = InputRouter::new();
        router.route(InputEvent::Wheel { delta_y: 1.0 }, start);
        router.tick(start + ms(999));
        assert!(router.latch.release_at.is_some());
        router.tick(start + ms(1000));
        assert!(router.latch.release_at.is_none());
    }

    #[test]
    fn clicks_and_keys_ignore_wheel_latch() {
        let start = Instant::now();
        let mut router = InputRouter::new();
        let mut nav = Navigator::new(6);

        router.dispatch(InputEvent::Wheel { delta_y: 1.0 }, start, &mut nav);
        router.dispatch(InputEvent::Key(Key::ArrowRight), start + ms(10), &mut nav);
        router.dispatch(InputEvent::Click(Control::Next), start + ms(20), &mut nav);
        assert_eq!(nav.current(), 3);

        router.dispatch(InputEvent::Click(Control::Dot(5)), start + ms(30), &mut nav);
        assert_eq!(nav.current(), 5);

        // Still inside the window.
        router.dispatch(InputEvent::Wheel { delta_y: -1.0 }, start + ms(40), &mut nav);
        assert_eq!(nav.current(), 5);
    }

    #[test]
    fn pressing_right_seven_times_wraps() {
        let now = Instant::now();
        let mut router = InputRouter::new();
        let mut nav = Navigator::new(6);
        for _ in 0..6 {
            router.dispatch(InputEvent::Key(Key::ArrowRight), now, &mut nav);
        }
        assert_eq!(nav.current(), 0);
        router.dispatch(InputEvent::Key(Key::ArrowRight), now, &mut nav);
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn progress_dot_scenarios() {
        let now = Instant::now();
        let mut router = InputRouter::new();
        let mut nav = Navigator::new(6);

        router.dispatch(InputEvent::Click(Control::Dot(4)), now, &mut nav);
        assert_eq!(nav.current(), 4);
        assert_eq!(nav.direction(), Direction::Forward);

        router.dispatch(InputEvent::Click(Control::Dot(1)), now, &mut nav);
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.direction(), Direction::Backward);
    }

    proptest! {
        #[test]
        fn one_advance_per_window(
            offsets in prop::collection::vec(0u64..1000, 1..40),
            late in 1000u64..5000,
        ) {
            let start = Instant::now();
            let mut router = InputRouter::new();
            let mut nav = Navigator::new(6);

            let mut offsets = offsets;
            offsets.sort_unstable();
            // The burst starts with the first event of the window.
            offsets[0] = 0;
            for offset in offsets {
                router.dispatch(InputEvent::Wheel { delta_y: 1.0 }, start + ms(offset), &mut nav);
            }
            prop_assert_eq!(nav.current(), 1);

            router.dispatch(InputEvent::Wheel { delta_y: 1.0 }, start + ms(late), &mut nav);
            prop_assert_eq!(nav.current(), 2);
        }
    }
}
