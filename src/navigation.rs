use crate::state::Direction;

/// Single source of truth for which slide is showing and which way we moved.
#[derive(Debug, Clone)]
pub struct Navigator {
    len: usize,
    current: usize,
    direction: Direction,
}

impl Navigator {
    /// `len` is the deck length and must be at least one.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "cannot navigate an empty deck");
        Self {
            len,
            current: 0,
            direction: Direction::Forward,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn advance(&mut self) {
        self.direction = Direction::Forward;
        self.current = (self.current + 1) % self.len;
    }

    pub fn retreat(&mut self) {
        self.direction = Direction::Backward;
        self.current = (self.current + self.len - 1) % self.len;
    }

    /// Jumps straight to `index`. Jumping onto the current slide is not
    /// short-circuited and leaves the direction `Backward`.
    pub fn jump_to(&mut self, index: usize) {
        debug_assert!(index < self.len, "jump target {index} outside deck of {}", self.len);
        let index = index.min(self.len - 1);
        self.direction = if index > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.current = index;
    }
}
