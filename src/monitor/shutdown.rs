//! Shutdown push-button debouncer.
//!
//! The button must be held for more than `activate_count` consecutive
//! polls before a shutdown is requested.  Any released sample starts the
//! count over, so bounce and brief knocks are ignored.

/// Request to run the shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownIntent {
    /// Consecutive pressed ticks at the moment it fired.
    pub held_ticks: u32,
}

pub struct ShutdownDebouncer {
    pressed_count: u32,
    activate_count: u32,
    fired: bool,
}

impl ShutdownDebouncer {
    pub fn new(activate_count: u32) -> Self {
        Self {
            pressed_count: 0,
            activate_count,
            fired: false,
        }
    }

    /// Consume one sample.  `pressed` is already normalised (active-low pin
    /// reads LOW → `true`).
    pub fn on_sample(&mut self, pressed: bool) -> Option<ShutdownIntent> {
        if !pressed {
            self.pressed_count = 0;
            return None;
        }

        self.pressed_count = self.pressed_count.saturating_add(1);
        if self.pressed_count > self.activate_count && !self.fired {
            self.fired = true;
            return Some(ShutdownIntent {
                held_ticks: self.pressed_count,
            });
        }
        None
    }

    pub fn pressed_count(&self) -> u32 {
        self.pressed_count
    }

    /// Whether the intent has already been emitted this run.
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
