//! COS edge detector with stuck-carrier watchdog.
//!
//! The node is only told about *changes*: a rising edge keys it, a falling
//! edge unkeys it, and an unchanged level produces nothing.  Asterisk must
//! not be sent a command on every poll.
//!
//! While COS stays active the watchdog counts down one tick per sample.
//! When the budget runs out the node is unkeyed once; the watchdog then
//! stays disarmed until the next rising edge re-arms it.
//!
//! ```text
//!            rising edge                     budget spent
//!  Disarmed ──────────────▶ Armed(n) ──...──▶ Armed(0) ──▶ Disarmed
//!     ▲                        │                 (unkey)
//!     └────── falling edge ────┘
//! ```

/// COS level that means "carrier present".
const ACTIVE: bool = true;

/// Why the node was unkeyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnkeyReason {
    /// COS dropped (falling edge).
    Released,
    /// COS stayed active for the whole watchdog budget.
    TimedOut,
}

/// Command the scheduler should send after a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CosIntent {
    Key,
    Unkey(UnkeyReason),
}

pub struct CosWatchdog {
    last_level: bool,
    /// `None` = disarmed, `Some(n)` = n ticks of budget left.
    ticks_remaining: Option<u32>,
    timeout_ticks: u32,
    timeout_enabled: bool,
}

impl CosWatchdog {
    /// `initial_level` must be a real sample of the pin so start-up is not
    /// mistaken for an edge.
    pub fn new(initial_level: bool, timeout_ticks: u32, timeout_enabled: bool) -> Self {
        Self {
            last_level: initial_level,
            ticks_remaining: None,
            timeout_ticks,
            timeout_enabled,
        }
    }

    /// Consume one sample.  Returns the command to send, if any.
    pub fn on_sample(&mut self, level: bool) -> Option<CosIntent> {
        if level != self.last_level {
            self.last_level = level;
            return if level == ACTIVE {
                self.ticks_remaining = self.timeout_enabled.then_some(self.timeout_ticks);
                Some(CosIntent::Key)
            } else {
                self.ticks_remaining = None;
                Some(CosIntent::Unkey(UnkeyReason::Released))
            };
        }

        if !self.timeout_enabled {
            return None;
        }

        match self.ticks_remaining {
            Some(n) if n > 0 && level == ACTIVE => {
                let left = n - 1;
                // Fires on the tick the countdown reaches zero, not one later.
                if left == 0 {
                    self.ticks_remaining = None;
                    Some(CosIntent::Unkey(UnkeyReason::TimedOut))
                } else {
                    self.ticks_remaining = Some(left);
                    None
                }
            }
            Some(0) => {
                self.ticks_remaining = None;
                Some(CosIntent::Unkey(UnkeyReason::TimedOut))
            }
            _ => None,
        }
    }

    /// Ticks left before a forced unkey, or `None` if disarmed.
    pub fn ticks_remaining(&self) -> Option<u32> {
        self.ticks_remaining
    }

    pub fn is_armed(&self) -> bool {
        self.ticks_remaining.is_some()
    }
}
