//! Discrete day clock.
//!
//! Time only moves forward and only one day at a time: a multi-day action
//! invokes the tick callback once per elapsed day, never with a bulk delta.

/// Day counter driving the world tick.
///
/// Day 0 is the start of a campaign; the first elapsed day is day 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeEngine {
    day: u32,
}

impl TimeEngine {
    pub const fn new() -> Self {
        Self { day: 0 }
    }

    /// Clock positioned at `day` (used when replaying recorded changes).
    pub const fn at(day: u32) -> Self {
        Self { day }
    }

    /// Advances `by_days` days, calling `on_day` with each new day number in order.
    pub fn advance(&mut self, by_days: u32, mut on_day: impl FnMut(u32)) {
        for _ in 0..by_days {
            self.day = self.day.saturating_add(1);
            on_day(self.day);
        }
    }

    pub const fn current_time(&self) -> u32 {
        self.day
    }

    /// True when the current day is a positive multiple of `interval`.
    pub const fn check_threshold(&self, interval: u32) -> bool {
        interval > 0 && self.day > 0 && self.day % interval == 0
    }
}
