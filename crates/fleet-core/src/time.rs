//! Ticks, delivery windows, and the clock.
//!
//! One tick is one simulated minute.  Edge weights, delivery windows and
//! lateness are all whole ticks; `SimClock` maps ticks to Unix seconds
//! (`start_unix_secs + tick * tick_duration_secs`) for output only.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A simulated minute, counted from the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Signed difference `self - other`.  Used for lateness, which may be
    /// negative when an order is delivered early.
    #[inline]
    pub fn signed_diff(self, other: Tick) -> i64 {
        self.0 as i64 - other.0 as i64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickInterval ──────────────────────────────────────────────────────────────

/// A closed interval `[start, end]` of ticks, used as an order's delivery
/// window.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInterval {
    start: Tick,
    end:   Tick,
}

impl TickInterval {
    /// # Errors
    /// Returns [`CoreError::InvertedInterval`] if `start > end`.
    pub fn new(start: Tick, end: Tick) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvertedInterval { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> Tick {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Tick {
        self.end
    }

    #[inline]
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick <= self.end
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The vehicle manager's current tick plus its wall-clock anchor.
///
/// Only the tick engine advances it; everything else reads `current_tick`
/// or converts ticks to Unix seconds for output.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix seconds at tick 0.
    pub start_unix_secs:    i64,
    /// Seconds per tick.  One simulated minute by default.
    pub tick_duration_secs: u32,
    /// The last completed tick; `T0` before the first.
    pub current_tick:       Tick,
}

impl SimClock {
    pub const DEFAULT_TICK_SECS: u32 = 60;

    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self { start_unix_secs, tick_duration_secs, current_tick: Tick::ZERO }
    }

    /// A default-anchored clock whose last completed tick is `tick`.
    pub fn starting_at(tick: Tick) -> Self {
        Self { current_tick: tick, ..Self::default() }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * i64::from(self.tick_duration_secs)
    }

    /// `(day, hour, minute)` of the current tick, counted from tick 0.
    pub fn day_and_time(&self) -> (u64, u32, u32) {
        let secs = self.current_tick.0 * u64::from(self.tick_duration_secs);
        let minutes = secs / 60;
        ((minutes / 1440), ((minutes % 1440) / 60) as u32, (minutes % 60) as u32)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_TICK_SECS)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (day, hour, minute) = self.day_and_time();
        write!(f, "{} (day {day}, {hour:02}:{minute:02})", self.current_tick)
    }
}
