// SPDX-License-Identifier: MPL-2.0
//! Scheduling newtypes.
//!
//! This module provides type-safe wrappers for the tunables that gate the
//! display scheduler, ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Concurrency Cap
// =============================================================================

/// Concurrency cap bounds (1 to 16 simultaneously displayed messages).
pub mod concurrency_cap_bounds {
    /// Minimum number of concurrently displayed messages.
    pub const MIN: usize = 1;
    /// Maximum number of concurrently displayed messages.
    pub const MAX: usize = 16;
    /// Default number of concurrently displayed messages.
    pub const DEFAULT: usize = 1;
}

/// Maximum number of messages shown at the same time.
///
/// # Example
///
/// ```
/// use torch_scheduler::domain::scheduling::ConcurrencyCap;
///
/// assert_eq!(ConcurrencyCap::new(3).value(), 3);
/// // Zero would stall the scheduler forever, so it is clamped
/// assert_eq!(ConcurrencyCap::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConcurrencyCap(usize);

impl ConcurrencyCap {
    /// Creates a new concurrency cap, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(concurrency_cap_bounds::MIN, concurrency_cap_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns true if `len` displayed messages leave room for one more.
    #[must_use]
    pub fn has_room_for(self, len: usize) -> bool {
        len < self.0
    }
}

impl Default for ConcurrencyCap {
    fn default() -> Self {
        Self(concurrency_cap_bounds::DEFAULT)
    }
}

// =============================================================================
// Display Duration
// =============================================================================

/// Display duration bounds in milliseconds.
pub mod display_duration_bounds {
    /// Short display duration (2 seconds).
    pub const SHORT_MS: u64 = 2_000;
    /// Long display duration (5 seconds).
    pub const LONG_MS: u64 = 5_000;
    /// Maximum display duration (10 minutes).
    pub const MAX_MS: u64 = 600_000;
    /// Default display duration.
    pub const DEFAULT_MS: u64 = SHORT_MS;
}

/// How long a message stays displayed before it expires.
///
/// Zero means the message never expires on its own; it leaves the display
/// only through a manual dismiss or an interrupting clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayDuration(Duration);

impl DisplayDuration {
    /// A duration that never auto-expires.
    pub const NEVER: Self = Self(Duration::ZERO);

    /// Creates a display duration, clamping to the maximum.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self(duration.min(Duration::from_millis(display_duration_bounds::MAX_MS)))
    }

    /// Creates a display duration from milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Returns the duration.
    #[must_use]
    pub fn value(self) -> Duration {
        self.0
    }

    /// Returns the expiry delay, or `None` when the message never expires.
    #[must_use]
    pub fn expiry(self) -> Option<Duration> {
        (!self.0.is_zero()).then_some(self.0)
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self::from_millis(display_duration_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Cooldown Interval
// =============================================================================

/// Cooldown bounds in milliseconds.
pub mod cooldown_bounds {
    /// Maximum cooldown between removals (10 seconds).
    pub const MAX_MS: u64 = 10_000;
    /// Default cooldown between removals.
    pub const DEFAULT_MS: u64 = 300;
}

/// Minimum delay between a removal's completion and the next removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CooldownInterval(Duration);

impl CooldownInterval {
    /// Creates a cooldown interval, clamping to the maximum.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self(duration.min(Duration::from_millis(cooldown_bounds::MAX_MS)))
    }

    /// Creates a cooldown interval from milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Returns the interval.
    #[must_use]
    pub fn value(self) -> Duration {
        self.0
    }
}

impl Default for CooldownInterval {
    fn default() -> Self {
        Self::from_millis(cooldown_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Transition Duration
// =============================================================================

/// Transition duration bounds in milliseconds.
pub mod transition_bounds {
    /// Minimum transition duration.
    pub const MIN_MS: u64 = 0;
    /// Maximum transition duration (5 seconds).
    pub const MAX_MS: u64 = 5_000;
    /// Default transition duration.
    pub const DEFAULT_MS: u64 = 300;
}

/// Duration hint passed to the surface for every transition effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionDuration(Duration);

impl TransitionDuration {
    /// Creates a transition duration from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(
            millis.clamp(transition_bounds::MIN_MS, transition_bounds::MAX_MS),
        ))
    }

    /// Returns the duration.
    #[must_use]
    pub fn value(self) -> Duration {
        self.0
    }
}

impl Default for TransitionDuration {
    fn default() -> Self {
        Self::from_millis(transition_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// History Capacity
// =============================================================================

/// Transition history capacity bounds.
pub mod history_capacity_bounds {
    /// Minimum history capacity.
    pub const MIN: usize = 8;
    /// Maximum history capacity.
    pub const MAX: usize = 1024;
    /// Default history capacity.
    pub const DEFAULT: usize = 64;
}

/// Number of transition records kept for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Creates a new history capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(history_capacity_bounds::MIN, history_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(history_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
