// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Display**: Concurrency cap and display durations
//! - **Throttling**: Cooldown between removals and transition timing
//! - **Effects**: Default transition effect identifiers
//! - **History**: Transition history capacity

use crate::domain::scheduling::{
    concurrency_cap_bounds, cooldown_bounds, display_duration_bounds, history_capacity_bounds,
    transition_bounds,
};

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Default number of messages displayed at once.
pub const DEFAULT_CONCURRENCY_CAP: usize = concurrency_cap_bounds::DEFAULT;

/// Minimum concurrency cap.
pub const MIN_CONCURRENCY_CAP: usize = concurrency_cap_bounds::MIN;

/// Maximum concurrency cap.
pub const MAX_CONCURRENCY_CAP: usize = concurrency_cap_bounds::MAX;

/// Short display duration (in milliseconds).
pub const LENGTH_SHORT_MS: u64 = display_duration_bounds::SHORT_MS;

/// Long display duration (in milliseconds).
pub const LENGTH_LONG_MS: u64 = display_duration_bounds::LONG_MS;

/// Default display duration (in milliseconds). Zero disables auto-expiry.
pub const DEFAULT_DISPLAY_DURATION_MS: u64 = display_duration_bounds::DEFAULT_MS;

// ==========================================================================
// Throttling Defaults
// ==========================================================================

/// Default delay between one removal's completion and the next removal.
pub const DEFAULT_COOLDOWN_MS: u64 = cooldown_bounds::DEFAULT_MS;

/// Maximum cooldown (in milliseconds).
pub const MAX_COOLDOWN_MS: u64 = cooldown_bounds::MAX_MS;

/// Default duration hint for every transition effect (in milliseconds).
pub const DEFAULT_TRANSITION_MS: u64 = transition_bounds::DEFAULT_MS;

/// Maximum transition duration hint (in milliseconds).
pub const MAX_TRANSITION_MS: u64 = transition_bounds::MAX_MS;

// ==========================================================================
// Effect Defaults
// ==========================================================================

/// Effect used to reveal the container and for messages without their own
/// enter effect.
pub const DEFAULT_ENTER_EFFECT: u32 = 1;

/// Effect used to conceal the container and for messages without their own
/// exit effect.
pub const DEFAULT_EXIT_EFFECT: u32 = 2;

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default number of transition records kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = history_capacity_bounds::DEFAULT;

/// Minimum number of transition records kept.
pub const MIN_HISTORY_CAPACITY: usize = history_capacity_bounds::MIN;

/// Maximum number of transition records kept.
pub const MAX_HISTORY_CAPACITY: usize = history_capacity_bounds::MAX;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_CONCURRENCY_CAP > 0);
    assert!(MAX_CONCURRENCY_CAP >= MIN_CONCURRENCY_CAP);
    assert!(DEFAULT_CONCURRENCY_CAP >= MIN_CONCURRENCY_CAP);
    assert!(DEFAULT_CONCURRENCY_CAP <= MAX_CONCURRENCY_CAP);

    assert!(LENGTH_LONG_MS > LENGTH_SHORT_MS);
    assert!(DEFAULT_COOLDOWN_MS <= MAX_COOLDOWN_MS);
    assert!(DEFAULT_TRANSITION_MS <= MAX_TRANSITION_MS);

    assert!(DEFAULT_ENTER_EFFECT != DEFAULT_EXIT_EFFECT);

    assert!(MIN_HISTORY_CAPACITY > 0);
    assert!(DEFAULT_HISTORY_CAPACITY >= MIN_HISTORY_CAPACITY);
    assert!(DEFAULT_HISTORY_CAPACITY <= MAX_HISTORY_CAPACITY);
};
