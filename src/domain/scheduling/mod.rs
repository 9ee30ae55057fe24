// SPDX-License-Identifier: MPL-2.0
//! Scheduling domain types.

mod newtypes;

pub use newtypes::{
    concurrency_cap_bounds, cooldown_bounds, display_duration_bounds, history_capacity_bounds,
    transition_bounds, ConcurrencyCap, CooldownInterval, DisplayDuration, HistoryCapacity,
    TransitionDuration,
};
