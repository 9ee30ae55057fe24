// SPDX-License-Identifier: MPL-2.0
//! Validated scheduler tunables.

use super::message::EffectId;
use crate::config::{DEFAULT_ENTER_EFFECT, DEFAULT_EXIT_EFFECT};
use crate::domain::scheduling::{
    ConcurrencyCap, CooldownInterval, DisplayDuration, HistoryCapacity, TransitionDuration,
};

/// Everything that gates the scheduler's state machine.
///
/// Built from [`Config`](crate::config::Config) or directly by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub concurrency_cap: ConcurrencyCap,
    pub display_duration: DisplayDuration,
    pub cooldown_interval: CooldownInterval,
    pub transition_duration: TransitionDuration,
    /// Container reveal, and enter effect for messages without their own.
    pub default_enter_effect: EffectId,
    /// Container conceal, and exit effect for messages without their own.
    pub default_exit_effect: EffectId,
    pub history_capacity: HistoryCapacity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency_cap: ConcurrencyCap::default(),
            display_duration: DisplayDuration::default(),
            cooldown_interval: CooldownInterval::default(),
            transition_duration: TransitionDuration::default(),
            default_enter_effect: EffectId::new(DEFAULT_ENTER_EFFECT),
            default_exit_effect: EffectId::new(DEFAULT_EXIT_EFFECT),
            history_capacity: HistoryCapacity::default(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_concurrency_cap(mut self, cap: usize) -> Self {
        self.concurrency_cap = ConcurrencyCap::new(cap);
        self
    }

    #[must_use]
    pub fn with_display_duration(mut self, duration: DisplayDuration) -> Self {
        self.display_duration = duration;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: CooldownInterval) -> Self {
        self.cooldown_interval = cooldown;
        self
    }

    #[must_use]
    pub fn with_transition_duration(mut self, duration: TransitionDuration) -> Self {
        self.transition_duration = duration;
        self
    }
}
