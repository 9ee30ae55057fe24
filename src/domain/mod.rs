// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core scheduling values with ZERO external dependencies.
//!
//! This module contains pure domain types and value objects. It has no
//! dependencies on external crates (except `std`) to ensure testability.
//!
//! # Modules
//!
//! - [`scheduling`]: Scheduler tunables ([`ConcurrencyCap`](scheduling::ConcurrencyCap),
//!   [`DisplayDuration`](scheduling::DisplayDuration),
//!   [`CooldownInterval`](scheduling::CooldownInterval),
//!   [`TransitionDuration`](scheduling::TransitionDuration),
//!   [`HistoryCapacity`](scheduling::HistoryCapacity))

pub mod scheduling;
