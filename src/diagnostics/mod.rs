// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the display scheduler.
//!
//! The scheduler keeps a memory-bounded history of the transitions it ran,
//! so hosts and tests can check pacing (cooldown spacing, replace versus
//! plain removal) after the fact. Live logging goes through `tracing`.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`TransitionRecord`]: One finished transition

mod buffer;
mod events;

pub use buffer::CircularBuffer;
pub use events::{TransitionKind, TransitionOutcome, TransitionRecord};
