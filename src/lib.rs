// SPDX-License-Identifier: MPL-2.0
//! `torch_scheduler` paces short-lived in-layout messages.
//!
//! Messages are queued, shown a few at a time inside a host container, and
//! taken away again with animated transitions that never overlap. The core is
//! a clock-free state machine ([`notifications::Scheduler`]); [`service`]
//! drives it on tokio, and [`app`] is a terminal demo built on both.

#![doc(html_root_url = "https://docs.rs/torch_scheduler/0.1.0")]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod service;
#[doc(hidden)]
pub mod test_utils;
