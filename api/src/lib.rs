// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the calendar backend: events are created and updated per user, and the
//! user record is fetched back to refresh client state.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::single_match_else, clippy::match_bool)]

mod client;
mod config;
mod error;
mod http;
mod types;

pub use crate::client::{ApiClient, CalendarApi};
pub use crate::config::{ApiConfig, AuthMethod};
pub use crate::error::ApiError;
pub use crate::types::{EventDraft, EventId, EventRecord, UserRecord};
