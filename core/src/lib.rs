// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the calendar client: the event form page, its submission routine, and the
//! shared state and navigation it talks to.

mod datetime;
mod form;
mod page;
mod route;
mod state;
mod submit;

pub use crate::datetime::{format_date, format_time, parse_date, parse_time_string, today};
pub use crate::form::{
    DEFAULT_HOUR, DEFAULT_MINUTE, EventFormValues, FormError, MAX_HOUR, MAX_MINUTE,
};
pub use crate::page::{EventFormPage, SubmitError};
pub use crate::route::{History, Navigator, Route};
pub use crate::state::{Action, AppState, SharedState, Store};
pub use crate::submit::{
    Busy, DEFAULT_SUBMIT_DELAY, Operation, StatusMessage, SubmitOutcome, Submitter,
};

/// The name of the application.
pub const APP_NAME: &str = "calclient";
