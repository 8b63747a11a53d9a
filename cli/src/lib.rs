// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of the calendar client: configuration, logging, the calendar
//! listing and the terminal event form.

mod arg;
mod cli;
mod cmd_calendar;
mod cmd_event;
mod config;
mod event_formatter;
mod session;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
