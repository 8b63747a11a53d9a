// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calclient_api::{EventRecord, UserRecord};
use calclient_core::{parse_date, parse_time_string, today};
use clap::{ArgMatches, Command};
use colored::Colorize;
use jiff::civil::Date;

use crate::arg::CommonArgs;
use crate::event_formatter::EventFormatter;
use crate::session::Session;
use crate::util::OutputFormat;

/// The `/calendar` view: the user's events in date order.
#[derive(Debug, Clone)]
pub struct CmdCalendar {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("List the events in your calendar")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, session: &Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing calendar...");
        let user = session.login().await?;
        print_calendar(&user, today(), self.output_format, self.verbose);
        Ok(())
    }
}

impl Default for CmdCalendar {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Table,
            verbose: false,
        }
    }
}

pub fn print_calendar(user: &UserRecord, today: Date, output_format: OutputFormat, verbose: bool) {
    let events = sorted_events(&user.events);
    if events.is_empty() && output_format == OutputFormat::Table {
        println!("{}", "No events".italic());
        return;
    }

    let mut formatter = EventFormatter::new(today).with_output_format(output_format);
    if verbose {
        formatter = formatter.with_description();
    }
    println!("{}", formatter.format(&events));
}

/// Orders events by date then time. Unparsable dates sort last, keeping their relative order.
fn sorted_events(events: &[EventRecord]) -> Vec<EventRecord> {
    let mut events = events.to_vec();
    events.sort_by_key(|e| {
        (
            parse_date(&e.date).map_or((1, Date::MAX), |d| (0, d)),
            parse_time_string(&e.time),
        )
    });
    events
}
