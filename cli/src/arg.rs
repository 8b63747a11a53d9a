// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calclient_api::EventId;
use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::civil::Date;

use crate::util::{OutputFormat, parse_date_input, parse_time_input};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The id of the event to edit")
    }

    pub fn get_id(matches: &ArgMatches) -> Option<EventId> {
        matches
            .get_one::<String>("id")
            .map(|id| EventId::from(id.as_str()))
    }

    pub fn header() -> Arg {
        arg!(--header <HEADER> "Title of the event")
    }

    pub fn get_header(matches: &ArgMatches) -> Option<String> {
        matches.get_one("header").cloned()
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn date() -> Arg {
        arg!(--date <DATE> "Date of the event, YYYY-MM-DD").value_parser(parse_date_input)
    }

    pub fn get_date(matches: &ArgMatches) -> Option<Date> {
        matches.get_one("date").copied()
    }

    pub fn time() -> Arg {
        arg!(--time <TIME> "Time of the event, HH:MM").value_parser(parse_time_input)
    }

    pub fn get_time(matches: &ArgMatches) -> Option<(u32, u32)> {
        matches.get_one("time").copied()
    }
}
