// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calclient_api::EventId;
use calclient_core::{
    Action, EventFormPage, EventFormValues, Navigator, Route, SharedState, StatusMessage, today,
};
use clap::{ArgMatches, Command};
use colored::Colorize;
use jiff::civil::Date;

use crate::arg::{CommonArgs, EventArgs};
use crate::cmd_calendar::print_calendar;
use crate::session::Session;
use crate::tui;
use crate::util::OutputFormat;

/// Field values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub header: Option<String>,
    pub description: Option<String>,
    pub date: Option<Date>,
    pub time: Option<(u32, u32)>,
}

impl EventFields {
    fn from(matches: &ArgMatches) -> Self {
        Self {
            header: EventArgs::get_header(matches),
            description: EventArgs::get_description(matches),
            date: EventArgs::get_date(matches),
            time: EventArgs::get_time(matches),
        }
    }

    /// No field was given, so the form is filled in interactively.
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
    }

    /// Overwrites the given fields, leaving the others as seeded.
    pub fn apply(&self, values: &mut EventFormValues) {
        if let Some(header) = &self.header {
            values.header.clone_from(header);
        }
        if let Some(description) = &self.description {
            values.description.clone_from(description);
        }
        if let Some(date) = self.date {
            values.date = date;
        }
        if let Some((hour, minute)) = self.time {
            values.hour = hour;
            values.minute = minute;
        }
    }
}

fn command_args(cmd: Command) -> Command {
    cmd.arg(EventArgs::header())
        .arg(EventArgs::description())
        .arg(EventArgs::date())
        .arg(EventArgs::time())
        .arg(CommonArgs::output_format())
        .arg(CommonArgs::verbose())
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub fields: EventFields,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        command_args(Command::new(Self::NAME).alias("add").about("Create a new event"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let fields = EventFields::from(matches);
        Self {
            tui: fields.is_empty(),
            fields,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, session: &Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating new event...");
        session.login().await?;
        session.store.dispatch(Action::SetCurrentEvent(None));
        open_event_page(session, &self.fields, self.tui, self.output_format, self.verbose).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: EventId,
    pub fields: EventFields,

    pub tui: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        command_args(
            Command::new(Self::NAME)
                .about("Edit an event")
                .arg(EventArgs::id()),
        )
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let id = EventArgs::get_id(matches).ok_or("Event id is required")?;
        let fields = EventFields::from(matches);
        Ok(Self {
            id,
            tui: fields.is_empty(),
            fields,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run(self, session: &Session) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let user = session.login().await?;
        let event = user
            .find_event(&self.id)
            .cloned()
            .ok_or_else(|| format!("Event not found: {}", self.id))?;

        session.store.dispatch(Action::SetCurrentEvent(Some(event)));
        open_event_page(session, &self.fields, self.tui, self.output_format, self.verbose).await
    }
}

/// Shows the event form, interactively or filled from `fields`, then renders wherever the
/// page left the user.
async fn open_event_page(
    session: &Session,
    fields: &EventFields,
    tui: bool,
    output_format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    session.history.push(Route::Event);
    let mut page = EventFormPage::mount(&session.store, &session.history, today())
        .ok_or("Not logged in")?
        .with_submit_delay(session.config.submit_delay());

    if tui {
        tui::edit_event(&mut page, session).await?;
    } else {
        fields.apply(page.values_mut());
        page.submit(&session.api, &session.store, &session.history)
            .await?;
    }

    match session.history.current() {
        Some(Route::Calendar) => {
            if let Some(status @ (StatusMessage::Created | StatusMessage::Updated)) = page.status()
            {
                println!("{}", status.to_string().green());
            }
            let user = session.store.user().ok_or("Not logged in")?;
            print_calendar(&user, today(), output_format, verbose);
            Ok(())
        }
        Some(Route::Event) => Err(page
            .status()
            .map_or_else(|| "Event was not saved".to_string(), |s| s.to_string())
            .into()),
        Some(Route::Root) | None => Err("Not logged in".into()),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_parse_new_tui() {
        let cmd = CmdEventNew::command();
        let matches = cmd.try_get_matches_from(["new"]).unwrap();
        let parsed = CmdEventNew::from(&matches);
        assert!(parsed.tui);
        assert!(parsed.fields.is_empty());
        assert_eq!(parsed.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_new_headless() {
        let cmd = CmdEventNew::command();
        let matches = cmd
            .try_get_matches_from([
                "new",
                "--header",
                "Lunch",
                "--description",
                "Pizza",
                "--date",
                "2025-06-01",
                "--time",
                "13:05",
                "--output-format",
                "json",
            ])
            .unwrap();
        let parsed = CmdEventNew::from(&matches);
        assert!(!parsed.tui);
        assert_eq!(
            parsed.fields,
            EventFields {
                header: Some("Lunch".to_string()),
                description: Some("Pizza".to_string()),
                date: Some(date(2025, 6, 1)),
                time: Some((13, 5)),
            }
        );
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_new_rejects_bad_time() {
        let cmd = CmdEventNew::command();
        let result = cmd.try_get_matches_from(["new", "--time", "1pm"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_edit() {
        let cmd = CmdEventEdit::command();
        let matches = cmd
            .try_get_matches_from(["edit", "42", "--header", "Renamed"])
            .unwrap();
        let parsed = CmdEventEdit::from(&matches).unwrap();
        assert_eq!(parsed.id, EventId::from("42"));
        assert_eq!(parsed.fields.header, Some("Renamed".to_string()));
        assert!(!parsed.tui);
    }

    #[test]
    fn test_parse_edit_requires_id() {
        let cmd = CmdEventEdit::command();
        assert!(cmd.try_get_matches_from(["edit"]).is_err());
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut values = EventFormValues::new(date(2025, 6, 1));
        values.header = "Dentist".to_string();
        values.description = "Checkup".to_string();

        let fields = EventFields {
            time: Some((9, 45)),
            ..Default::default()
        };
        fields.apply(&mut values);

        assert_eq!(values.header, "Dentist");
        assert_eq!(values.description, "Checkup");
        assert_eq!(values.date, date(2025, 6, 1));
        assert_eq!((values.hour, values.minute), (9, 45));
    }
}
