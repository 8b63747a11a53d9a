// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode};

use calclient_core::APP_NAME;
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_calendar::CmdCalendar;
use crate::cmd_event::{CmdEventEdit, CmdEventNew};
use crate::config::parse_config;
use crate::session::Session;

const CALCLIENT_LOG_ENV: &str = "CALCLIENT_LOG";

/// Run the calendar client command-line interface.
pub async fn run() -> ExitCode {
    init_tracing();
    let result = match Cli::parse() {
        Ok(cli) => cli.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(CALCLIENT_LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // logs go to stderr so they stay out of the TUI and of piped output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Overrides the username from the configuration file
    pub user: Option<String>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Create and edit the events of your calendar.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to calendar
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/calclient/config.toml on Linux and \
MacOS, %APPDATA%/calclient/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(-u --user <USER> "Username to log in as, overrides the configuration"))
            .subcommand(CmdCalendar::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Create or edit an event")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdCalendar::NAME, matches)) => Calendar(CmdCalendar::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)?),
                _ => unreachable!(),
            },
            None => Calendar(CmdCalendar::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        let user = matches.get_one("user").cloned();
        Ok(Cli {
            config,
            user,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config, self.user).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List the events of the calendar
    Calendar(CmdCalendar),

    /// Create a new event
    EventNew(CmdEventNew),

    /// Edit an existing event
    EventEdit(CmdEventEdit),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>, user: Option<String>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Calendar(a)  => Self::run_with(config, user, |x| a.run(x).boxed_local()).await,
            EventNew(a)  => Self::run_with(config, user, |x| a.run(x).boxed_local()).await,
            EventEdit(a) => Self::run_with(config, user, |x| a.run(x).boxed_local()).await,
        }
    }

    async fn run_with<F>(
        config: Option<PathBuf>,
        user: Option<String>,
        f: F,
    ) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Session) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let mut config = parse_config(config).await?;
        if let Some(user) = user {
            config.username = user;
        }

        let session = Session::new(config)?;
        f(&session).await
    }
}
