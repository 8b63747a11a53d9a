// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use calclient_api::EventRecord;
use calclient_core::parse_date;
use colored::Color;
use jiff::civil::Date;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(today: Date) -> Self {
        Self {
            columns: vec![
                EventColumn::Id,
                EventColumn::Date { today },
                EventColumn::Time,
                EventColumn::Header,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_description(mut self) -> Self {
        self.columns.push(EventColumn::Description);
        self
    }

    pub fn format<'a>(&'a self, events: &'a [EventRecord]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [EventRecord],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(f, "{}", Table::new(TableStyleJson::new(), columns, self.events)),
            OutputFormat::Table => write!(f, "{}", Table::new(TableStyleBasic::new(), columns, self.events)),
        }
    }
}

#[derive(Debug, Clone)]
enum EventColumn {
    Id,
    Date { today: Date },
    Time,
    Header,
    Description,
}

impl TableColumn<EventRecord> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id => "id",
            EventColumn::Date { .. } => "date",
            EventColumn::Time => "time",
            EventColumn::Header => "header",
            EventColumn::Description => "description",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a EventRecord) -> Cow<'a, str> {
        match self {
            EventColumn::Id => match &event.id {
                Some(id) => format!("#{id}").into(),
                None => "".into(),
            },
            EventColumn::Date { .. } => event.date.as_str().into(),
            EventColumn::Time => event.time.as_str().into(),
            EventColumn::Header => event.header.as_str().into(),
            EventColumn::Description => event.description.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, event: &EventRecord) -> Option<Color> {
        let EventColumn::Date { today } = self else {
            return None;
        };
        match parse_date(&event.date)?.cmp(today) {
            std::cmp::Ordering::Less => Some(Color::BrightBlack),
            std::cmp::Ordering::Equal => Some(Color::Yellow),
            std::cmp::Ordering::Greater => None,
        }
    }
}
