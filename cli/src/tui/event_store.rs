// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use calclient_core::{EventFormValues, StatusMessage};

use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::parse_date_input;

/// Text the user is typing into the event form, kept apart from the page values until the
/// form is submitted.
#[derive(Debug)]
pub struct EventStore {
    pub data: EventData,
    pub status: Option<Status>,
}

impl EventStore {
    pub fn new(values: &EventFormValues) -> Self {
        Self {
            data: EventData {
                header: values.header.clone(),
                description: values.description.clone(),
                date: values.date.to_string(),
                hour: Some(values.hour),
                minute: Some(values.minute),
            },
            status: None,
        }
    }

    /// Copies the typed values into `values`. Fails when a field cannot be read, leaving
    /// `values` untouched.
    pub fn apply_to(&self, values: &mut EventFormValues) -> Result<(), String> {
        let date = parse_date_input(&self.data.date)?;
        let hour = self.data.hour.ok_or("hour is required")?;
        let minute = self.data.minute.ok_or("minute is required")?;

        values.header.clone_from(&self.data.header);
        values.description.clone_from(&self.data.description);
        values.date = date;
        values.hour = hour;
        values.minute = minute;
        Ok(())
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::UpdateHeader(v) => that.data.header = v.clone(),
                Action::UpdateDescription(v) => that.data.description = v.clone(),
                Action::UpdateDate(v) => that.data.date = v.clone(),
                Action::UpdateHour(v) => that.data.hour = *v,
                Action::UpdateMinute(v) => that.data.minute = *v,
                Action::SetStatus(v) => that.status = v.clone(),
            }
        }));
        dispatcher.register(callback);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventData {
    pub header: String,
    pub description: String,
    pub date: String,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

/// The line shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Pending,
    Success,
    Error,
}

impl Status {
    pub fn error(text: impl ToString) -> Self {
        Self {
            text: text.to_string(),
            kind: StatusKind::Error,
        }
    }
}

impl From<StatusMessage> for Status {
    fn from(msg: StatusMessage) -> Self {
        let kind = match msg {
            StatusMessage::Submitting => StatusKind::Pending,
            StatusMessage::Created | StatusMessage::Updated => StatusKind::Success,
            StatusMessage::WriteFailed | StatusMessage::ReloginRequired => StatusKind::Error,
        };
        Self {
            text: msg.to_string(),
            kind,
        }
    }
}
