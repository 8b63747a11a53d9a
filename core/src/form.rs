// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt};

use calclient_api::{EventDraft, EventRecord};
use jiff::civil::Date;

use crate::datetime::{format_date, format_time, parse_date, parse_time_string};

/// Hour a new event starts at.
pub const DEFAULT_HOUR: u32 = 12;

/// Minute a new event starts at.
pub const DEFAULT_MINUTE: u32 = 30;

/// Largest hour the form accepts.
pub const MAX_HOUR: u32 = 24;

/// Largest minute the form accepts.
pub const MAX_MINUTE: u32 = 60;

/// Values being edited on the event form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFormValues {
    pub header: String,
    pub description: String,
    pub date: Date,
    pub hour: u32,
    pub minute: u32,
}

impl EventFormValues {
    /// Blank form for a new event on `today`.
    pub fn new(today: Date) -> Self {
        Self {
            header: String::new(),
            description: String::new(),
            date: today,
            hour: DEFAULT_HOUR,
            minute: DEFAULT_MINUTE,
        }
    }

    /// Form seeded from an existing event. Fields that fail to parse keep the defaults of a
    /// new event.
    pub fn from_event(event: &EventRecord, today: Date) -> Self {
        let date = parse_date(&event.date).unwrap_or_else(|| {
            tracing::warn!(date = %event.date, "unparsable event date, using today");
            today
        });

        let (hour, minute) = parse_time_string(&event.time).unwrap_or_else(|| {
            tracing::warn!(time = %event.time, "unparsable event time, using default");
            (DEFAULT_HOUR, DEFAULT_MINUTE)
        });

        Self {
            header: event.header.clone(),
            description: event.description.clone(),
            date,
            hour,
            minute,
        }
    }

    /// Seeds the form from the current event when editing, or with defaults when creating.
    pub fn initial(current: Option<&EventRecord>, today: Date) -> Self {
        match current {
            Some(event) => Self::from_event(event, today),
            None => Self::new(today),
        }
    }

    /// Checks the required fields and the ranges of the time inputs. Only an empty text
    /// field counts as missing, whitespace is accepted as typed.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.header.is_empty() {
            return Err(FormError::Required("header"));
        }
        if self.description.is_empty() {
            return Err(FormError::Required("description"));
        }
        if self.hour > MAX_HOUR {
            return Err(FormError::OutOfRange {
                field: "hour",
                value: self.hour,
                max: MAX_HOUR,
            });
        }
        if self.minute > MAX_MINUTE {
            return Err(FormError::OutOfRange {
                field: "minute",
                value: self.minute,
                max: MAX_MINUTE,
            });
        }
        Ok(())
    }

    /// Builds the payload sent to the backend.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            header: self.header.clone(),
            description: self.description.clone(),
            date: format_date(self.date),
            time: format_time(self.hour, self.minute),
        }
    }
}

/// Reasons the form refuses to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty.
    Required(&'static str),

    /// A numeric field is above its maximum.
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "The {field} field is required"),
            Self::OutOfRange { field, value, max } => {
                write!(f, "The {field} must be between 0 and {max}, got {value}")
            }
        }
    }
}

impl Error for FormError {}

#[cfg(test)]
mod tests {
    use calclient_api::EventId;
    use jiff::civil::date;

    use super::*;

    fn event(time: &str) -> EventRecord {
        EventRecord {
            id: Some(EventId::from("42")),
            header: "Dentist".to_string(),
            description: "Bring the insurance card".to_string(),
            date: "2023-1-05".to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn initial_without_current_event() {
        let today = date(2025, 6, 1);
        let values = EventFormValues::initial(None, today);
        assert_eq!(values.header, "");
        assert_eq!(values.description, "");
        assert_eq!(values.date, today);
        assert_eq!(values.hour, 12);
        assert_eq!(values.minute, 30);
    }

    #[test]
    fn initial_from_current_event() {
        let values = EventFormValues::initial(Some(&event("09:45")), date(2025, 6, 1));
        assert_eq!(values.header, "Dentist");
        assert_eq!(values.description, "Bring the insurance card");
        assert_eq!(values.date, date(2023, 1, 5));
        assert_eq!(values.hour, 9);
        assert_eq!(values.minute, 45);
    }

    #[test]
    fn initial_falls_back_on_bad_fields() {
        let mut broken = event("soon");
        broken.date = "someday".to_string();
        let today = date(2025, 6, 1);
        let values = EventFormValues::initial(Some(&broken), today);
        assert_eq!(values.header, "Dentist");
        assert_eq!(values.date, today);
        assert_eq!((values.hour, values.minute), (DEFAULT_HOUR, DEFAULT_MINUTE));
    }

    #[test]
    fn draft_uses_wire_formats() {
        let values = EventFormValues {
            header: "Lunch".to_string(),
            description: "Pizza".to_string(),
            date: date(2023, 1, 5),
            hour: 9,
            minute: 5,
        };
        let draft = values.to_draft();
        assert_eq!(draft.header, "Lunch");
        assert_eq!(draft.description, "Pizza");
        assert_eq!(draft.date, "2023-1-05");
        assert_eq!(draft.time, "09:05");
    }

    #[test]
    fn validate_requires_text_fields() {
        let mut values = EventFormValues::new(date(2025, 6, 1));
        assert_eq!(values.validate(), Err(FormError::Required("header")));

        values.header = "Lunch".to_string();
        assert_eq!(values.validate(), Err(FormError::Required("description")));

        values.description = "Pizza".to_string();
        assert_eq!(values.validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_whitespace_text() {
        let mut values = EventFormValues::new(date(2025, 6, 1));
        values.header = " ".to_string();
        values.description = "   ".to_string();
        assert_eq!(values.validate(), Ok(()));
    }

    #[test]
    fn validate_time_ranges() {
        let mut values = EventFormValues::initial(Some(&event("09:45")), date(2025, 6, 1));
        values.hour = 24;
        values.minute = 60;
        assert_eq!(values.validate(), Ok(()));

        values.hour = 25;
        assert!(matches!(
            values.validate(),
            Err(FormError::OutOfRange { field: "hour", .. })
        ));

        values.hour = 0;
        values.minute = 61;
        assert!(matches!(
            values.validate(),
            Err(FormError::OutOfRange { field: "minute", .. })
        ));
    }
}
