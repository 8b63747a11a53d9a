// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use ratatui::crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Form, FormItem, Input};
use crate::tui::component_form_util::PositiveIntegerAccess;
use crate::tui::component_page::{SinglePage, StatusLine};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::{EventStore, StatusKind};

type S = EventStore;

pub struct EventEditor(SinglePage<S, EventForm, EventStatusLine>);

impl EventEditor {
    pub fn new(title: &str) -> Self {
        Self(SinglePage::new(title, EventForm::new()))
    }
}

impl Component<S> for EventEditor {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.deactivate(dispatcher, store);
    }
}

pub struct EventForm(Form<S, Box<dyn FormItem<S>>>);

impl EventForm {
    pub fn new() -> Self {
        Self(Form::new(vec![
            Box::new(new_header()),
            Box::new(new_description()),
            Box::new(new_date()),
            Box::new(new_hour()),
            Box::new(new_minute()),
        ]))
    }
}

impl Component<S> for EventForm {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.deactivate(dispatcher, store);
    }
}

pub struct EventStatusLine;

impl StatusLine<S> for EventStatusLine {
    fn status(store: &RefCell<S>) -> Option<Line<'static>> {
        let store = store.borrow();
        let status = store.status.as_ref()?;
        let color = match status.kind {
            StatusKind::Pending => Color::Yellow,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        Some(Line::from(status.text.clone()).fg(color))
    }
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $action: ident) => {
        fn $fn() -> Input<S, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<S, String> for $acc {
            fn get(store: &RefCell<S>) -> String {
                store.borrow().data.$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }
        }
    };
}

macro_rules! new_number_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $action: ident) => {
        fn $fn() -> Input<S, PositiveIntegerAccess<S, u32, $acc>> {
            Input::new($title)
        }

        struct $acc;

        impl Access<S, Option<u32>> for $acc {
            fn get(store: &RefCell<S>) -> Option<u32> {
                store.borrow().data.$field
            }

            fn set(dispatcher: &mut Dispatcher, value: Option<u32>) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }
        }
    };
}

new_input!(new_header, "Header", HeaderAccess, header, UpdateHeader);
new_input!(
    new_description,
    "Description",
    DescriptionAccess,
    description,
    UpdateDescription
);
new_input!(new_date, "Date (YYYY-MM-DD)", DateAccess, date, UpdateDate);
new_number_input!(new_hour, "Hour", HourAccess, hour, UpdateHour);
new_number_input!(new_minute, "Minute", MinuteAccess, minute, UpdateMinute);
