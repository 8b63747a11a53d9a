// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, marker::PhantomData, rc::Rc};

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;

/// Supplies the transient line shown at the bottom of a page.
pub trait StatusLine<S> {
    fn status(store: &RefCell<S>) -> Option<Line<'static>>;
}

pub struct SinglePage<S, C: Component<S>, L: StatusLine<S>> {
    title: String,
    inner: C,
    _phantom_s: PhantomData<S>,
    _phantom_l: PhantomData<L>,
}

impl<S, C: Component<S>, L: StatusLine<S>> SinglePage<S, C, L> {
    pub fn new(title: impl ToString, inner: C) -> Self {
        Self {
            title: title.to_string(),
            inner,
            _phantom_s: PhantomData,
            _phantom_l: PhantomData,
        }
    }

    fn block(&self) -> Block<'_> {
        Block::bordered().border_set(border::ROUNDED)
    }

    /// Splits the page into the content and the status line.
    fn split(&self, area: Rect) -> Rc<[Rect]> {
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(self.block().inner(area))
    }
}

impl<S, C: Component<S>, L: StatusLine<S>> Component<S> for SinglePage<S, C, L> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let title = Line::from(format!(" {} ", self.title).bold());
        let block = self
            .block()
            .title(title.centered())
            .title_bottom(instructions().centered())
            .white();
        block.render(area, buf);

        let areas = self.split(area);
        self.inner.render(store, areas[0], buf);
        if let Some(status) = L::status(store) {
            Paragraph::new(status).centered().render(areas[1], buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.inner.get_cursor_position(store, self.split(area)[0])
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let inner_area = self.split(area)[0];
        if let Some(msg) = self.inner.on_key(dispatcher, store, inner_area, event) {
            return Some(msg);
        }

        match event.code {
            KeyCode::Esc => Some(Message::Exit),
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.deactivate(dispatcher, store);
    }
}

fn instructions() -> Line<'static> {
    Line::from(vec![
        " Prev ".into(),
        "<Up>".blue().bold(),
        " Next ".into(),
        "<Down>".blue().bold(),
        " Submit ".into(),
        "<Enter>".blue().bold(),
        " Back ".into(),
        "<Esc> ".blue().bold(),
    ])
}
