// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use calclient_core::{EventFormPage, StatusMessage, SubmitError};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;

use crate::session::Session;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_editor::EventEditor;
use crate::tui::event_store::{EventStore, Status};

/// Runs the event form in the terminal until the page navigates away or the user backs out.
pub async fn edit_event(page: &mut EventFormPage, session: &Session) -> Result<(), Box<dyn Error>> {
    let store = Rc::new(RefCell::new(EventStore::new(page.values())));

    let mut terminal = ratatui::init();
    let result = run_event_editor(page, session, store, &mut terminal).await;
    ratatui::restore();
    result
}

async fn run_event_editor(
    page: &mut EventFormPage,
    session: &Session,
    store: Rc<RefCell<EventStore>>,
    terminal: &mut DefaultTerminal,
) -> Result<(), Box<dyn Error>> {
    let mut dispatcher = Dispatcher::new();
    EventStore::register_to(store.clone(), &mut dispatcher);
    let mut view = EventEditor::new(page.title());
    view.activate(&mut dispatcher, &store);

    loop {
        let area = draw(&view, &store, terminal)?;

        let Event::Key(key) = event::read()? else {
            continue; // redraw on resize and friends
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match view.on_key(&mut dispatcher, &store, area, key) {
            Some(Message::Exit) => {
                tracing::info!("user left the event form");
                page.back(&session.history);
                break Ok(());
            }
            Some(Message::Submit) => {
                let ctx = Ctx {
                    view: &view,
                    store: &store,
                    dispatcher: &mut dispatcher,
                    terminal: &mut *terminal,
                };
                if submit(page, session, ctx).await? {
                    break Ok(());
                }
            }
            _ => {} // Continue the loop to render the next frame
        }
    }
}

struct Ctx<'a> {
    view: &'a EventEditor,
    store: &'a RefCell<EventStore>,
    dispatcher: &'a mut Dispatcher,
    terminal: &'a mut DefaultTerminal,
}

/// Submits the typed values. Returns whether the page navigated away.
async fn submit(
    page: &mut EventFormPage,
    session: &Session,
    ctx: Ctx<'_>,
) -> Result<bool, Box<dyn Error>> {
    let applied = ctx.store.borrow().apply_to(page.values_mut());
    let checked = applied.and_then(|()| page.values().validate().map_err(|e| e.to_string()));
    if let Err(e) = checked {
        ctx.dispatcher.dispatch(Action::SetStatus(Some(Status::error(e))));
        return Ok(false);
    }

    ctx.dispatcher
        .dispatch(Action::SetStatus(Some(StatusMessage::Submitting.into())));
    draw(ctx.view, ctx.store, ctx.terminal)?;

    match page
        .submit(&session.api, &session.store, &session.history)
        .await
    {
        Ok(outcome) => {
            ctx.dispatcher
                .dispatch(Action::SetStatus(Some(outcome.status.into())));
            Ok(outcome.navigation.is_some())
        }
        Err(SubmitError::Unauthenticated) => Err(SubmitError::Unauthenticated.into()),
        Err(e) => {
            ctx.dispatcher
                .dispatch(Action::SetStatus(Some(Status::error(e))));
            Ok(false)
        }
    }
}

fn draw(
    view: &EventEditor,
    store: &RefCell<EventStore>,
    terminal: &mut DefaultTerminal,
) -> Result<Rect, Box<dyn Error>> {
    let frame = terminal.draw(|frame| {
        let area = frame.area();
        view.render(store, area, frame.buffer_mut());
        if let Some(pos) = view.get_cursor_position(store, area) {
            frame.set_cursor_position(pos);
        }
    })?;
    Ok(frame.area)
}
