// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use calclient_api::{EventRecord, UserRecord};

/// The slice of shared state the event form page reads and writes.
pub trait SharedState {
    /// The logged-in user, if any.
    fn user(&self) -> Option<UserRecord>;

    /// The event selected for editing, absent when creating a new one.
    fn current_event(&self) -> Option<EventRecord>;

    /// Replaces the logged-in user.
    fn set_user(&self, user: UserRecord);
}

/// Application state shared between pages.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub user: Option<UserRecord>,
    pub current_event: Option<EventRecord>,
}

#[derive(Debug, Clone)]
pub enum Action {
    SetUser(UserRecord),
    SetCurrentEvent(Option<EventRecord>),
    Logout,
}

type Callback = Rc<dyn Fn(&AppState)>;

/// Single-threaded state container. Every change goes through [`Store::dispatch`], which
/// notifies the subscribers after the state has been updated.
///
/// Subscribers may dispatch again. Such actions are queued and applied in order once the
/// current round of notifications is done.
pub struct Store {
    state: RefCell<AppState>,
    subscribers: RefCell<Vec<Callback>>,
    pending: RefCell<VecDeque<Action>>,
    dispatching: Cell<bool>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state: RefCell::new(state),
            subscribers: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&AppState) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn dispatch(&self, action: Action) {
        self.pending.borrow_mut().push_back(action);
        if self.dispatching.replace(true) {
            return; // drained by the outer call
        }

        loop {
            let Some(action) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            tracing::debug!(?action, "dispatching action");
            reduce(&mut self.state.borrow_mut(), action);

            // no borrow is held while the callbacks run
            let state = self.state.borrow().clone();
            let subscribers = self.subscribers.borrow().clone();
            for sub in &subscribers {
                sub(&state);
            }
        }
        self.dispatching.set(false);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl SharedState for Store {
    fn user(&self) -> Option<UserRecord> {
        self.state.borrow().user.clone()
    }

    fn current_event(&self) -> Option<EventRecord> {
        self.state.borrow().current_event.clone()
    }

    fn set_user(&self, user: UserRecord) {
        self.dispatch(Action::SetUser(user));
    }
}

fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::SetUser(user) => state.user = Some(user),
        Action::SetCurrentEvent(event) => state.current_event = event,
        Action::Logout => *state = AppState::default(),
    }
}
