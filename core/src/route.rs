// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::fmt;

/// Pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page, also where unauthenticated users end up.
    Root,
    /// Overview of the user's events.
    Calendar,
    /// The create/update event form.
    Event,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Calendar => "/calendar",
            Route::Event => "/event",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub trait Navigator {
    /// Navigates to `route`, keeping the current page in history.
    fn push(&self, route: Route);

    /// Navigates to `route`, replacing the current page.
    fn replace(&self, route: Route);

    /// Returns to the previous page and yields it, or `None` when there is nowhere to go back to.
    fn back(&self) -> Option<Route>;

    fn current(&self) -> Option<Route>;
}

/// In-memory navigation history.
#[derive(Debug, Default)]
pub struct History {
    stack: RefCell<Vec<Route>>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            stack: RefCell::new(vec![start]),
        }
    }
}

impl Navigator for History {
    fn push(&self, route: Route) {
        tracing::debug!(%route, "push route");
        self.stack.borrow_mut().push(route);
    }

    fn replace(&self, route: Route) {
        tracing::debug!(%route, "replace route");
        let mut stack = self.stack.borrow_mut();
        stack.pop();
        stack.push(route);
    }

    fn back(&self) -> Option<Route> {
        let mut stack = self.stack.borrow_mut();
        if stack.len() < 2 {
            return None;
        }
        stack.pop();
        stack.last().copied()
    }

    fn current(&self) -> Option<Route> {
        self.stack.borrow().last().copied()
    }
}
