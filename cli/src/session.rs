// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calclient_api::{ApiClient, CalendarApi, UserRecord};
use calclient_core::{Action, History, Navigator, Route, Store};

use crate::config::Config;

/// Everything a command needs to talk to the backend and drive the pages.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub api: ApiClient,
    pub store: Store,
    pub history: History,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        let api = ApiClient::new(config.api.clone())?;
        let store = Store::default();
        store.subscribe(|state| {
            tracing::trace!(
                user = state.user.as_ref().map(|u| u.username.as_str()),
                events = state.user.as_ref().map_or(0, |u| u.events.len()),
                current_event = ?state.current_event.as_ref().and_then(|e| e.id.as_ref()),
                "state changed"
            );
        });
        Ok(Self {
            config,
            api,
            store,
            history: History::new(Route::Root),
        })
    }

    /// Fetches the configured user into shared state and lands on the calendar.
    #[tracing::instrument(skip(self), fields(username = %self.config.username))]
    pub async fn login(&self) -> Result<UserRecord, Box<dyn Error>> {
        let user = self
            .api
            .get_user(&self.config.username)
            .await
            .map_err(|e| format!("Failed to log in as {}: {e}", self.config.username))?;

        tracing::debug!(events = user.events.len(), "logged in");
        self.store.dispatch(Action::SetUser(user.clone()));
        self.history.push(Route::Calendar);
        Ok(user)
    }
}
