// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::time::Duration;

use calclient_api::CalendarApi;
use jiff::civil::Date;

use crate::form::{EventFormValues, FormError};
use crate::route::{Navigator, Route};
use crate::state::SharedState;
use crate::submit::{Busy, Operation, StatusMessage, SubmitOutcome, Submitter};

/// The create/update event form.
#[derive(Debug)]
pub struct EventFormPage {
    values: EventFormValues,
    operation: Operation,
    status: Option<StatusMessage>,
    submitter: Submitter,
}

impl EventFormPage {
    /// Mounts the page for the current event, or for a new one when there is none.
    ///
    /// Without a logged-in user nothing is mounted and the navigator is sent to the root.
    pub fn mount<S, N>(state: &S, navigator: &N, today: Date) -> Option<Self>
    where
        S: SharedState + ?Sized,
        N: Navigator + ?Sized,
    {
        if state.user().is_none() {
            tracing::info!("no user logged in, redirecting to root");
            navigator.replace(Route::Root);
            return None;
        }

        let current = state.current_event();
        Some(Self {
            values: EventFormValues::initial(current.as_ref(), today),
            operation: Operation::for_current(current.as_ref()),
            status: None,
            submitter: Submitter::default(),
        })
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submitter = Submitter::new(delay);
        self
    }

    pub fn values(&self) -> &EventFormValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut EventFormValues {
        &mut self.values
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn title(&self) -> &'static str {
        match self.operation {
            Operation::Create => "Create a new event",
            Operation::Update(_) => "Edit event",
        }
    }

    /// Outcome of the last submission attempt, if any.
    pub fn status(&self) -> Option<StatusMessage> {
        self.status
    }

    /// Validates the form and runs the submission. The resulting status is kept on the page.
    pub async fn submit<A, S, N>(
        &mut self,
        api: &A,
        state: &S,
        navigator: &N,
    ) -> Result<SubmitOutcome, SubmitError>
    where
        A: CalendarApi + ?Sized,
        S: SharedState + ?Sized,
        N: Navigator + ?Sized,
    {
        self.values.validate().map_err(SubmitError::Invalid)?;

        let Some(user) = state.user() else {
            navigator.replace(Route::Root);
            return Err(SubmitError::Unauthenticated);
        };

        self.status = Some(StatusMessage::Submitting);
        let outcome = self
            .submitter
            .submit(
                api,
                state,
                navigator,
                &user.username,
                &self.operation,
                &self.values,
            )
            .await?;

        self.status = Some(outcome.status);
        Ok(outcome)
    }

    /// Leaves the page without submitting.
    pub fn back<N: Navigator + ?Sized>(&self, navigator: &N) -> Option<Route> {
        navigator.back()
    }
}

/// Reasons a submission did not reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Invalid(FormError),
    Unauthenticated,
    Busy,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "{e}"),
            Self::Unauthenticated => write!(f, "Not logged in"),
            Self::Busy => write!(f, "{Busy}"),
        }
    }
}

impl Error for SubmitError {}

impl From<Busy> for SubmitError {
    fn from(_: Busy) -> Self {
        Self::Busy
    }
}

#[cfg(test)]
mod tests {
    use calclient_api::{EventId, EventRecord, UserRecord};
    use jiff::civil::date;

    use super::*;
    use crate::route::History;
    use crate::state::{Action, AppState, Store};
    use crate::submit::tests::FakeApi;

    fn logged_in() -> Store {
        Store::new(AppState {
            user: Some(UserRecord {
                username: "alice".to_string(),
                events: Vec::new(),
            }),
            current_event: None,
        })
    }

    fn current_event(id: &str) -> EventRecord {
        EventRecord {
            id: Some(EventId::from(id)),
            header: "Dentist".to_string(),
            description: "Checkup".to_string(),
            date: "2023-1-05".to_string(),
            time: "09:45".to_string(),
        }
    }

    fn mount(store: &Store, history: &History) -> EventFormPage {
        EventFormPage::mount(store, history, date(2025, 6, 1))
            .expect("page should mount")
            .with_submit_delay(Duration::ZERO)
    }

    #[test]
    fn unauthenticated_redirects_to_root() {
        let store = Store::default();
        let history = History::new(Route::Event);
        let page = EventFormPage::mount(&store, &history, date(2025, 6, 1));
        assert!(page.is_none());
        assert_eq!(history.current(), Some(Route::Root));
    }

    #[test]
    fn create_mode_defaults() {
        let store = logged_in();
        let history = History::new(Route::Event);
        let page = mount(&store, &history);
        assert_eq!(page.operation(), &Operation::Create);
        assert_eq!(page.title(), "Create a new event");
        assert_eq!(page.values().hour, 12);
        assert_eq!(page.values().minute, 30);
        assert_eq!(page.values().header, "");
        assert_eq!(page.values().description, "");
        assert_eq!(page.status(), None);
    }

    #[test]
    fn edit_mode_seeds_from_current_event() {
        let store = logged_in();
        store.dispatch(Action::SetCurrentEvent(Some(current_event("42"))));
        let history = History::new(Route::Event);
        let page = mount(&store, &history);
        assert_eq!(page.operation(), &Operation::Update(EventId::from("42")));
        assert_eq!(page.title(), "Edit event");
        assert_eq!(page.values().hour, 9);
        assert_eq!(page.values().minute, 45);
    }

    #[tokio::test]
    async fn create_success_navigates_to_calendar() {
        let api = FakeApi::default();
        let store = logged_in();
        let history = History::new(Route::Calendar);
        history.push(Route::Event);
        let mut page = mount(&store, &history);
        page.values_mut().header = "Lunch".to_string();
        page.values_mut().description = "Pizza".to_string();

        let outcome = page.submit(&api, &store, &history).await.unwrap();

        assert_eq!(outcome.navigation, Some(Route::Calendar));
        assert_eq!(page.status(), Some(StatusMessage::Created));
        assert_eq!(page.status().unwrap().to_string(), "Event created");
        assert_eq!(history.current(), Some(Route::Calendar));
        assert_eq!(api.calls(), vec!["create alice", "get_user alice"]);
    }

    #[tokio::test]
    async fn update_with_failed_refetch_stays() {
        let api = FakeApi {
            fail_user: true,
            ..Default::default()
        };
        let store = logged_in();
        store.dispatch(Action::SetCurrentEvent(Some(current_event("42"))));
        let history = History::new(Route::Event);
        let mut page = mount(&store, &history);

        let outcome = page.submit(&api, &store, &history).await.unwrap();

        assert_eq!(outcome.navigation, None);
        assert_eq!(page.status(), Some(StatusMessage::ReloginRequired));
        assert_eq!(
            page.status().unwrap().to_string(),
            "Failed to update user, please relogin"
        );
        assert_eq!(history.current(), Some(Route::Event));
        assert_eq!(api.calls(), vec!["update alice 42", "get_user alice"]);
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let api = FakeApi::default();
        let store = logged_in();
        let history = History::new(Route::Event);
        let mut page = mount(&store, &history);

        let err = page.submit(&api, &store, &history).await.unwrap_err();

        assert_eq!(err, SubmitError::Invalid(FormError::Required("header")));
        assert_eq!(page.status(), None);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn logout_before_submit_redirects() {
        let api = FakeApi::default();
        let store = logged_in();
        let history = History::new(Route::Event);
        let mut page = mount(&store, &history);
        page.values_mut().header = "Lunch".to_string();
        page.values_mut().description = "Pizza".to_string();

        store.dispatch(Action::Logout);
        let err = page.submit(&api, &store, &history).await.unwrap_err();

        assert_eq!(err, SubmitError::Unauthenticated);
        assert_eq!(history.current(), Some(Route::Root));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn back_pops_history() {
        let store = logged_in();
        let history = History::new(Route::Calendar);
        history.push(Route::Event);
        let page = mount(&store, &history);
        assert_eq!(page.back(&history), Some(Route::Calendar));
    }
}
