// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use calclient_api::{CalendarApi, EventId, EventRecord};

use crate::form::EventFormValues;
use crate::route::{Navigator, Route};
use crate::state::SharedState;

/// Pause between the user triggering a submit and the request going out, long enough for the
/// "submitting" state to show.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(500);

/// What a submission does on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update(EventId),
}

impl Operation {
    /// Update when the current event carries an id, create otherwise.
    pub fn for_current(current: Option<&EventRecord>) -> Self {
        match current.and_then(|e| e.id.clone()) {
            Some(id) => Operation::Update(id),
            None => Operation::Create,
        }
    }
}

/// Transient text shown at the bottom of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Submitting,
    Created,
    Updated,
    WriteFailed,
    ReloginRequired,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submitting => "Submitting...",
            Self::Created => "Event created",
            Self::Updated => "Event updated",
            Self::WriteFailed => "Failed to update event, please try again",
            Self::ReloginRequired => "Failed to update user, please relogin",
        })
    }
}

/// Result of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub status: StatusMessage,

    /// Where the user was sent, `None` when they stay on the form.
    pub navigation: Option<Route>,
}

/// Another submission is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy;

impl fmt::Display for Busy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("A submission is already in progress")
    }
}

impl Error for Busy {}

/// Runs the create-or-update round trip, one at a time.
#[derive(Debug)]
pub struct Submitter {
    delay: Duration,
    in_flight: AtomicBool,
}

impl Submitter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Writes the event, then refreshes the user in shared state and navigates to the
    /// calendar. The refetch only starts once the write has succeeded.
    ///
    /// Failures never escape as errors: they become the returned status message. The only
    /// error is [`Busy`], when a previous call has not finished yet.
    pub async fn submit<A, S, N>(
        &self,
        api: &A,
        state: &S,
        navigator: &N,
        username: &str,
        operation: &Operation,
        values: &EventFormValues,
    ) -> Result<SubmitOutcome, Busy>
    where
        A: CalendarApi + ?Sized,
        S: SharedState + ?Sized,
        N: Navigator + ?Sized,
    {
        let _guard = FlightGuard::acquire(&self.in_flight).ok_or(Busy)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let draft = values.to_draft();
        let (written, done) = match operation {
            Operation::Update(id) => (
                api.update_event(username, id, &draft).await,
                StatusMessage::Updated,
            ),
            Operation::Create => (
                api.create_event(username, &draft).await,
                StatusMessage::Created,
            ),
        };

        if let Err(e) = written {
            tracing::warn!(%e, ?operation, "failed to write event");
            return Ok(SubmitOutcome {
                status: StatusMessage::WriteFailed,
                navigation: None,
            });
        }

        match api.get_user(username).await {
            Ok(user) => {
                state.set_user(user);
                navigator.push(Route::Calendar);
                Ok(SubmitOutcome {
                    status: done,
                    navigation: Some(Route::Calendar),
                })
            }
            Err(e) => {
                tracing::warn!(%e, "event saved but failed to refetch user");
                Ok(SubmitOutcome {
                    status: StatusMessage::ReloginRequired,
                    navigation: None,
                })
            }
        }
    }
}

impl Default for Submitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use calclient_api::{ApiError, EventDraft, UserRecord};
    use jiff::civil::date;

    use super::*;
    use crate::route::History;
    use crate::state::{AppState, Store};

    /// Records every call and answers from canned results.
    #[derive(Default)]
    pub struct FakeApi {
        pub fail_write: bool,
        pub fail_user: bool,
        pub yield_on_write: bool,
        pub calls: Mutex<Vec<String>>,
        pub drafts: Mutex<Vec<EventDraft>>,
    }

    impl FakeApi {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        async fn write(&self, call: String, draft: &EventDraft) -> Result<EventRecord, ApiError> {
            self.calls.lock().unwrap().push(call);
            self.drafts.lock().unwrap().push(draft.clone());
            if self.yield_on_write {
                tokio::task::yield_now().await;
            }
            match self.fail_write {
                true => Err(ApiError::Http("500 Internal Server Error".to_string())),
                false => Ok(EventRecord {
                    id: Some(EventId::from("42")),
                    header: draft.header.clone(),
                    description: draft.description.clone(),
                    date: draft.date.clone(),
                    time: draft.time.clone(),
                }),
            }
        }
    }

    #[async_trait]
    impl CalendarApi for FakeApi {
        async fn create_event(
            &self,
            username: &str,
            draft: &EventDraft,
        ) -> Result<EventRecord, ApiError> {
            self.write(format!("create {username}"), draft).await
        }

        async fn update_event(
            &self,
            username: &str,
            id: &EventId,
            draft: &EventDraft,
        ) -> Result<EventRecord, ApiError> {
            self.write(format!("update {username} {id}"), draft).await
        }

        async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError> {
            self.calls.lock().unwrap().push(format!("get_user {username}"));
            match self.fail_user {
                true => Err(ApiError::NotFound(format!("/users/{username}"))),
                false => Ok(UserRecord {
                    username: username.to_string(),
                    events: vec![EventRecord {
                        id: Some(EventId::from("42")),
                        header: "fresh".to_string(),
                        description: String::new(),
                        date: "2023-1-05".to_string(),
                        time: "09:45".to_string(),
                    }],
                }),
            }
        }
    }

    fn values() -> EventFormValues {
        EventFormValues {
            header: "Dentist".to_string(),
            description: "Checkup".to_string(),
            date: date(2023, 1, 5),
            hour: 9,
            minute: 45,
        }
    }

    fn store() -> Store {
        Store::new(AppState {
            user: Some(UserRecord {
                username: "alice".to_string(),
                events: Vec::new(),
            }),
            current_event: None,
        })
    }

    #[test]
    fn operation_follows_current_event() {
        assert_eq!(Operation::for_current(None), Operation::Create);

        let mut event = EventRecord {
            id: Some(EventId::from("42")),
            header: String::new(),
            description: String::new(),
            date: String::new(),
            time: String::new(),
        };
        assert_eq!(
            Operation::for_current(Some(&event)),
            Operation::Update(EventId::from("42"))
        );

        event.id = None;
        assert_eq!(Operation::for_current(Some(&event)), Operation::Create);
    }

    #[test]
    fn status_messages() {
        assert_eq!(StatusMessage::Created.to_string(), "Event created");
        assert_eq!(StatusMessage::Updated.to_string(), "Event updated");
        assert_eq!(
            StatusMessage::WriteFailed.to_string(),
            "Failed to update event, please try again"
        );
        assert_eq!(
            StatusMessage::ReloginRequired.to_string(),
            "Failed to update user, please relogin"
        );
    }

    #[tokio::test]
    async fn create_then_refetch_and_navigate() {
        let api = FakeApi::default();
        let store = store();
        let history = History::new(Route::Event);
        let submitter = Submitter::new(Duration::ZERO);

        let outcome = submitter
            .submit(&api, &store, &history, "alice", &Operation::Create, &values())
            .await
            .unwrap();

        assert_eq!(outcome.status, StatusMessage::Created);
        assert_eq!(outcome.navigation, Some(Route::Calendar));
        assert_eq!(history.current(), Some(Route::Calendar));
        assert_eq!(api.calls(), vec!["create alice", "get_user alice"]);
        assert_eq!(store.user().unwrap().events[0].header, "fresh");

        let drafts = api.drafts.lock().unwrap();
        assert_eq!(drafts[0].date, "2023-1-05");
        assert_eq!(drafts[0].time, "09:45");
    }

    #[tokio::test]
    async fn update_forwards_event_id() {
        let api = FakeApi::default();
        let store = store();
        let history = History::new(Route::Event);
        let operation = Operation::Update(EventId::from("42"));

        let outcome = Submitter::new(Duration::ZERO)
            .submit(&api, &store, &history, "alice", &operation, &values())
            .await
            .unwrap();

        assert_eq!(outcome.status, StatusMessage::Updated);
        assert_eq!(api.calls(), vec!["update alice 42", "get_user alice"]);
    }

    #[tokio::test]
    async fn write_failure_skips_refetch() {
        let api = FakeApi {
            fail_write: true,
            ..Default::default()
        };
        let store = store();
        let history = History::new(Route::Event);

        let outcome = Submitter::new(Duration::ZERO)
            .submit(&api, &store, &history, "alice", &Operation::Create, &values())
            .await
            .unwrap();

        assert_eq!(outcome.status, StatusMessage::WriteFailed);
        assert_eq!(outcome.navigation, None);
        assert_eq!(history.current(), Some(Route::Event));
        assert_eq!(api.calls(), vec!["create alice"]);
        assert!(store.user().unwrap().events.is_empty());
    }

    #[tokio::test]
    async fn refetch_failure_asks_for_relogin() {
        let api = FakeApi {
            fail_user: true,
            ..Default::default()
        };
        let store = store();
        let history = History::new(Route::Event);
        let operation = Operation::Update(EventId::from("42"));

        let outcome = Submitter::new(Duration::ZERO)
            .submit(&api, &store, &history, "alice", &operation, &values())
            .await
            .unwrap();

        assert_eq!(outcome.status, StatusMessage::ReloginRequired);
        assert_eq!(outcome.navigation, None);
        assert_eq!(history.current(), Some(Route::Event));
        assert!(store.user().unwrap().events.is_empty());
    }

    #[tokio::test]
    async fn second_submission_is_rejected_while_in_flight() {
        let api = FakeApi {
            yield_on_write: true,
            ..Default::default()
        };
        let store = store();
        let history = History::new(Route::Event);
        let submitter = Submitter::new(Duration::ZERO);
        let values = values();

        let first = submitter.submit(&api, &store, &history, "alice", &Operation::Create, &values);
        let second = submitter.submit(&api, &store, &history, "alice", &Operation::Create, &values);
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap().status, StatusMessage::Created);
        assert_eq!(second, Err(Busy));
        assert_eq!(api.calls(), vec!["create alice", "get_user alice"]);
    }

    #[tokio::test]
    async fn guard_is_released_after_failure() {
        let api = FakeApi {
            fail_write: true,
            ..Default::default()
        };
        let store = store();
        let history = History::new(Route::Event);
        let submitter = Submitter::new(Duration::ZERO);

        for _ in 0..2 {
            let outcome = submitter
                .submit(&api, &store, &history, "alice", &Operation::Create, &values())
                .await;
            assert_eq!(outcome.unwrap().status, StatusMessage::WriteFailed);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_delay_before_writing() {
        let api = FakeApi::default();
        let store = store();
        let history = History::new(Route::Event);
        let submitter = Submitter::default();

        let started = tokio::time::Instant::now();
        submitter
            .submit(&api, &store, &history, "alice", &Operation::Create, &values())
            .await
            .unwrap();
        assert!(started.elapsed() >= DEFAULT_SUBMIT_DELAY);
    }
}
