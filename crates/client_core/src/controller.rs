//! Async binding of the RSVP workflow: debounced name lookups, attendance submission and UI
//! notifications.

use std::{
    sync::{Arc, Mutex as StdMutex, PoisonError},
    time::Duration,
};

use shared::domain::{Attendance, GuestId};
use tokio::{
    sync::{broadcast, Mutex},
    task::{AbortHandle, JoinHandle},
    time::{sleep, timeout},
};
use tracing::{debug, info, warn};

use crate::{
    api::GuestApi,
    error::{DirectoryError, SubmissionError},
    workflow::{Notice, StepDirection, WorkflowState, WorkflowView},
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpTiming {
    /// Quiet period after the last keystroke before the name is looked up.
    pub debounce: Duration,
    /// Upper bound on every directory query and attendance update.
    pub request_timeout: Duration,
}

impl Default for RsvpTiming {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub enum RsvpEvent {
    ViewChanged(WorkflowView),
    Notice(Notice),
}

struct ControllerInner {
    api: Arc<dyn GuestApi>,
    timing: RsvpTiming,
    state: Mutex<WorkflowState>,
    events: broadcast::Sender<RsvpEvent>,
    name_query: StdMutex<Option<JoinHandle<()>>>,
}

impl ControllerInner {
    fn emit(&self, event: RsvpEvent) {
        let _ = self.events.send(event);
    }

    fn emit_view(&self, state: &WorkflowState) {
        self.emit(RsvpEvent::ViewChanged(state.view()));
    }

    fn cancel_name_query(&self) {
        if let Some(task) = self
            .name_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}

/// Owns one RSVP form session. Background work started by the controller (the pending name
/// lookup and an in-flight submission) is aborted when it is dropped.
pub struct RsvpController {
    inner: Arc<ControllerInner>,
    submission: StdMutex<Option<AbortHandle>>,
}

impl RsvpController {
    pub fn new(api: Arc<dyn GuestApi>, timing: RsvpTiming) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(ControllerInner {
                api,
                timing,
                state: Mutex::new(WorkflowState::new()),
                events,
                name_query: StdMutex::new(None),
            }),
            submission: StdMutex::new(None),
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RsvpEvent> {
        self.inner.events.subscribe()
    }

    pub async fn view(&self) -> WorkflowView {
        self.inner.state.lock().await.view()
    }

    /// Records a keystroke in the name field. Only the last text of a burst is looked up: each
    /// call cancels the pending lookup, including a directory request it already started.
    pub fn on_name_input(&self, text: impl Into<String>) {
        let task = tokio::spawn(settle_name_query(self.inner.clone(), text.into()));
        let previous = self
            .inner
            .name_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            if !previous.is_finished() {
                debug!("superseding pending name lookup");
            }
            previous.abort();
        }
    }

    pub async fn select_suggestion(&self, guest_id: GuestId) -> bool {
        let mut state = self.inner.state.lock().await;
        let selected = state.select_suggestion(guest_id);
        if selected {
            // The name field now holds the guest's name; text still settling is obsolete.
            self.inner.cancel_name_query();
            self.inner.emit_view(&state);
        } else {
            debug!(%guest_id, "ignoring selection of guest missing from suggestions");
        }
        selected
    }

    pub async fn dismiss_suggestions(&self) {
        let mut state = self.inner.state.lock().await;
        state.dismiss_suggestions();
        self.inner.emit_view(&state);
    }

    pub async fn set_attendance(&self, attendance: Attendance) -> bool {
        let mut state = self.inner.state.lock().await;
        let changed = state.set_attendance(attendance);
        if changed {
            self.inner.emit_view(&state);
        }
        changed
    }

    pub async fn step(&self, direction: StepDirection) -> bool {
        let mut state = self.inner.state.lock().await;
        let changed = state.step(direction);
        if changed {
            self.inner.emit_view(&state);
        }
        changed
    }

    /// Validates the form and sends the attendance update. The returned notice is also broadcast.
    ///
    /// The request runs on its own task, so dropping this future does not leave the form stuck
    /// in the submitting state.
    pub async fn submit(&self) -> Notice {
        let request = {
            let mut state = self.inner.state.lock().await;
            match state.begin_submission() {
                Ok(request) => {
                    self.inner.emit_view(&state);
                    request
                }
                Err(err) => {
                    debug!(reason = %err, "submission rejected");
                    let notice = Notice::validation(&err);
                    self.inner.emit(RsvpEvent::Notice(notice.clone()));
                    return notice;
                }
            }
        };

        let inner = self.inner.clone();
        let task = tokio::spawn(async move {
            info!(
                guest_id = %request.guest_id,
                attendance = request.attendance.as_wire(),
                party_size = request.party_size,
                "submitting attendance"
            );
            let outcome = match timeout(
                inner.timing.request_timeout,
                inner.api.update_attendance(&request),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(SubmissionError::TimedOut(inner.timing.request_timeout)),
            };
            match &outcome {
                Ok(()) => info!(guest_id = %request.guest_id, "attendance recorded"),
                Err(err) => warn!(guest_id = %request.guest_id, error = %err, "attendance update failed"),
            }

            let mut state = inner.state.lock().await;
            let notice = state.complete_submission(&outcome);
            if outcome.is_ok() {
                // Cancelled under the state lock so text typed before the reset cannot refill it.
                inner.cancel_name_query();
            }
            inner.emit_view(&state);
            inner.emit(RsvpEvent::Notice(notice.clone()));
            notice
        });
        *self
            .submission
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(task.abort_handle());

        match task.await {
            Ok(notice) => notice,
            Err(err) => {
                warn!(error = %err, "submission task did not complete");
                Notice::failure()
            }
        }
    }
}

impl Drop for RsvpController {
    fn drop(&mut self) {
        self.inner.cancel_name_query();
        if let Some(task) = self
            .submission
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}

async fn settle_name_query(inner: Arc<ControllerInner>, text: String) {
    sleep(inner.timing.debounce).await;

    let lookup = {
        let mut state = inner.state.lock().await;
        let lookup = state.apply_query(&text);
        inner.emit_view(&state);
        lookup
    };
    let Some(lookup) = lookup else {
        return;
    };

    let listing = match timeout(inner.timing.request_timeout, inner.api.list_guests()).await {
        Ok(listing) => listing,
        Err(_) => Err(DirectoryError::TimedOut(inner.timing.request_timeout)),
    };

    match listing {
        Ok(directory) => {
            let mut state = inner.state.lock().await;
            if state.apply_directory_listing(lookup.seq, &directory) {
                debug!(
                    query = %lookup.query,
                    matches = state.suggestions().len(),
                    "suggestions updated"
                );
                inner.emit_view(&state);
            } else {
                debug!(query = %lookup.query, "discarding directory listing for superseded query");
            }
        }
        Err(err) => {
            warn!(query = %lookup.query, error = %err, "guest directory query failed");
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
