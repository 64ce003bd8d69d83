//! RSVP form state and its transitions.
//!
//! `WorkflowState` is a single record mutated only through the methods below. Everything the UI
//! shows (which buttons are enabled, whether the suggestion panel is open) is derived from it in
//! [`WorkflowState::view`], so controls cannot drift from the logical state.

use shared::{
    domain::{Attendance, GuestId, GuestRecord},
    protocol::UpdateGuestRequest,
};

use crate::{
    directory::filter_by_name,
    error::{SubmissionError, ValidationError},
};

pub const VALIDATION_MESSAGE: &str = "Por favor llena todos los campos";
pub const CONFIRMATION_MESSAGE: &str = "Confirmacion enviada";
pub const FAILURE_MESSAGE: &str = "Error al actualizar, intente mas tarde";
pub const IN_FLIGHT_MESSAGE: &str = "Enviando confirmacion, espera un momento";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Validation,
    Confirmation,
    Failure,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn validation(err: &ValidationError) -> Self {
        let message = match err {
            ValidationError::SubmissionInFlight => IN_FLIGHT_MESSAGE,
            _ => VALIDATION_MESSAGE,
        };
        Self {
            kind: NoticeKind::Validation,
            message: message.to_string(),
        }
    }

    pub fn confirmation() -> Self {
        Self {
            kind: NoticeKind::Confirmation,
            message: CONFIRMATION_MESSAGE.to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Directory lookup requested by a query change. `seq` identifies the query it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub seq: u64,
    pub query: String,
}

/// Snapshot of what the form should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowView {
    pub name_field: String,
    pub suggestions: Vec<GuestRecord>,
    pub suggestions_visible: bool,
    pub selected: Option<GuestRecord>,
    pub attendance: Option<Attendance>,
    pub party_size: Option<u32>,
    pub attendance_enabled: bool,
    pub increment_enabled: bool,
    pub decrement_enabled: bool,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    query_text: String,
    query_seq: u64,
    suggestions: Vec<GuestRecord>,
    suggestions_dismissed: bool,
    selected: Option<GuestRecord>,
    attendance: Option<Attendance>,
    party_size: Option<u32>,
    submitting: bool,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn suggestions(&self) -> &[GuestRecord] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&GuestRecord> {
        self.selected.as_ref()
    }

    pub fn attendance(&self) -> Option<Attendance> {
        self.attendance
    }

    pub fn party_size(&self) -> Option<u32> {
        self.party_size
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Applies the settled text of the name field. Every call starts a new query generation, so
    /// listings requested for earlier text are rejected by [`Self::apply_directory_listing`].
    /// Text that no longer names the selected guest drops the selection and its answers.
    /// Returns the lookup to perform, or `None` when the text is empty.
    pub fn apply_query(&mut self, text: &str) -> Option<DirectoryQuery> {
        if self
            .selected
            .as_ref()
            .is_some_and(|guest| guest.display_name != text)
        {
            self.selected = None;
            self.attendance = None;
            self.party_size = None;
        }
        self.query_text = text.to_string();
        self.query_seq += 1;
        self.suggestions_dismissed = false;

        if self.query_text.is_empty() {
            self.suggestions = Vec::new();
            return None;
        }

        Some(DirectoryQuery {
            seq: self.query_seq,
            query: self.query_text.clone(),
        })
    }

    /// Recomputes the suggestions from a full directory listing. Returns `false` and leaves the
    /// state untouched when the listing answers a superseded query.
    pub fn apply_directory_listing(&mut self, seq: u64, directory: &[GuestRecord]) -> bool {
        if seq != self.query_seq || self.query_text.is_empty() {
            return false;
        }
        self.suggestions = filter_by_name(directory, &self.query_text);
        true
    }

    /// Hides the suggestion panel until the query text changes again.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions_dismissed = true;
    }

    /// Selects a guest from the current suggestions and writes its name into the name field.
    /// Unknown ids are ignored, as is any pick while a submission is in flight.
    pub fn select_suggestion(&mut self, guest_id: GuestId) -> bool {
        if self.submitting {
            return false;
        }
        let Some(guest) = self
            .suggestions
            .iter()
            .find(|guest| guest.id == guest_id)
            .cloned()
        else {
            return false;
        };

        self.party_size = Some(match self.attendance {
            Some(Attendance::No) => 0,
            _ => guest.max_party_size,
        });
        self.query_text = guest.display_name.clone();
        self.query_seq += 1;
        self.selected = Some(guest);
        self.suggestions_dismissed = true;
        true
    }

    /// Records the attendance answer. Requires a selected guest and no submission in flight.
    pub fn set_attendance(&mut self, attendance: Attendance) -> bool {
        let Some(guest) = self.selected.as_ref().filter(|_| !self.submitting) else {
            return false;
        };

        self.party_size = Some(match attendance {
            Attendance::Yes => guest.max_party_size,
            Attendance::No => 0,
        });
        self.attendance = Some(attendance);
        true
    }

    /// Moves the party size one step, staying within `0..=max_party_size`.
    /// Returns `false` when the step was not allowed.
    pub fn step(&mut self, direction: StepDirection) -> bool {
        let allowed = match direction {
            StepDirection::Increment => self.increment_enabled(),
            StepDirection::Decrement => self.decrement_enabled(),
        };
        if !allowed {
            return false;
        }

        let current = self.party_size.unwrap_or(0);
        self.party_size = Some(match direction {
            StepDirection::Increment => current + 1,
            StepDirection::Decrement => current - 1,
        });
        true
    }

    /// Validates the form and marks a submission as in flight.
    pub fn begin_submission(&mut self) -> Result<UpdateGuestRequest, ValidationError> {
        if self.submitting {
            return Err(ValidationError::SubmissionInFlight);
        }
        if self.query_text.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let guest = self
            .selected
            .as_ref()
            .ok_or(ValidationError::NoGuestSelected)?;
        let attendance = self.attendance.ok_or(ValidationError::MissingAttendance)?;
        let party_size = self
            .party_size
            .filter(|size| *size <= guest.max_party_size)
            .ok_or(ValidationError::InvalidPartySize {
                max: guest.max_party_size,
            })?;

        self.submitting = true;
        Ok(UpdateGuestRequest {
            guest_id: guest.id,
            attendance,
            party_size,
        })
    }

    /// Closes the in-flight submission. Success resets the form, failure keeps every selection
    /// so the user can resubmit.
    pub fn complete_submission(&mut self, outcome: &Result<(), SubmissionError>) -> Notice {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.reset();
                Notice::confirmation()
            }
            Err(_) => Notice::failure(),
        }
    }

    /// Empties the form. The query generation keeps counting so in-flight listings for the
    /// discarded text are still rejected.
    pub fn reset(&mut self) {
        *self = Self {
            query_seq: self.query_seq + 1,
            ..Self::default()
        };
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView {
            name_field: self.query_text.clone(),
            suggestions: self.suggestions.clone(),
            suggestions_visible: self.suggestions_visible(),
            selected: self.selected.clone(),
            attendance: self.attendance,
            party_size: self.party_size,
            attendance_enabled: self.selected.is_some() && !self.submitting,
            increment_enabled: self.increment_enabled(),
            decrement_enabled: self.decrement_enabled(),
            submit_enabled: !self.submitting,
        }
    }

    fn suggestions_visible(&self) -> bool {
        !self.query_text.is_empty() && !self.suggestions_dismissed
    }

    fn stepper_active(&self) -> bool {
        self.selected.is_some() && self.attendance != Some(Attendance::No) && !self.submitting
    }

    fn increment_enabled(&self) -> bool {
        match (&self.selected, self.party_size) {
            (Some(guest), Some(size)) => self.stepper_active() && size < guest.max_party_size,
            _ => false,
        }
    }

    fn decrement_enabled(&self) -> bool {
        self.stepper_active() && self.party_size.is_some_and(|size| size > 0)
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
