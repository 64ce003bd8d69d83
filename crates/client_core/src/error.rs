use std::time::Duration;

use thiserror::Error;

/// Reasons a submit attempt is refused before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("guest name is empty")]
    MissingName,
    #[error("no guest has been selected from the suggestions")]
    NoGuestSelected,
    #[error("attendance has not been chosen")]
    MissingAttendance,
    #[error("party size is missing or outside 0..={max}")]
    InvalidPartySize { max: u32 },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("guest directory request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("guest directory query timed out after {0:?}")]
    TimedOut(Duration),
    #[error("guest directory unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("attendance update request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("attendance update timed out after {0:?}")]
    TimedOut(Duration),
    #[error("unexpected acknowledgement from update endpoint: {0:?}")]
    UnexpectedAcknowledgement(String),
    #[error("attendance update unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum InvitationError {
    #[error("network response was not ok: {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to send invitation: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("messaging service did not answer within {0:?}")]
    TimedOut(Duration),
}
