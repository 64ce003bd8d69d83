//! Headless RSVP client: guest lookup, attendance form state and the remote guest-list API.

pub mod api;
pub mod controller;
pub mod directory;
pub mod error;
pub mod workflow;

pub use api::{GuestApi, HttpGuestApi, InvitationSender};
pub use controller::{RsvpController, RsvpEvent, RsvpTiming};
pub use workflow::{Notice, NoticeKind, StepDirection, WorkflowState, WorkflowView};
