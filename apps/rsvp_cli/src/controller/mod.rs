//! Terminal controller: typed commands parsed from input lines, their dispatch onto the RSVP
//! workflow, and the printer for workflow events.

pub mod commands;
pub mod events;
pub mod orchestration;
