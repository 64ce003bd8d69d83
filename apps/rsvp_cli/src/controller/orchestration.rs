//! Dispatch of prompt commands onto the RSVP controller.

use client_core::{RsvpController, StepDirection};

use crate::{
    controller::commands::{UiCommand, HELP},
    render::{render_notice, render_view},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies one command and returns the text to print, if any.
pub async fn dispatch_command(
    controller: &RsvpController,
    cmd: UiCommand,
) -> (Flow, Option<String>) {
    tracing::debug!(command = cmd.name(), "dispatching prompt command");

    let output = match cmd {
        UiCommand::Name(text) => {
            controller.on_name_input(text);
            None
        }
        UiCommand::Pick(position) => {
            let view = controller.view().await;
            let guest = position
                .checked_sub(1)
                .and_then(|index| view.suggestions.get(index));
            match guest {
                Some(guest) if view.suggestions_visible => {
                    controller.select_suggestion(guest.id).await;
                    Some(render_view(&controller.view().await))
                }
                _ => Some(format!("No hay sugerencia {position}")),
            }
        }
        UiCommand::Dismiss => {
            controller.dismiss_suggestions().await;
            None
        }
        UiCommand::Attendance(attendance) => {
            if controller.set_attendance(attendance).await {
                Some(render_view(&controller.view().await))
            } else {
                Some("Primero elige tu nombre de la lista".to_string())
            }
        }
        UiCommand::Increment => {
            controller.step(StepDirection::Increment).await;
            Some(render_view(&controller.view().await))
        }
        UiCommand::Decrement => {
            controller.step(StepDirection::Decrement).await;
            Some(render_view(&controller.view().await))
        }
        UiCommand::Submit => Some(render_notice(&controller.submit().await)),
        UiCommand::Show => Some(render_view(&controller.view().await)),
        UiCommand::Help => Some(HELP.to_string()),
        UiCommand::Quit => return (Flow::Quit, None),
    };

    (Flow::Continue, output)
}
