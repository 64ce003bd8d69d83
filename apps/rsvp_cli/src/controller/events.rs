//! Workflow events rendered for the terminal.

use client_core::{RsvpEvent, WorkflowView};
use shared::domain::GuestRecord;
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing::debug;

use crate::render::render_suggestions;

/// Prints the suggestion list whenever the visible list changes. Notices are printed by the
/// prompt that triggered them.
pub fn spawn_event_printer(mut events: broadcast::Receiver<RsvpEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut shown = None;
        loop {
            match events.recv().await {
                Ok(RsvpEvent::ViewChanged(view)) => {
                    if let Some(text) = suggestions_update(&mut shown, &view) {
                        println!("{text}");
                    }
                }
                Ok(RsvpEvent::Notice(_)) => {}
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "event printer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Text to print when the visible suggestions differ from what was printed last.
pub fn suggestions_update(
    shown: &mut Option<Vec<GuestRecord>>,
    view: &WorkflowView,
) -> Option<String> {
    let current = view
        .suggestions_visible
        .then(|| view.suggestions.clone());
    if current == *shown {
        return None;
    }
    *shown = current;
    shown
        .as_deref()
        .map(|suggestions| format!("Sugerencias:\n{}", render_suggestions(suggestions)))
}
