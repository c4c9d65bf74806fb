use pos_common::config::{PageConfig, DELETE_CONFIRM_MESSAGE};
use pos_common::confirm::ClickDecision;
use web_sys::{Document, Window};

use crate::dom::select_all;
use crate::error::BehaviorError;
use crate::listener::EventListener;

/// Asks for confirmation before any flagged delete trigger acts.
///
/// When the user declines, the click's default action (form submission or
/// navigation) is cancelled and no later click handler on the element runs.
/// Accepting leaves the event untouched.
pub fn guard(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<Vec<EventListener>, BehaviorError> {
    select_all(document, &config.delete_confirm_selector)?
        .into_iter()
        .map(|trigger| {
            let window = window.clone();
            EventListener::new(&trigger, "click", move |event| {
                let decision =
                    ClickDecision::from_answer(window.confirm_with_message(DELETE_CONFIRM_MESSAGE).ok());
                if decision.prevents_default() {
                    event.prevent_default();
                }
                if decision.stops_other_handlers() {
                    event.stop_immediate_propagation();
                }
            })
        })
        .collect()
}
