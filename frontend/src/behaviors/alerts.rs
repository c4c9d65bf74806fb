use gloo_console::warn;
use gloo_timers::callback::Timeout;
use pos_common::config::ALERT_DISMISS_MS;
use web_sys::Document;

use crate::bootstrap::Alert;
use crate::dom::select_all;
use crate::error::BehaviorError;

/// Closes every alert matching `selector` once, [`ALERT_DISMISS_MS`] after
/// this call. Alerts inserted after the timer fires stay open.
///
/// Dropping the returned timeout before it fires cancels the dismissal.
pub fn schedule_dismiss(document: Document, selector: String) -> Timeout {
    Timeout::new(ALERT_DISMISS_MS, move || {
        if let Err(err) = dismiss(&document, &selector) {
            warn!(format!("alert auto-dismiss failed: {err}"));
        }
    })
}

fn dismiss(document: &Document, selector: &str) -> Result<(), BehaviorError> {
    for element in select_all(document, selector)? {
        Alert::new(&element)?.close()?;
    }
    Ok(())
}
