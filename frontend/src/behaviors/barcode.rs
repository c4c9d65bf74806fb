//! Captures hardware barcode scanner bursts typed into the scan input.
//!
//! The scanner listens to `keydown` on its own input only. Keys are fed to a
//! [`ScanAccumulator`]; a [`Timeout`] of [`IDLE_RESET_MS`] is restarted on every
//! key and clears the accumulator when it fires. A completed scan is delivered
//! to every subscriber, then the input is cleared and the `Enter` swallowed.
//!
//! When the idle timer fires only the internal buffer is cleared, the text
//! already typed into the input stays. That asymmetry with a completed scan
//! is long-standing page behavior and is kept as is.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_console::warn;
use gloo_timers::callback::Timeout;
use pos_common::config::BARCODE_EVENT_NAME;
use pos_common::model::barcode::{
    BarcodeScan, IdleTicket, KeyOutcome, ScanAccumulator, IDLE_RESET_MS,
};
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, HtmlInputElement, KeyboardEvent};
use yew::Callback;

use crate::dom;
use crate::error::BehaviorError;
use crate::listener::EventListener;

/// Registry of scan subscribers. Cloning shares the registry.
#[derive(Clone, Default)]
pub struct ScanSubscribers {
    callbacks: Rc<RefCell<Vec<Callback<BarcodeScan>>>>,
}

impl ScanSubscribers {
    pub fn subscribe(&self, callback: Callback<BarcodeScan>) {
        self.callbacks.borrow_mut().push(callback);
    }

    pub fn count(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Calls every subscriber in registration order. The registry is not
    /// borrowed while callbacks run, so a callback may subscribe others.
    fn emit(&self, scan: &BarcodeScan) {
        let callbacks = self.callbacks.borrow().clone();
        for callback in callbacks {
            callback.emit(scan.clone());
        }
    }
}

#[derive(Default)]
struct ScannerState {
    accumulator: ScanAccumulator,
    idle_timer: Option<Timeout>,
}

impl ScannerState {
    /// Feeds a key and re-arms the idle timer for it. Replacing the previous
    /// timeout cancels it.
    fn handle_key(&mut self, key: &str, state: Weak<RefCell<ScannerState>>) -> KeyOutcome {
        let outcome = self.accumulator.handle_key(key);
        self.restart_idle_timer(state, self.accumulator.idle_ticket());
        outcome
    }

    fn restart_idle_timer(&mut self, state: Weak<RefCell<ScannerState>>, ticket: IdleTicket) {
        self.idle_timer = Some(Timeout::new(IDLE_RESET_MS, move || {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().accumulator.expire_idle(ticket);
            }
        }));
    }
}

pub struct BarcodeScanner {
    state: Rc<RefCell<ScannerState>>,
    subscribers: ScanSubscribers,
    broadcast_dom_event: bool,
    listener: Option<EventListener>,
}

impl BarcodeScanner {
    pub fn new(subscribers: ScanSubscribers, broadcast_dom_event: bool) -> Self {
        Self {
            state: Rc::default(),
            subscribers,
            broadcast_dom_event,
            listener: None,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.count()
    }

    /// Starts capturing keystrokes from `input`. Restarting on another input
    /// stops the previous capture first.
    pub fn start(&mut self, input: HtmlInputElement) -> Result<(), BehaviorError> {
        self.stop();

        let state = Rc::clone(&self.state);
        let subscribers = self.subscribers.clone();
        let broadcast = self.broadcast_dom_event;
        let target = input.clone();
        let listener = EventListener::new(&input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };

            let outcome = state
                .borrow_mut()
                .handle_key(&event.key(), Rc::downgrade(&state));

            if let KeyOutcome::Completed(scan) = outcome {
                // Subscribers still see the scanned text in the input.
                subscribers.emit(&scan);
                if broadcast {
                    if let Err(err) = broadcast_scan(&scan) {
                        warn!(format!("could not dispatch {BARCODE_EVENT_NAME}: {err}"));
                    }
                }
                target.set_value("");
                event.prevent_default();
            }
        })?;

        self.listener = Some(listener);
        Ok(())
    }

    /// Detaches from the input and drops any partial burst along with its
    /// pending idle timer.
    pub fn stop(&mut self) {
        self.listener = None;
        let mut state = self.state.borrow_mut();
        state.idle_timer = None;
        state.accumulator.reset();
    }
}

impl Drop for BarcodeScanner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Dispatches `barcodescanned` on `window` with `detail.barcode`, for page
/// scripts that listen for the event directly.
fn broadcast_scan(scan: &BarcodeScan) -> Result<(), BehaviorError> {
    let init = CustomEventInit::new();
    init.set_detail(&serde_wasm_bindgen::to_value(scan)?);
    let event = CustomEvent::new_with_event_init_dict(BARCODE_EVENT_NAME, &init)?;
    dom::window()?.dispatch_event(&event)?;
    Ok(())
}
