//! Page lifecycle: starts every behavior routine once the document is parsed
//! and tears them down when the page is hidden.

use std::cell::RefCell;

use gloo_console::{error, log, warn};
use gloo_timers::callback::Timeout;
use pos_common::config::{PageConfig, CONFIG_ELEMENT_ID};
use pos_common::model::barcode::BarcodeScan;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlInputElement, PageTransitionEvent};
use yew::Callback;

use crate::behaviors::barcode::{BarcodeScanner, ScanSubscribers};
use crate::behaviors::{
    alerts, currency_input, delete_confirm, filter_persistence, table_search, widgets,
};
use crate::dom;
use crate::error::BehaviorError;
use crate::listener::EventListener;

thread_local! {
    static PAGE: RefCell<Option<PageBehaviors>> = const { RefCell::new(None) };
    static SCAN_SUBSCRIBERS: ScanSubscribers = ScanSubscribers::default();
}

/// Everything the routines attached to the current document.
///
/// Dropping it (or calling [`PageBehaviors::stop`]) detaches every listener
/// and cancels pending timers.
#[derive(Default)]
pub struct PageBehaviors {
    listeners: Vec<EventListener>,
    alert_timer: Option<Timeout>,
    scanner: Option<BarcodeScanner>,
}

impl PageBehaviors {
    /// Runs every routine against the current document. A routine that fails
    /// is logged and skipped; only a missing window or document is fatal.
    pub fn start(config: &PageConfig, subscribers: ScanSubscribers) -> Result<Self, BehaviorError> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let mut page = Self::default();

        match widgets::activate(&document, config) {
            Ok(count) => log!(format!("activated {count} tooltip/popover widgets")),
            Err(err) => error!(format!("widget activation failed: {err}")),
        }

        page.alert_timer = Some(alerts::schedule_dismiss(
            document.clone(),
            config.dismissible_alert_selector.clone(),
        ));

        page.keep("delete confirmation", delete_confirm::guard(&window, &document, config));
        page.keep("currency inputs", currency_input::bind(&document, config));
        page.keep(
            "table search",
            table_search::bind(&document, config).map(Vec::from_iter),
        );
        page.keep(
            "filter persistence",
            filter_persistence::bind(&window, &document, config).map(Vec::from_iter),
        );

        match start_scanner(&document, config, subscribers) {
            Ok(scanner) => page.scanner = scanner,
            Err(err) => error!(format!("barcode capture failed: {err}")),
        }

        Ok(page)
    }

    fn keep(&mut self, routine: &str, listeners: Result<Vec<EventListener>, BehaviorError>) {
        match listeners {
            Ok(listeners) if listeners.is_empty() => {}
            Ok(listeners) => {
                log!(format!("{routine}: {} listeners", listeners.len()));
                self.listeners.extend(listeners);
            }
            Err(err) => error!(format!("{routine} failed: {err}")),
        }
    }

    pub fn stop(&mut self) {
        self.listeners.clear();
        self.alert_timer = None;
        if let Some(mut scanner) = self.scanner.take() {
            scanner.stop();
        }
    }
}

fn start_scanner(
    document: &Document,
    config: &PageConfig,
    subscribers: ScanSubscribers,
) -> Result<Option<BarcodeScanner>, BehaviorError> {
    let Some(element) = document.get_element_by_id(&config.barcode_input_id) else {
        return Ok(None);
    };
    let input = element
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| BehaviorError::UnexpectedElement(config.barcode_input_id.clone(), "an <input>"))?;

    let mut scanner = BarcodeScanner::new(subscribers, config.broadcast_dom_event);
    scanner.start(input)?;
    log!(format!(
        "barcode capture on #{} ({} subscribers)",
        config.barcode_input_id,
        scanner.subscriber_count()
    ));
    Ok(Some(scanner))
}

/// Reads the optional JSON override embedded in the page.
fn load_config(document: &Document) -> PageConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return PageConfig::default();
    };
    PageConfig::from_json(&json).unwrap_or_else(|err| {
        warn!(format!("#{CONFIG_ELEMENT_ID} ignored: {err}"));
        PageConfig::default()
    })
}

fn start_page() {
    if PAGE.with(|page| page.borrow().is_some()) {
        return;
    }
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let config = load_config(&document);
    let subscribers = SCAN_SUBSCRIBERS.with(Clone::clone);
    match PageBehaviors::start(&config, subscribers) {
        Ok(behaviors) => PAGE.with(|page| *page.borrow_mut() = Some(behaviors)),
        Err(err) => error!(format!("page behaviors not started: {err}")),
    }
}

fn stop_page() {
    // Taken out first so nothing is borrowed while listeners are dropped.
    let behaviors = PAGE.with(|page| page.borrow_mut().take());
    if let Some(mut behaviors) = behaviors {
        behaviors.stop();
    }
}

/// Starts the behaviors once the DOM is ready and ties their lifetime to the
/// page: `pagehide` stops them, a `pageshow` from the back/forward cache starts
/// them again.
pub fn boot() -> Result<(), BehaviorError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    if document.ready_state() == "loading" {
        EventListener::new(&document, "DOMContentLoaded", |_| start_page())?.forget();
    } else {
        start_page();
    }

    EventListener::new(&window, "pagehide", |_| stop_page())?.forget();
    EventListener::new(&window, "pageshow", |event| {
        let restored = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        if restored {
            start_page();
        }
    })?
    .forget();
    Ok(())
}

/// Registers a page-script callback for completed scans. The callback gets the
/// barcode string. Scans are delivered to every callback registered so far,
/// including ones registered before the page finished loading.
#[wasm_bindgen(js_name = onBarcodeScanned)]
pub fn on_barcode_scanned(callback: js_sys::Function) {
    let callback = Callback::from(move |scan: BarcodeScan| {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&scan.barcode)) {
            warn!(format!("barcode subscriber threw: {}", BehaviorError::from(err)));
        }
    });
    SCAN_SUBSCRIBERS.with(|subscribers| subscribers.subscribe(callback));
}
