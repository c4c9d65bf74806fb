//! DOM contract between the server-rendered templates and the page behaviors.
//!
//! Templates follow the Bootstrap-flavored conventions below by default. A
//! page can override any of them by embedding a JSON object in
//! `<script type="application/json" id="pos-behaviors-config">`; missing keys
//! keep their defaults.

use serde::Deserialize;

use crate::Error;

/// Id of the optional element carrying a JSON [`PageConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "pos-behaviors-config";

/// Delay before non-permanent alerts are closed.
pub const ALERT_DISMISS_MS: u32 = 5_000;

/// Prompt shown before a delete action goes through.
pub const DELETE_CONFIRM_MESSAGE: &str =
    "¿Estás seguro de que deseas eliminar este elemento? Esta acción no se puede deshacer.";

/// Name of the window event broadcast after each completed scan.
pub const BARCODE_EVENT_NAME: &str = "barcodescanned";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Elements that get a Bootstrap tooltip.
    pub tooltip_selector: String,
    /// Elements that get a Bootstrap popover.
    pub popover_selector: String,
    /// Alerts closed automatically after [`ALERT_DISMISS_MS`].
    pub dismissible_alert_selector: String,
    /// Buttons and links that ask for confirmation before deleting.
    pub delete_confirm_selector: String,
    /// Inputs rendered as currency.
    pub currency_input_selector: String,
    /// Search box; its `data-table` attribute selects the filtered table.
    pub table_search_id: String,
    /// Filter form; its `data-form-id` attribute names the storage entry.
    pub filter_form_id: String,
    /// Input that receives scanner keystrokes.
    pub barcode_input_id: String,
    /// Also dispatch a `barcodescanned` event on `window` for page scripts.
    pub broadcast_dom_event: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            tooltip_selector: r#"[data-bs-toggle="tooltip"]"#.to_string(),
            popover_selector: r#"[data-bs-toggle="popover"]"#.to_string(),
            dismissible_alert_selector: ".alert:not(.alert-permanent)".to_string(),
            delete_confirm_selector: ".btn-delete-confirm".to_string(),
            currency_input_selector: ".currency-input".to_string(),
            table_search_id: "table-search".to_string(),
            filter_form_id: "filter-form".to_string(),
            barcode_input_id: "barcode-input".to_string(),
            broadcast_dom_event: true,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::InvalidConfig)
    }
}
