//! Platform-independent logic behind the POS page behaviors.
//!
//! Everything in this crate is plain Rust with no `web-sys` dependency, so the
//! rules that decide what the page does (how a currency field is rendered,
//! which table rows survive a search, what a stored filter blob looks like,
//! when a keystroke burst counts as a barcode scan) are unit tested natively.
//! The `frontend` crate only moves values between these functions and the DOM.

pub mod config;
pub mod confirm;
pub mod currency;
pub mod error;
pub mod model;
pub mod search;

pub use error::Error;
