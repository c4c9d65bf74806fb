//! One module per page routine. Each exposes a setup function that returns
//! whatever must stay alive for the routine to keep working (listeners,
//! timers, the scanner); dropping it detaches the routine.

pub mod alerts;
pub mod barcode;
pub mod currency_input;
pub mod delete_confirm;
pub mod filter_persistence;
pub mod table_search;
pub mod widgets;
