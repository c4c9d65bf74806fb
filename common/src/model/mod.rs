pub mod barcode;
pub mod filter_set;
