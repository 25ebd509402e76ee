//! QDL: Quality Defect Ledger
//!
//! A CLI for quality engineers logging defect records per manufactured
//! part across production areas, persisted to a spreadsheet workbook plus
//! an autocomplete-history file.

pub mod cli;
pub mod core;
pub mod store;
