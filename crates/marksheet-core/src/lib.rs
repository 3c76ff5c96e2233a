//! Marksheet Core Library
//!
//! Mark reconciliation for project review committees: weight registry,
//! largest-remainder apportionment, spreadsheet header mapping, and the
//! SQLite store that canonical evaluations are upserted into.

pub mod apportion;
pub mod columns;
pub mod db;
pub mod error;
pub mod import;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod sheet;
pub mod store;
pub mod weights;
