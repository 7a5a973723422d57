//! # splitbill-app
//!
//! Application layer: the bill ledger use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** the environment implements:
//!   - `IdGenerator`: opaque unique strings for new records
//! - Define the **driving** use-case struct:
//!   - `BillLedger`: add/remove/edit participants and items, compute totals
//!     and shares, export a summary
//! - Provide **in-process** id generators that need no IO
//! - Build the `BillSummary` derived view and its text and JSON renderings
//!
//! ## Dependency rule
//! Depends on `splitbill-domain` only. Never performs IO: the caller decides
//! where exports go and how errors are shown.

pub mod id_generators;
pub mod ports;
pub mod services;
pub mod summary;

pub use services::bill_ledger::BillLedger;
pub use summary::BillSummary;
