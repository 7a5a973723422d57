//! # splitbill-domain
//!
//! Pure domain model for the splitbill bill-splitting utility.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Participants** (people sharing the bill)
//! - Define **Bill items** (priced lines assigned to one or more participants)
//! - Money helpers: tax application and currency formatting
//! - Contain all invariant enforcement for a single record
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It never generates identifiers or touches IO: ids are handed in by the
//! `IdGenerator` port defined in the `app` crate.

pub mod error;
pub mod id;
pub mod money;

pub mod item;
pub mod participant;
