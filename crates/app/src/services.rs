//! Application services: use-case implementations.
//!
//! Each service accepts its port implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from the caller's
//! environment.

pub mod bill_ledger;
