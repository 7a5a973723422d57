//! Port definitions: traits the environment implements.
//!
//! Ports are the boundaries between the ledger and the outside world.
//! Only id generation crosses that boundary; rendering, clipboard, and
//! notifications stay with the caller.

pub mod id_generator;

pub use id_generator::IdGenerator;
