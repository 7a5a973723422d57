//! Id generator port: the environment's unique-string facility.

/// Hands out identifiers for new participants and items.
///
/// Implementations must never return the same string twice for the lifetime
/// of a ledger, including after the record that used it has been removed.
pub trait IdGenerator {
    /// Produce the next unused identifier.
    fn next_id(&mut self) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}
