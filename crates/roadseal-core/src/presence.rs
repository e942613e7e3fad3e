//! User presence check.
//!
//! The hash-chain scheme keeps its key material behind a user-presence gate:
//! the station operator must authenticate once before the device can be
//! used. The check is an external capability (on a phone, a biometric
//! prompt); the core only sees its boolean answer, asked exactly once at
//! construction.

/// Capability that reports whether the user has just authenticated.
pub trait PresenceCheck {
    /// True if the user is present and authenticated.
    fn authenticate_user(&self) -> bool;
}

/// Presence check with a fixed answer.
///
/// `FixedPresence::default()` always succeeds and stands in for stations
/// without an authentication prompt. `FixedPresence(false)` models a refused
/// prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPresence(pub bool);

impl Default for FixedPresence {
    fn default() -> Self {
        Self(true)
    }
}

impl PresenceCheck for FixedPresence {
    fn authenticate_user(&self) -> bool {
        self.0
    }
}

impl<F> PresenceCheck for F
where
    F: Fn() -> bool,
{
    fn authenticate_user(&self) -> bool {
        self()
    }
}
