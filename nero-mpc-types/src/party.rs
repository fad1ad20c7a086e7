//! Party identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a participant in the 2-of-2 scheme. Always `1` or `2` in this
/// deployment, but kept as a plain `u16` rather than a two-variant
/// enum so the Lagrange-coefficient machinery in `nero-mpc-core` can treat
/// it as an arbitrary evaluation point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(pub u16);

impl PartyId {
    /// This party.
    pub const LOCAL: PartyId = PartyId(1);
    /// The remote counterparty (the backend).
    pub const REMOTE: PartyId = PartyId(2);

    /// Converts to a `u16`.
    pub fn into_inner(self) -> u16 {
        self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for PartyId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
