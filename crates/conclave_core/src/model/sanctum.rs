//! Sanctum locations, keyed by mantra.

use serde::Serialize;

/// Street address of a sanctum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanctumLocation {
    pub street: String,
    pub city: String,
    pub country: String,
}

/// One persisted sanctum row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sanctum {
    pub mantra: String,
    #[serde(flatten)]
    pub location: SanctumLocation,
}
