//! Shared geometry fixtures for unit tests.

pub(crate) mod multilinestring;
pub(crate) mod multipolygon;
