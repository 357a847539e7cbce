//! Data models for stored records and API bodies.

/// Transaction record, validation and response bodies
pub mod transaction;
