//! Business logic services.
//!
//! Services sit between the HTTP handlers and the table client. They own id
//! generation and the shape of each store call.

pub mod transaction_service;
