//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, shared state)
//! 2. Validates input and calls the transaction service
//! 3. Returns HTTP response (JSON, status code)

/// Service health endpoint
pub mod health;
/// Add and list transaction endpoints
pub mod transactions;
