//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: the stored record
//! - `NewTransaction`: a validated add request, before an id is assigned
//! - `AddTransactionResponse` / `AddTransactionFailure` / `ListTransactionsResponse`:
//!   response bodies returned to clients

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::store::{Item, Projection};

/// Attributes returned by a transaction listing.
pub const TRANSACTION_PROJECTION: Projection = &[
    "id",
    "desc",
    "category",
    "amount",
    "date",
    "isPending",
    "account",
];

/// A transaction record as stored in the table.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "01890a5d-ac96-774b-bcce-b302099a8057",
///   "desc": "Coffee",
///   "category": "Food",
///   "amount": 4.5,
///   "date": 1672531200000,
///   "isPending": false,
///   "account": "checking"
/// }
/// ```
///
/// Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, generated when the record is created
    pub id: String,

    /// Human-readable description
    pub desc: String,

    pub category: String,

    /// Signed amount; fractional values allowed
    pub amount: f64,

    /// Milliseconds since the Unix epoch
    pub date: i64,

    pub is_pending: bool,

    pub account: String,
}

impl Transaction {
    /// Convert into a table item.
    pub fn into_item(self) -> Item {
        let mut item = Item::new();
        item.insert("id".to_string(), Value::String(self.id));
        item.insert("desc".to_string(), Value::String(self.desc));
        item.insert("category".to_string(), Value::String(self.category));
        item.insert("amount".to_string(), Value::from(self.amount));
        item.insert("date".to_string(), Value::from(self.date));
        item.insert("isPending".to_string(), Value::Bool(self.is_pending));
        item.insert("account".to_string(), Value::String(self.account));
        item
    }
}

/// A validated request to add a transaction.
///
/// # Validation
///
/// Built from the raw request body with [`NewTransaction::from_payload`]:
/// - `desc`, `category`, `account`: must be JSON strings
/// - `amount`: must be a JSON number
/// - `isPending`: must be a JSON boolean
/// - `date`: must be a JSON string that parses to a point in time
///
/// Values of the wrong type are rejected rather than coerced, so
/// `"isPending": "true"` or `"amount": "4.5"` fail validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub desc: String,
    pub category: String,
    pub amount: f64,
    /// Parsed date, in milliseconds since the Unix epoch
    pub date: i64,
    pub is_pending: bool,
    pub account: String,
}

impl NewTransaction {
    /// Validate a raw add-transaction request body.
    ///
    /// # Errors
    ///
    /// `AppError::Validation` naming the first field that fails its check.
    pub fn from_payload(payload: &Value) -> Result<Self, AppError> {
        let fields = payload.as_object().ok_or_else(|| {
            AppError::Validation("Request body must be a JSON object".to_string())
        })?;

        let string_field = |name: &str| -> Result<String, AppError> {
            fields
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation(format!("`{name}` must be a string")))
        };

        let desc = string_field("desc")?;
        let category = string_field("category")?;
        let account = string_field("account")?;

        let is_pending = fields
            .get("isPending")
            .and_then(Value::as_bool)
            .ok_or_else(|| AppError::Validation("`isPending` must be a boolean".to_string()))?;

        let amount = fields
            .get("amount")
            .and_then(Value::as_f64)
            .ok_or_else(|| AppError::Validation("`amount` must be a number".to_string()))?;

        let date = fields
            .get("date")
            .and_then(Value::as_str)
            .and_then(parse_date_millis)
            .ok_or_else(|| AppError::Validation("`date` must be a valid date string".to_string()))?;

        Ok(Self {
            desc,
            category,
            amount,
            date,
            is_pending,
            account,
        })
    }

    /// Attach an identifier, producing the record to store.
    pub fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            desc: self.desc,
            category: self.category,
            amount: self.amount,
            date: self.date,
            is_pending: self.is_pending,
            account: self.account,
        }
    }
}

/// Parse a date string into milliseconds since the Unix epoch.
///
/// # Accepted Formats
///
/// - `2023`, `2023-01`, `2023-01-01` (start of the year, month or day, UTC)
/// - `2023-01-01T10:30:00Z`, `2023-01-01T10:30:00.250+02:00` (RFC 3339)
/// - `2023-01-01T10:30Z`, `2023-01-01T10:30+02:00`, `2023-01-01T10:30:00+0200`
///   (offset with optional seconds)
/// - `Sun, 01 Jan 2023 10:30:00 GMT` (RFC 2822)
/// - `2023-01-01T10:30`, `2023-01-01T10:30:00[.fff]` (no offset, read as UTC)
///
/// Returns `None` if the string matches none of these.
pub fn parse_date_millis(input: &str) -> Option<i64> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.timestamp_millis());
    }
    // `%#z` takes `Z`, `+02`, `+0200` and `+02:00`
    for format in ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.timestamp_millis());
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    parse_calendar_date(input)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// Parse `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, defaulting missing parts to 1.
fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('-');
    let year = parts.next().filter(|y| y.len() == 4)?;
    let month = parts.next();
    let day = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let is_two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !year.bytes().all(|b| b.is_ascii_digit())
        || month.is_some_and(|m| !is_two_digits(m))
        || day.is_some_and(|d| !is_two_digits(d))
    {
        return None;
    }

    NaiveDate::from_ymd_opt(
        year.parse().ok()?,
        month.map_or(Some(1), |m| m.parse().ok())?,
        day.map_or(Some(1), |d| d.parse().ok())?,
    )
}

/// Response body for a successful add.
///
/// ```json
/// {
///   "message": "Successfully added transaction Coffee",
///   "transactionId": "01890a5d-ac96-774b-bcce-b302099a8057"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTransactionResponse {
    pub message: String,
    pub transaction_id: String,
}

impl AddTransactionResponse {
    pub fn new(transaction: &Transaction) -> Self {
        Self {
            message: format!("Successfully added transaction {}", transaction.desc),
            transaction_id: transaction.id.clone(),
        }
    }
}

/// Response body when the store rejects an add.
///
/// ```json
/// { "message": "Unable to add transaction Coffee" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct AddTransactionFailure {
    pub message: String,
}

impl AddTransactionFailure {
    pub fn new(desc: &str) -> Self {
        Self {
            message: format!("Unable to add transaction {desc}"),
        }
    }
}

/// Response body for a listing.
///
/// Items are passed through as the store returned them, so an item missing a
/// projected attribute is listed without it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTransactionsResponse {
    pub transactions: Vec<Item>,
}
