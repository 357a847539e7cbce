//! Transaction HTTP handlers.
//!
//! This module implements the transaction endpoints:
//! - POST /add - Validate and store a transaction
//! - GET /list - List every stored transaction
//!
//! The two endpoints treat store failures differently. A failed write is
//! answered with a normal `500 {"message": ...}` body, while a failed scan
//! propagates out of the handler as `AppError::Store`.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{
    error::AppError,
    models::transaction::{
        AddTransactionFailure, AddTransactionResponse, ListTransactionsResponse, NewTransaction,
    },
    services::transaction_service,
    state::AppState,
};

/// Add a transaction.
///
/// # Endpoint
///
/// `POST /add`
///
/// # Request Body
///
/// ```json
/// {
///   "desc": "Coffee",
///   "category": "Food",
///   "amount": 4.5,
///   "date": "2023-01-01",
///   "isPending": false,
///   "account": "checking"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Successfully added transaction Coffee", "transactionId": "..."}`
/// - **Error (400)**: Body is not JSON or a field has the wrong type
///
/// The body is parsed as JSON whatever `Content-Type` the client sends.
/// - **Error (500)**: Store rejected the write, `{"message": "Unable to add transaction Coffee"}`
pub async fn add_transaction(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Request body must be valid JSON: {e}")))?;

    let new_transaction = NewTransaction::from_payload(&payload).inspect_err(|e| {
        tracing::warn!("Validation failed: {}", e);
    })?;
    let desc = new_transaction.desc.clone();

    match transaction_service::add_transaction(
        state.table.as_ref(),
        &state.table_name,
        new_transaction,
    )
    .await
    {
        Ok(transaction) => Ok(Json(AddTransactionResponse::new(&transaction)).into_response()),
        Err(e) => {
            // Write failures become a normal response, not a fault
            tracing::error!("Unable to add transaction {}: {}", desc, e);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AddTransactionFailure::new(&desc)),
            )
                .into_response())
        }
    }
}

/// List all transactions.
///
/// # Endpoint
///
/// `GET /list`
///
/// # Response
///
/// - **Success (200 OK)**: every stored transaction, in store order
/// - **Error (502)**: Scan failed; the store error propagates as a fault
///
/// ```json
/// {
///   "transactions": [
///     {
///       "id": "01890a5d-ac96-774b-bcce-b302099a8057",
///       "desc": "Coffee",
///       "category": "Food",
///       "amount": 4.5,
///       "date": 1672531200000,
///       "isPending": false,
///       "account": "checking"
///     }
///   ]
/// }
/// ```
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<ListTransactionsResponse>, AppError> {
    let transactions =
        transaction_service::list_transactions(state.table.as_ref(), &state.table_name)
            .await
            .inspect_err(|e| tracing::error!("Scan failed to load data: {}", e))?;

    Ok(Json(ListTransactionsResponse { transactions }))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        models::transaction::{
            AddTransactionResponse, ListTransactionsResponse, TRANSACTION_PROJECTION, Transaction,
        },
        routes,
        state::AppState,
        store::{Item, MockTableClient, StoreError, TableClient, memory::InMemoryTable},
    };

    fn server_with(table: Arc<dyn TableClient>) -> TestServer {
        let app = routes::router(AppState::new(table, "transactions"));
        TestServer::new(app).expect("Could not create test server.")
    }

    fn coffee() -> Value {
        json!({
            "desc": "Coffee",
            "category": "Food",
            "amount": 4.5,
            "date": "2023-01-01",
            "isPending": false,
            "account": "checking"
        })
    }

    fn store_fault() -> StoreError {
        StoreError::Database(sqlx::Error::PoolTimedOut)
    }

    #[tokio::test]
    async fn add_then_list_returns_the_transaction() {
        let server = server_with(Arc::new(InMemoryTable::new()));

        let added = server.post("/add").json(&coffee()).await;
        added.assert_status_ok();
        let added: AddTransactionResponse = added.json();
        assert_eq!(added.message, "Successfully added transaction Coffee");
        assert!(!added.transaction_id.is_empty());

        let listed = server.get("/list").await;
        listed.assert_status_ok();
        let listed: ListTransactionsResponse = listed.json();
        assert_eq!(listed.transactions.len(), 1);

        let stored: Transaction =
            serde_json::from_value(Value::Object(listed.transactions[0].clone())).unwrap();
        assert_eq!(
            stored,
            Transaction {
                id: added.transaction_id,
                desc: "Coffee".to_string(),
                category: "Food".to_string(),
                amount: 4.5,
                date: 1_672_531_200_000,
                is_pending: false,
                account: "checking".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn list_of_empty_table_is_empty() {
        let server = server_with(Arc::new(InMemoryTable::new()));

        let response = server.get("/list").await;

        response.assert_status_ok();
        response.assert_json(&json!({"transactions": []}));
    }

    #[tokio::test]
    async fn list_returns_every_added_transaction_with_all_fields() {
        let server = server_with(Arc::new(InMemoryTable::new()));
        let mut ids = HashSet::new();

        for _ in 0..5 {
            let added: AddTransactionResponse = server.post("/add").json(&coffee()).await.json();
            ids.insert(added.transaction_id);
        }

        let listed: ListTransactionsResponse = server.get("/list").await.json();

        // Identical bodies still produce distinct records
        assert_eq!(ids.len(), 5);
        assert_eq!(listed.transactions.len(), 5);
        for item in &listed.transactions {
            assert_eq!(item.len(), TRANSACTION_PROJECTION.len());
            for name in TRANSACTION_PROJECTION {
                assert!(item.contains_key(*name), "listed item missing `{name}`");
            }
            assert!(ids.contains(item["id"].as_str().unwrap()));
        }
    }

    #[tokio::test]
    async fn wrong_amount_type_is_rejected_without_writing() {
        let mut table = MockTableClient::new();
        table.expect_put().never();
        let server = server_with(Arc::new(table));

        let mut body = coffee();
        body["desc"] = json!("Bad");
        body["amount"] = json!("not-a-number");
        let response = server.post("/add").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"]["code"], "validation_failed");
        assert!(error["error"]["message"].as_str().unwrap().contains("amount"));
    }

    #[tokio::test]
    async fn string_is_pending_is_rejected_without_writing() {
        let table = Arc::new(InMemoryTable::new());
        let server = server_with(table.clone());

        let mut body = coffee();
        body["isPending"] = json!("true");
        let response = server.post("/add").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(
            table
                .scan("transactions", TRANSACTION_PROJECTION)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let mut table = MockTableClient::new();
        table.expect_put().never();
        let server = server_with(Arc::new(table));

        let response = server
            .post("/add")
            .text("{\"desc\": ")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"]["code"], "validation_failed");
    }

    #[tokio::test]
    async fn json_body_is_accepted_without_json_content_type() {
        let server = server_with(Arc::new(InMemoryTable::new()));

        let response = server
            .post("/add")
            .text(coffee().to_string())
            .content_type("text/plain")
            .await;

        response.assert_status_ok();
        let added: AddTransactionResponse = response.json();
        assert_eq!(added.message, "Successfully added transaction Coffee");
    }

    #[tokio::test]
    async fn failed_put_returns_500_message() {
        let mut table = MockTableClient::new();
        table
            .expect_put()
            .times(1)
            .returning(|_, _| Err(store_fault()));
        let server = server_with(Arc::new(table));

        let response = server.post("/add").json(&coffee()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({"message": "Unable to add transaction Coffee"}));
    }

    #[tokio::test]
    async fn put_receives_table_name_and_keyed_item() {
        let mut table = MockTableClient::new();
        table
            .expect_put()
            .withf(|table, item| {
                table == "transactions"
                    && item["id"].is_string()
                    && item["date"] == json!(1_672_531_200_000_i64)
                    && item["isPending"] == json!(false)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let server = server_with(Arc::new(table));

        server.post("/add").json(&coffee()).await.assert_status_ok();
    }

    #[tokio::test]
    async fn failed_scan_is_a_fault_not_a_listing() {
        let mut table = MockTableClient::new();
        table
            .expect_scan()
            .times(1)
            .returning(|_, _| Err(store_fault()));
        let server = server_with(Arc::new(table));

        let response = server.get("/list").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let error: Value = response.json();
        assert_eq!(error["error"]["code"], "store_unavailable");
        assert!(error.get("transactions").is_none());
        assert!(error.get("message").is_none());
    }

    #[tokio::test]
    async fn list_scans_configured_table_with_transaction_projection() {
        let mut table = MockTableClient::new();
        table
            .expect_scan()
            .withf(|table, projection| {
                table == "transactions" && *projection == TRANSACTION_PROJECTION
            })
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let server = server_with(Arc::new(table));

        server.get("/list").await.assert_status_ok();
    }

    #[tokio::test]
    async fn list_drops_attributes_outside_the_projection() {
        let table = Arc::new(InMemoryTable::new());
        let stored: Item = match json!({
            "id": "legacy-1",
            "desc": "Imported",
            "category": "Misc",
            "amount": 10,
            "date": 1_672_531_200_000_i64,
            "isPending": true,
            "account": "savings",
            "importedBy": "batch-job"
        }) {
            Value::Object(item) => item,
            _ => unreachable!(),
        };
        table.put("transactions", stored).await.unwrap();
        let server = server_with(table);

        let listed: ListTransactionsResponse = server.get("/list").await.json();

        assert_eq!(listed.transactions.len(), 1);
        let item = &listed.transactions[0];
        assert!(!item.contains_key("importedBy"));
        assert_eq!(item.len(), TRANSACTION_PROJECTION.len());
        assert_eq!(item["desc"], "Imported");
    }
}
