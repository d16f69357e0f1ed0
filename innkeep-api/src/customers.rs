use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::info;

use innkeep_core::customer::{CreateCustomerRequest, Customer};
use innkeep_shared::topics::CUSTOMER_QUEUE;

use crate::error::AppError;
use crate::publish_event;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct CustomerCreated {
    message: &'static str,
    customer_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/customers", get(list_customers).post(create_customer))
}

/// POST /customers
async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerCreated>), AppError> {
    // 1. Validate required fields
    let new_customer = req
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // 2. Persist the row
    let id = state.customers.insert_customer(&new_customer).await?;
    let customer = Customer {
        id,
        name: new_customer.name,
        email: new_customer.email,
    };

    // 3. Publish the event; delivery failures never fail the request
    publish_event(
        state.events.as_ref(),
        CUSTOMER_QUEUE,
        &customer.id.to_string(),
        &customer.as_event(),
    )
    .await;

    info!("Customer created: {}", customer.id);

    Ok((
        StatusCode::CREATED,
        Json(CustomerCreated {
            message: "Customer created",
            customer_id: customer.id,
        }),
    ))
}

/// GET /customers
async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.customers.list_customers().await?;
    Ok(Json(customers))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::customer_app;
    use crate::test_support::{get, post_json, read_json, test_state, MemoryStore, RecordingPublisher};

    #[tokio::test]
    async fn test_create_customer_returns_201_and_publishes() {
        let store = Arc::new(MemoryStore::new());
        let events = Arc::new(RecordingPublisher::new());
        let app = customer_app(test_state(store.clone(), events.clone()));

        let response = app
            .oneshot(post_json(
                "/customers",
                json!({"name": "Alice", "email": "alice@example.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body, json!({"message": "Customer created", "customer_id": 1}));

        let published = events.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        let (topic, _key, payload) = &published[0];
        assert_eq!(topic, "customer_queue");
        let event: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(
            event,
            json!({"customer_id": 1, "name": "Alice", "email": "alice@example.com"})
        );
    }

    #[tokio::test]
    async fn test_create_customer_missing_field_returns_400() {
        let store = Arc::new(MemoryStore::new());
        let events = Arc::new(RecordingPublisher::new());
        let app = customer_app(test_state(store.clone(), events.clone()));

        let response = app
            .oneshot(post_json("/customers", json!({"name": "Alice"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body, json!({"error": "name and email are required"}));
        assert!(store.customers.lock().unwrap().is_empty());
        assert!(events.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_customer_store_failure_returns_500() {
        let store = Arc::new(MemoryStore::failing());
        let events = Arc::new(RecordingPublisher::new());
        let app = customer_app(test_state(store, events.clone()));

        let response = app
            .oneshot(post_json(
                "/customers",
                json!({"name": "Alice", "email": "alice@example.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body, json!({"error": "Database error"}));
        assert!(events.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_customers_returns_inserted_rows() {
        let store = Arc::new(MemoryStore::new());
        let events = Arc::new(RecordingPublisher::new());
        let app = customer_app(test_state(store.clone(), events.clone()));

        let response = app
            .clone()
            .oneshot(post_json(
                "/customers",
                json!({"name": "Alice", "email": "alice@example.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get("/customers")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body,
            json!([{"id": 1, "name": "Alice", "email": "alice@example.com"}])
        );
    }
}
