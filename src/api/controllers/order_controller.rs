use crate::api::request::CreateOrderRequest;
use crate::api::response::{ErrorResponse, OrderResponse};
use crate::security::jwt::AccessClaims;
use crate::services::order_service::OrderService;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

const PAYMENT_METHODS: [&str; 3] = ["cash", "card", "transfer"];

fn checkout_rejection(reason: &str) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            message: "Failed to create order".to_string(),
            error: reason.to_string(),
        }),
    )
        .into_response()
}

/// Create a new order (checkout)
pub async fn create_order(
    claims: AccessClaims,
    Json(payload): Json<CreateOrderRequest>,
) -> impl IntoResponse {
    if payload.items.is_empty() {
        return checkout_rejection("Order must contain at least one item");
    }

    if payload.items.iter().any(|item| item.quantity < 1) {
        return checkout_rejection("Item quantity must be at least 1");
    }

    if payload.recipient_name.is_empty() || payload.recipient_name.len() > 255 {
        return checkout_rejection("Recipient name must be between 1 and 255 characters");
    }

    if payload.recipient_phone.is_empty() || payload.recipient_phone.len() > 20 {
        return checkout_rejection("Recipient phone must be between 1 and 20 characters");
    }

    if payload.delivery_date <= chrono::Utc::now().date_naive() {
        return checkout_rejection("Delivery date must be in the future");
    }

    if let Some(message) = &payload.card_message {
        if message.len() > 500 {
            return checkout_rejection("Card message must not exceed 500 characters");
        }
    }

    if let Some(method) = payload.payment_method.as_deref() {
        if !PAYMENT_METHODS.contains(&method) {
            return checkout_rejection("Invalid payment method");
        }
    }

    let service = OrderService::new();

    match service.create_order(claims.user_id(), payload).await {
        Ok(aggregate) => {
            (StatusCode::CREATED, Json(OrderResponse::from(aggregate))).into_response()
        }
        Err(e) => checkout_rejection(&e.to_string()),
    }
}

/// Get order by ID. Users can only view their own orders.
pub async fn get_order_by_id(claims: AccessClaims, Path(order_id): Path<i32>) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_order(order_id).await {
        Ok(Some(aggregate)) => {
            if aggregate.0.user_id != claims.user_id() {
                return (StatusCode::FORBIDDEN, "Unauthorized").into_response();
            }
            (StatusCode::OK, Json(OrderResponse::from(aggregate))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Order not found").into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Get all orders of the authenticated user
pub async fn get_user_orders(claims: AccessClaims) -> impl IntoResponse {
    let service = OrderService::new();

    match service.get_user_orders(claims.user_id()).await {
        Ok(aggregates) => {
            let response: Vec<OrderResponse> = aggregates
                .unwrap_or_default()
                .into_iter()
                .map(OrderResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
