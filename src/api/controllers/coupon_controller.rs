use crate::api::request::ValidateCouponRequest;
use crate::security::jwt::AccessClaims;
use crate::services::coupon_service::CouponService;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Validate a coupon code against a cart subtotal
pub async fn validate_coupon(
    _claims: AccessClaims,
    Json(payload): Json<ValidateCouponRequest>,
) -> impl IntoResponse {
    let service = CouponService::new();

    match service
        .validate_coupon(&payload.code, &payload.subtotal)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
