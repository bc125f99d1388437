use crate::api::controllers::coupon_controller;
use axum::routing::post;
use axum::Router;

pub fn routes() -> Router {
    Router::new().route("/validate", post(coupon_controller::validate_coupon))
}
