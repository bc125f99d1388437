use crate::api::controllers::order_controller;
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(order_controller::get_user_orders))
        .route("/", post(order_controller::create_order))
        .route("/{id}", get(order_controller::get_order_by_id))
}
