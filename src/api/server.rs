use crate::api::routes::{coupon_routes, order_routes};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

// TODO: Add swagger documentation
pub async fn start() {
    let cors_layer = CorsLayer::new().allow_origin(Any);
    let router = Router::new()
        .route("/api", get(|| async { "Meadow Server API is running!" }))
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/coupons", coupon_routes::routes())
        .layer(cors_layer)
        .with_state::<()>(());

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 3000)))
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://127.0.0.1:3000");

    axum::serve(listener, router)
        .await
        .expect("Failed to start the server");
}
