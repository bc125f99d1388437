use meadow_server_lib::api::response::{CouponValidationResponse, ErrorResponse, OrderResponse};
use meadow_server_lib::api::routes::{coupon_routes, order_routes};
use meadow_server_lib::data::database::Database;
use meadow_server_lib::data::models::coupon::NewCoupon;
use meadow_server_lib::data::models::product::NewProduct;
use meadow_server_lib::data::models::user::NewUser;
use meadow_server_lib::data::repos::implementors::coupon_repo::CouponRepo;
use meadow_server_lib::data::repos::implementors::product_repo::ProductRepo;
use meadow_server_lib::data::repos::implementors::user_repo::UserRepo;
use meadow_server_lib::data::repos::traits::repository::Repository;
use meadow_server_lib::security::jwt::JwtService;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use http_body_util::BodyExt;
use serde_json::json;
use std::str::FromStr;
use tower::ServiceExt;

fn app() -> Router {
    Router::new()
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/coupons", coupon_routes::routes())
}

async fn setup() -> Result<(), result::Error> {
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "controller-test-secret");
    }

    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use meadow_server_lib::data::models::schema::coupons::dsl::coupons;
    use meadow_server_lib::data::models::schema::order_details::dsl::order_details;
    use meadow_server_lib::data::models::schema::order_items::dsl::order_items;
    use meadow_server_lib::data::models::schema::orders::dsl::orders;
    use meadow_server_lib::data::models::schema::products::dsl::products;
    use meadow_server_lib::data::models::schema::users::dsl::users;

    diesel::delete(order_details).execute(&mut conn).await?;
    diesel::delete(order_items).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(coupons).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

async fn create_user_with_token(username: &str) -> (i32, String) {
    let repo = UserRepo::new();

    let test_user = NewUser {
        username,
        password_hash: "not-a-real-hash",
    };

    repo.add(test_user).await.expect("Failed to add user");

    let user_id = repo
        .get_by_username(username)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id;

    let token = JwtService::new()
        .generate_token(user_id)
        .expect("Failed to generate token");

    (user_id, token)
}

async fn create_test_product(name: &str, price: &str, stock: i32) -> i32 {
    let repo = ProductRepo::new();

    let new_product = NewProduct {
        name,
        product_image_uri: None,
        description: None,
        price: BigDecimal::from_str(price).unwrap(),
        stock_quantity: stock,
    };

    repo.add(new_product).await.expect("Failed to add product");

    repo.get_by_name(name)
        .await
        .expect("Failed to get product")
        .expect("Product not found")
        .product_id
}

fn order_body(product_id: i32, quantity: i32) -> serde_json::Value {
    json!({
        "items": [{ "product_id": product_id, "quantity": quantity }],
        "recipient_name": "Maria Garcia",
        "recipient_phone": "+1234567890",
        "delivery_date": "2026-12-24",
        "payment_method": "card",
    })
}

fn post_json(uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");

    let builder = match token {
        Some(value) => builder.header("authorization", format!("Bearer {}", value)),
        None => builder,
    };

    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .expect("Failed to build request")
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("Failed to build request")
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_order_requires_token() {
    setup().await.expect("Setup failed");

    let response = app()
        .oneshot(post_json("/api/v1/orders", None, &order_body(1, 1)))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_order_returns_created_aggregate() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("api_checkout_user").await;
    let product_id = create_test_product("Sunflower Bunch", "12.00", 5).await;

    let response = app()
        .oneshot(post_json(
            "/api/v1/orders",
            Some(&token),
            &order_body(product_id, 2),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let order: OrderResponse = serde_json::from_slice(&bytes).expect("Invalid response body");

    assert_eq!(order.status, "pending");
    assert_eq!(order.total_amount, BigDecimal::from_str("24.00").unwrap());
    assert!(order.tracking_number.starts_with("MS-"));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 2);

    let detail = order.detail.expect("Detail missing from response");
    assert_eq!(detail.recipient_name, "Maria Garcia");
    assert_eq!(detail.delivery_date, "2026-12-24");
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_order_insufficient_stock_unprocessable() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("api_stock_user").await;
    let product_id = create_test_product("Single Rose", "3.00", 1).await;

    let response = app()
        .oneshot(post_json(
            "/api/v1/orders",
            Some(&token),
            &order_body(product_id, 2),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let error: ErrorResponse = serde_json::from_slice(&bytes).expect("Invalid error body");

    assert_eq!(error.message, "Failed to create order");
    assert_eq!(error.error, "Insufficient stock for product: Single Rose");
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_order_empty_cart_unprocessable() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("api_empty_cart_user").await;

    let body = json!({
        "items": [],
        "recipient_name": "Maria Garcia",
        "recipient_phone": "+1234567890",
        "delivery_date": "2026-12-24",
    });

    let response = app()
        .oneshot(post_json("/api/v1/orders", Some(&token), &body))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_order_invalid_quantity_unprocessable() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("api_bad_qty_user").await;
    let product_id = create_test_product("Carnation Mix", "8.00", 5).await;

    let response = app()
        .oneshot(post_json(
            "/api/v1/orders",
            Some(&token),
            &order_body(product_id, 0),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[serial_test::serial]
async fn test_get_order_scoped_to_owner() {
    setup().await.expect("Setup failed");

    let (_, owner_token) = create_user_with_token("api_owner").await;
    let (_, other_token) = create_user_with_token("api_other").await;
    let product_id = create_test_product("Gerbera Pot", "9.00", 5).await;

    let response = app()
        .oneshot(post_json(
            "/api/v1/orders",
            Some(&owner_token),
            &order_body(product_id, 1),
        ))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let order: OrderResponse = serde_json::from_slice(&bytes).expect("Invalid response body");
    let uri = format!("/api/v1/orders/{}", order.order_id);

    // Owner can read it back
    let response = app()
        .oneshot(get_with_token(&uri, &owner_token))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    // Anyone else is rejected
    let response = app()
        .oneshot(get_with_token(&uri, &other_token))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial_test::serial]
async fn test_get_order_not_found() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("api_404_user").await;

    let response = app()
        .oneshot(get_with_token("/api/v1/orders/99999", &token))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial_test::serial]
async fn test_get_user_orders_lists_own_orders() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("api_list_user").await;
    let product_id = create_test_product("Freesia Bunch", "7.00", 10).await;

    for _ in 0..2 {
        let response = app()
            .oneshot(post_json(
                "/api/v1/orders",
                Some(&token),
                &order_body(product_id, 1),
            ))
            .await
            .expect("Request failed");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app()
        .oneshot(get_with_token("/api/v1/orders", &token))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let orders: Vec<OrderResponse> = serde_json::from_slice(&bytes).expect("Invalid body");
    assert_eq!(orders.len(), 2);
}

#[tokio::test]
#[serial_test::serial]
async fn test_validate_coupon_endpoint() {
    setup().await.expect("Setup failed");

    let (_, token) = create_user_with_token("api_coupon_user").await;

    CouponRepo::new()
        .add(NewCoupon {
            code: "SAVE10",
            discount_type: "percentage",
            value: BigDecimal::from_str("10.00").unwrap(),
            min_purchase: None,
            expiry_date: None,
        })
        .await
        .expect("Failed to add coupon");

    let body = json!({ "code": "SAVE10", "subtotal": "100.00" });

    let response = app()
        .oneshot(post_json("/api/v1/coupons/validate", Some(&token), &body))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let result: CouponValidationResponse =
        serde_json::from_slice(&bytes).expect("Invalid body");

    assert!(result.valid);
    assert_eq!(result.discount, BigDecimal::from_str("10.00").unwrap());

    // Unknown codes report invalid but still return 200
    let body = json!({ "code": "NOSUCHCODE", "subtotal": "100.00" });

    let response = app()
        .oneshot(post_json("/api/v1/coupons/validate", Some(&token), &body))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let result: CouponValidationResponse =
        serde_json::from_slice(&bytes).expect("Invalid body");

    assert!(!result.valid);
    assert_eq!(result.message, "Coupon not found");
}
