use meadow_server_lib::data::database::*;
use meadow_server_lib::data::models::order::NewOrder;
use meadow_server_lib::data::models::order_detail::CheckoutDetail;
use meadow_server_lib::data::models::product::NewProduct;
use meadow_server_lib::data::models::user::NewUser;
use meadow_server_lib::data::repos::implementors::order_repo::OrderRepo;
use meadow_server_lib::data::repos::implementors::product_repo::ProductRepo;
use meadow_server_lib::data::repos::implementors::user_repo::UserRepo;
use meadow_server_lib::data::repos::traits::repository::Repository;
use meadow_server_lib::services::errors::CheckoutError;
use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;

async fn setup() -> Result<(), result::Error> {
    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use meadow_server_lib::data::models::schema::order_details::dsl::order_details;
    use meadow_server_lib::data::models::schema::order_items::dsl::order_items;
    use meadow_server_lib::data::models::schema::orders::dsl::orders;
    use meadow_server_lib::data::models::schema::products::dsl::products;
    use meadow_server_lib::data::models::schema::users::dsl::users;

    // Clean up in order due to foreign key constraints
    diesel::delete(order_details).execute(&mut conn).await?;
    diesel::delete(order_items).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

async fn create_test_user(username: &str) -> i32 {
    let repo = UserRepo::new();

    let test_user = NewUser {
        username,
        password_hash: "not-a-real-hash",
    };

    repo.add(test_user).await.expect("Failed to add user");

    repo.get_by_username(username)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id
}

async fn create_test_product(name: &str, price: &str, stock: i32) -> i32 {
    let repo = ProductRepo::new();

    let new_product = NewProduct {
        name,
        product_image_uri: None,
        description: Some("Test product for orders"),
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

fn new_order(user_id: i32, total: &str, tracking_number: &str) -> NewOrder {
    NewOrder {
        user_id,
        status: "pending".to_string(),
        total_amount: BigDecimal::from_str(total).unwrap(),
        shipping_cost: BigDecimal::from(0),
        payment_method: Some("cash".to_string()),
        tracking_number: tracking_number.to_string(),
    }
}

fn detail() -> CheckoutDetail {
    CheckoutDetail {
        recipient_name: "Ana Lopez".to_string(),
        recipient_phone: "+1987654321".to_string(),
        delivery_date: chrono::NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        delivery_slot_id: None,
        card_message: Some("Happy birthday!".to_string()),
    }
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_checkout_persists_full_aggregate() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("repo_checkout_user").await;
    let product_id = create_test_product("RepoProduct", "10.00", 5).await;
    let repo = OrderRepo::new();

    let items = vec![(product_id, 2, BigDecimal::from_str("10.00").unwrap())];

    let order_id = repo
        .create_checkout(new_order(user_id, "20.00", "MS-REPO000001"), items, detail())
        .await
        .expect("Failed to create checkout");

    let (order, items, order_detail) = repo
        .get_aggregate(order_id)
        .await
        .expect("Failed to load aggregate")
        .expect("Aggregate not found");

    assert_eq!(order.user_id, user_id);
    assert_eq!(order.tracking_number, "MS-REPO000001");
    assert_eq!(order.total_amount, BigDecimal::from_str("20.00").unwrap());

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0.quantity, 2);
    assert_eq!(items[0].1.product_id, product_id);

    let order_detail = order_detail.expect("Detail row missing");
    assert_eq!(order_detail.recipient_name, "Ana Lopez");
    assert_eq!(order_detail.card_message, Some("Happy birthday!".to_string()));

    // Stock was decremented inside the same transaction
    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(product.stock_quantity, 3);
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_checkout_insufficient_stock_rolls_back() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("repo_rollback_user").await;
    let product_id = create_test_product("ScarceProduct", "10.00", 1).await;
    let repo = OrderRepo::new();

    let items = vec![(product_id, 2, BigDecimal::from_str("10.00").unwrap())];

    let result = repo
        .create_checkout(new_order(user_id, "20.00", "MS-REPO000002"), items, detail())
        .await;

    assert_eq!(
        result.err(),
        Some(CheckoutError::InsufficientStock {
            product_id,
            name: "ScarceProduct".to_string(),
        })
    );

    // Header, items and detail were all rolled back
    let orders = repo
        .get_by_user_id(user_id)
        .await
        .expect("Failed to get orders");
    assert!(orders.is_none());

    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(product.stock_quantity, 1);
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_checkout_unknown_product_rolls_back() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("repo_ghost_user").await;
    let repo = OrderRepo::new();

    let items = vec![(99999, 1, BigDecimal::from_str("10.00").unwrap())];

    let result = repo
        .create_checkout(new_order(user_id, "10.00", "MS-REPO000003"), items, detail())
        .await;

    assert_eq!(result.err(), Some(CheckoutError::ProductNotFound(99999)));

    let orders = repo
        .get_by_user_id(user_id)
        .await
        .expect("Failed to get orders");
    assert!(orders.is_none());
}

#[tokio::test]
#[serial_test::serial]
async fn test_sequential_checkouts_deplete_stock() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("repo_deplete_user").await;
    let product_id = create_test_product("LimitedProduct", "10.00", 3).await;
    let repo = OrderRepo::new();

    repo.create_checkout(
        new_order(user_id, "20.00", "MS-REPO000004"),
        vec![(product_id, 2, BigDecimal::from_str("10.00").unwrap())],
        detail(),
    )
    .await
    .expect("First checkout failed");

    // Only one unit left; a second two-unit order must fail
    let result = repo
        .create_checkout(
            new_order(user_id, "20.00", "MS-REPO000005"),
            vec![(product_id, 2, BigDecimal::from_str("10.00").unwrap())],
            detail(),
        )
        .await;

    assert!(matches!(
        result,
        Err(CheckoutError::InsufficientStock { .. })
    ));

    let product = ProductRepo::new()
        .get_by_id(product_id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(product.stock_quantity, 1);
}

#[tokio::test]
#[serial_test::serial]
async fn test_tracking_number_exists() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("repo_tracking_user").await;
    let product_id = create_test_product("TrackedProduct", "10.00", 5).await;
    let repo = OrderRepo::new();

    repo.create_checkout(
        new_order(user_id, "10.00", "MS-TRACKED001"),
        vec![(product_id, 1, BigDecimal::from_str("10.00").unwrap())],
        detail(),
    )
    .await
    .expect("Checkout failed");

    assert!(repo
        .tracking_number_exists("MS-TRACKED001")
        .await
        .expect("Query failed"));
    assert!(!repo
        .tracking_number_exists("MS-UNUSED0001")
        .await
        .expect("Query failed"));
}

#[tokio::test]
#[serial_test::serial]
async fn test_get_by_user_id_not_found() {
    setup().await.expect("Setup failed");

    let repo = OrderRepo::new();

    let result = repo.get_by_user_id(99999).await.expect("Query failed");

    assert!(
        result.is_none(),
        "Expected None for non-existent user orders"
    );
}

#[tokio::test]
#[serial_test::serial]
async fn test_get_aggregate_not_found() {
    setup().await.expect("Setup failed");

    let repo = OrderRepo::new();

    let result = repo.get_aggregate(99999).await.expect("Query failed");

    assert!(result.is_none(), "Expected None for non-existent order");
}

#[tokio::test]
#[serial_test::serial]
async fn test_attach_aggregates_groups_by_order() {
    setup().await.expect("Setup failed");

    let user_id = create_test_user("repo_attach_user").await;
    let product_id = create_test_product("AttachedProduct", "10.00", 10).await;
    let repo = OrderRepo::new();

    repo.create_checkout(
        new_order(user_id, "10.00", "MS-ATTACH0001"),
        vec![(product_id, 1, BigDecimal::from_str("10.00").unwrap())],
        detail(),
    )
    .await
    .expect("First checkout failed");

    repo.create_checkout(
        new_order(user_id, "30.00", "MS-ATTACH0002"),
        vec![(product_id, 3, BigDecimal::from_str("10.00").unwrap())],
        detail(),
    )
    .await
    .expect("Second checkout failed");

    let orders = repo
        .get_by_user_id(user_id)
        .await
        .expect("Failed to get orders")
        .expect("No orders found");

    let aggregates = repo
        .attach_aggregates(orders)
        .await
        .expect("Failed to attach");

    assert_eq!(aggregates.len(), 2);
    for (order, items, order_detail) in &aggregates {
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].0.order_id, order.order_id);
        assert!(order_detail.is_some(), "Each order carries its detail row");
    }
}
