use std::collections::HashMap;

use crate::data::database::Database;
use crate::data::models::order::{NewOrder, Order};
use crate::data::models::order_detail::{CheckoutDetail, OrderDetail};
use crate::data::models::order_item::{NewOrderItem, OrderItem};
use crate::data::models::product::Product;
use crate::services::errors::CheckoutError;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

/// An order together with its item snapshots (and their products) and its
/// delivery detail, loaded in one query batch.
pub type OrderAggregate = (Order, Vec<(OrderItem, Product)>, Option<OrderDetail>);

pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }

    /// Persists a full checkout in a single transaction: the order header,
    /// one item row per cart line, the stock decrements and the delivery
    /// detail. Any failure rolls the whole transaction back.
    ///
    /// Items are (product_id, quantity, unit_price) triples; the unit price
    /// is the snapshot taken by the service when it priced the cart.
    pub async fn create_checkout(
        &self,
        new_order: NewOrder,
        items: Vec<(i32, i32, BigDecimal)>,
        detail: CheckoutDetail,
    ) -> Result<i32, CheckoutError> {
        use crate::data::models::schema::order_details::dsl::order_details;
        use crate::data::models::schema::order_items::dsl::order_items;
        use crate::data::models::schema::orders::dsl::orders;
        use crate::data::models::schema::products::dsl::{
            product_id as product_id_col, products, stock_quantity,
        };

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            CheckoutError::from(result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            ))
        })?;

        conn.transaction::<i32, CheckoutError, _>(|connection| {
            async move {
                diesel::insert_into(orders)
                    .values(&new_order)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                for (pid, qty, unit_price) in items {
                    // Re-fetch inside the transaction: the catalog row may have
                    // changed since the service priced the cart.
                    let product = match products
                        .filter(product_id_col.eq(pid))
                        .first::<Product>(connection)
                        .await
                    {
                        Ok(value) => value,
                        Err(result::Error::NotFound) => {
                            return Err(CheckoutError::ProductNotFound(pid));
                        }
                        Err(e) => return Err(CheckoutError::from(e)),
                    };

                    if product.stock_quantity < qty {
                        return Err(CheckoutError::InsufficientStock {
                            product_id: pid,
                            name: product.name,
                        });
                    }

                    let new_item = NewOrderItem {
                        order_id: new_id,
                        product_id: pid,
                        quantity: qty,
                        unit_price,
                    };

                    diesel::insert_into(order_items)
                        .values(&new_item)
                        .execute(connection)
                        .await?;

                    // Conditional decrement: zero affected rows means a
                    // concurrent checkout took the stock between our read
                    // and this write.
                    let updated = diesel::update(
                        products
                            .filter(product_id_col.eq(pid))
                            .filter(stock_quantity.ge(qty)),
                    )
                    .set(stock_quantity.eq(stock_quantity - qty))
                    .execute(connection)
                    .await?;

                    if updated == 0 {
                        return Err(CheckoutError::InsufficientStock {
                            product_id: pid,
                            name: product.name,
                        });
                    }
                }

                let new_detail = detail.into_new_detail(new_id);

                diesel::insert_into(order_details)
                    .values(&new_detail)
                    .execute(connection)
                    .await?;

                Ok(new_id)
            }
            .scope_boxed()
        })
        .await
    }

    /// Loads the full aggregate for an order, excluding soft-deleted orders.
    pub async fn get_aggregate(
        &self,
        id: i32,
    ) -> Result<Option<OrderAggregate>, result::Error> {
        use crate::data::models::schema::order_details::dsl::{
            order_id as detail_order_id, order_details,
        };
        use crate::data::models::schema::order_items::dsl::{
            order_id as item_order_id, order_items,
        };
        use crate::data::models::schema::orders::dsl::{deleted_at, order_id, orders};
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let order = match orders
            .filter(order_id.eq(id))
            .filter(deleted_at.is_null())
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => value,
            Err(result::Error::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        let items = order_items
            .inner_join(products)
            .filter(item_order_id.eq(id))
            .load::<(OrderItem, Product)>(&mut conn)
            .await?;

        let detail = match order_details
            .filter(detail_order_id.eq(id))
            .first::<OrderDetail>(&mut conn)
            .await
        {
            Ok(value) => Some(value),
            Err(result::Error::NotFound) => None,
            Err(e) => return Err(e),
        };

        Ok(Some((order, items, detail)))
    }

    /// Retrieves all orders for a specific user by user_id.
    pub async fn get_by_user_id(
        &self,
        user_id_query: i32,
    ) -> Result<Option<Vec<Order>>, result::Error> {
        use crate::data::models::schema::orders::dsl::{deleted_at, orders, user_id};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders
            .filter(user_id.eq(user_id_query))
            .filter(deleted_at.is_null())
            .load::<Order>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Attaches item snapshots and delivery details to a list of orders in
    /// one query batch per relation.
    pub async fn attach_aggregates(
        &self,
        orders_list: Vec<Order>,
    ) -> Result<Vec<OrderAggregate>, result::Error> {
        if orders_list.is_empty() {
            return Ok(Vec::new());
        }

        use crate::data::models::schema::order_details::dsl::{
            order_id as detail_order_id, order_details,
        };
        use crate::data::models::schema::order_items::dsl::{
            order_id as item_order_id, order_items,
        };
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let ids: Vec<i32> = orders_list.iter().map(|o| o.order_id).collect();

        let items_data: Vec<(OrderItem, Product)> = order_items
            .inner_join(products)
            .filter(item_order_id.eq_any(&ids))
            .load::<(OrderItem, Product)>(&mut conn)
            .await?;

        let details_data: Vec<OrderDetail> = order_details
            .filter(detail_order_id.eq_any(&ids))
            .load::<OrderDetail>(&mut conn)
            .await?;

        let mut items_map: HashMap<i32, Vec<(OrderItem, Product)>> = HashMap::new();

        for item in items_data {
            items_map.entry(item.0.order_id).or_default().push(item);
        }

        let mut details_map: HashMap<i32, OrderDetail> = HashMap::new();

        for d in details_data {
            details_map.insert(d.order_id, d);
        }

        let result = orders_list
            .into_iter()
            .map(|o| {
                let items = items_map.remove(&o.order_id).unwrap_or_default();
                let detail = details_map.remove(&o.order_id);
                (o, items, detail)
            })
            .collect();

        Ok(result)
    }

    /// Checks whether a tracking number is already taken by any order,
    /// soft-deleted ones included.
    pub async fn tracking_number_exists(
        &self,
        tracking_number_query: &str,
    ) -> Result<bool, result::Error> {
        use crate::data::models::schema::orders::dsl::{orders, tracking_number};

        let db = Database::new().await;

        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders
            .filter(tracking_number.eq(tracking_number_query))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(_) => Ok(true),
            Err(result::Error::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
