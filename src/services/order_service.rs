use crate::api::request::CreateOrderRequest;
use crate::data::models::order::NewOrder;
use crate::data::models::order_detail::CheckoutDetail;
use crate::data::repos::implementors::delivery_slot_repo::DeliverySlotRepo;
use crate::data::repos::implementors::order_repo::{OrderAggregate, OrderRepo};
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::coupon_service::CouponService;
use crate::services::errors::{CheckoutError, OrderServiceError};
use bigdecimal::BigDecimal;
use rand::Rng;

/// Order statuses for workflow management
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Attempts before giving up on finding a free tracking number.
const TRACKING_NUMBER_ATTEMPTS: usize = 20;

pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        OrderService
    }

    /// Converts a cart into a persisted order aggregate.
    ///
    /// Prices the cart against the current catalog, applies a best-effort
    /// coupon discount clamped to the subtotal, adds the delivery-slot
    /// shipping cost, then writes the header, item snapshots, stock
    /// decrements and delivery detail in one transaction.
    pub async fn create_order(
        &self,
        user_id: i32,
        request: CreateOrderRequest,
    ) -> Result<OrderAggregate, CheckoutError> {
        let order_repo = OrderRepo::new();
        let product_repo = ProductRepo::new();

        let mut subtotal = BigDecimal::from(0);
        let mut items: Vec<(i32, i32, BigDecimal)> = Vec::with_capacity(request.items.len());

        for item in &request.items {
            let product = product_repo
                .get_by_id(item.product_id)
                .await
                .map_err(CheckoutError::from)?
                .ok_or(CheckoutError::ProductNotFound(item.product_id))?;

            subtotal += &product.price * BigDecimal::from(item.quantity);
            items.push((product.product_id, item.quantity, product.price));
        }

        let mut discount = BigDecimal::from(0);

        if let Some(code) = request.coupon_code.as_deref() {
            discount = CouponService::new()
                .discount_for(code, &subtotal)
                .await
                .map_err(|_| CheckoutError::CheckoutFailed)?;

            // A fixed coupon may exceed the subtotal; the total never goes
            // below zero.
            if discount > subtotal {
                discount = subtotal.clone();
            }
        }

        let shipping_cost = self.shipping_cost_for(request.delivery_slot_id).await?;

        let total_amount = &subtotal - &discount + &shipping_cost;

        let tracking_number = self.generate_tracking_number(&order_repo).await?;

        let new_order = NewOrder {
            user_id,
            status: OrderStatus::Pending.as_str().to_string(),
            total_amount,
            shipping_cost,
            payment_method: request.payment_method,
            tracking_number,
        };

        let detail = CheckoutDetail {
            recipient_name: request.recipient_name,
            recipient_phone: request.recipient_phone,
            delivery_date: request.delivery_date,
            delivery_slot_id: request.delivery_slot_id,
            card_message: request.card_message,
        };

        let order_id = order_repo.create_checkout(new_order, items, detail).await?;

        tracing::info!("Order {} created for user {}", order_id, user_id);

        order_repo
            .get_aggregate(order_id)
            .await
            .map_err(CheckoutError::from)?
            .ok_or(CheckoutError::CheckoutFailed)
    }

    /// Gets a single order with items and delivery detail eagerly loaded.
    pub async fn get_order(
        &self,
        order_id: i32,
    ) -> Result<Option<OrderAggregate>, OrderServiceError> {
        let repo = OrderRepo::new();

        repo.get_aggregate(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)
    }

    /// Gets all orders for a user, each with items and detail attached.
    pub async fn get_user_orders(
        &self,
        user_id: i32,
    ) -> Result<Option<Vec<OrderAggregate>>, OrderServiceError> {
        let repo = OrderRepo::new();

        let orders = repo
            .get_by_user_id(user_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;

        match orders {
            Some(list) => {
                let aggregates = repo
                    .attach_aggregates(list)
                    .await
                    .map_err(|_| OrderServiceError::DatabaseError)?;
                Ok(Some(aggregates))
            }
            None => Ok(None),
        }
    }

    /// Shipping is free without a delivery slot; an unresolvable slot id
    /// also contributes nothing rather than failing the checkout.
    async fn shipping_cost_for(
        &self,
        delivery_slot_id: Option<i32>,
    ) -> Result<BigDecimal, CheckoutError> {
        let slot_id = match delivery_slot_id {
            Some(value) => value,
            None => return Ok(BigDecimal::from(0)),
        };

        let repo = DeliverySlotRepo::new();
        let slot = repo
            .get_by_id(slot_id)
            .await
            .map_err(CheckoutError::from)?;

        Ok(slot
            .map(|s| s.additional_cost)
            .unwrap_or_else(|| BigDecimal::from(0)))
    }

    /// Generates an `MS-` + 10 uppercase alphanumerics tracking number,
    /// retrying on collision up to TRACKING_NUMBER_ATTEMPTS.
    async fn generate_tracking_number(&self, repo: &OrderRepo) -> Result<String, CheckoutError> {
        for _ in 0..TRACKING_NUMBER_ATTEMPTS {
            let suffix: String = rand::thread_rng()
                .sample_iter(rand::distributions::Alphanumeric)
                .take(10)
                .map(|b| (b as char).to_ascii_uppercase())
                .collect();

            let candidate = format!("MS-{}", suffix);

            if !repo
                .tracking_number_exists(&candidate)
                .await
                .map_err(CheckoutError::from)?
            {
                return Ok(candidate);
            }
        }

        Err(CheckoutError::TrackingNumberExhausted)
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}
