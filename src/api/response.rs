use crate::data::models::order_detail::OrderDetail;
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::Product;
use crate::data::repos::implementors::order_repo::OrderAggregate;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: i32,
    pub tracking_number: String,
    pub status: String,
    pub total_amount: BigDecimal,
    pub shipping_cost: BigDecimal,
    pub payment_method: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub detail: Option<OrderDetailResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub recipient_name: String,
    pub recipient_phone: String,
    pub delivery_date: String,
    pub delivery_slot_id: Option<i32>,
    pub card_message: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CouponValidationResponse {
    pub valid: bool,
    pub discount: BigDecimal,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

impl From<OrderAggregate> for OrderResponse {
    fn from((order, items, detail): OrderAggregate) -> Self {
        Self {
            order_id: order.order_id,
            tracking_number: order.tracking_number,
            status: order.status,
            total_amount: order.total_amount,
            shipping_cost: order.shipping_cost,
            payment_method: order.payment_method,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            detail: detail.map(OrderDetailResponse::from),
            created_at: order.created_at.map(|d| d.to_string()),
            updated_at: order.updated_at.map(|d| d.to_string()),
        }
    }
}

impl From<(OrderItem, Product)> for OrderItemResponse {
    fn from((item, product): (OrderItem, Product)) -> Self {
        Self {
            product_id: item.product_id,
            name: product.name,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            recipient_name: detail.recipient_name,
            recipient_phone: detail.recipient_phone,
            delivery_date: detail.delivery_date.format("%Y-%m-%d").to_string(),
            delivery_slot_id: detail.delivery_slot_id,
            card_message: detail.card_message,
        }
    }
}
