use bigdecimal::BigDecimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub coupon_code: Option<String>,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub delivery_date: chrono::NaiveDate,
    pub delivery_slot_id: Option<i32>,
    pub card_message: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Deserialize)]
pub struct ValidateCouponRequest {
    pub code: String,
    pub subtotal: BigDecimal,
}
