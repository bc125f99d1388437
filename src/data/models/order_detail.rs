use crate::data::models::order::Order;
use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug)]
#[diesel(table_name = order_details)]
#[diesel(primary_key(order_detail_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct OrderDetail {
    pub order_detail_id: i32,
    pub order_id: i32,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub delivery_date: chrono::NaiveDate,
    pub delivery_slot_id: Option<i32>,
    pub card_message: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = order_details)]
pub struct NewOrderDetail {
    pub order_id: i32,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub delivery_date: chrono::NaiveDate,
    pub delivery_slot_id: Option<i32>,
    pub card_message: Option<String>,
}

/// Delivery fields collected from the cart before the order id exists.
/// The checkout transaction turns this into a NewOrderDetail once the
/// order header row has been inserted.
#[derive(PartialEq, Debug)]
pub struct CheckoutDetail {
    pub recipient_name: String,
    pub recipient_phone: String,
    pub delivery_date: chrono::NaiveDate,
    pub delivery_slot_id: Option<i32>,
    pub card_message: Option<String>,
}

impl CheckoutDetail {
    pub fn into_new_detail(self, order_id: i32) -> NewOrderDetail {
        NewOrderDetail {
            order_id,
            recipient_name: self.recipient_name,
            recipient_phone: self.recipient_phone,
            delivery_date: self.delivery_date,
            delivery_slot_id: self.delivery_slot_id,
            card_message: self.card_message,
        }
    }
}
