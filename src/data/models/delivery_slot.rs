use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = delivery_slots)]
#[diesel(primary_key(delivery_slot_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct DeliverySlot {
    pub delivery_slot_id: i32,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub additional_cost: BigDecimal,
    pub capacity_limit: Option<i32>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, AsChangeset, PartialEq, Debug)]
#[diesel(table_name = delivery_slots)]
pub struct NewDeliverySlot {
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub additional_cost: BigDecimal,
    pub capacity_limit: Option<i32>,
}
