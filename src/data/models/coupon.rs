use crate::data::models::schema::*;
use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = coupons)]
#[diesel(primary_key(coupon_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
#[diesel(treat_none_as_null = true)]
pub struct Coupon {
    pub coupon_id: i32,
    pub code: String,
    pub discount_type: String,
    pub value: BigDecimal,
    pub min_purchase: Option<BigDecimal>,
    pub expiry_date: Option<chrono::NaiveDate>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl Coupon {
    /// A coupon stays valid until its expiry date is strictly in the past.
    /// Coupons without an expiry date never expire.
    pub fn is_valid(&self) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry >= chrono::Utc::now().date_naive(),
            None => true,
        }
    }

    /// Discount amount for the given subtotal. Returns zero when the coupon
    /// has expired or the subtotal is below the configured minimum purchase.
    pub fn discount_for(&self, subtotal: &BigDecimal) -> BigDecimal {
        if !self.is_valid() {
            return BigDecimal::from(0);
        }

        if let Some(min) = &self.min_purchase {
            if subtotal < min {
                return BigDecimal::from(0);
            }
        }

        match DiscountType::from_str(&self.discount_type) {
            Ok(DiscountType::Percentage) => (subtotal * &self.value / BigDecimal::from(100))
                .with_scale_round(2, RoundingMode::HalfUp),
            _ => self.value.clone(),
        }
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = coupons)]
pub struct NewCoupon<'a> {
    pub code: &'a str,
    pub discount_type: &'a str,
    pub value: BigDecimal,
    pub min_purchase: Option<BigDecimal>,
    pub expiry_date: Option<chrono::NaiveDate>,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = coupons)]
pub struct UpdateCoupon<'a> {
    pub code: Option<&'a str>,
    pub discount_type: Option<&'a str>,
    pub value: Option<BigDecimal>,
    pub min_purchase: Option<BigDecimal>,
    pub expiry_date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

impl FromStr for DiscountType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "percentage" => Ok(DiscountType::Percentage),
            "fixed" => Ok(DiscountType::Fixed),
            _ => Err(()),
        }
    }
}
