use crate::api::response::CouponValidationResponse;
use crate::data::repos::implementors::coupon_repo::CouponRepo;
use crate::services::errors::CouponServiceError;
use bigdecimal::BigDecimal;

pub struct CouponService;

impl CouponService {
    pub fn new() -> Self {
        CouponService
    }

    /// Validates a coupon code against a subtotal and reports the computed
    /// discount. Used by the standalone validation endpoint.
    pub async fn validate_coupon(
        &self,
        code: &str,
        subtotal: &BigDecimal,
    ) -> Result<CouponValidationResponse, CouponServiceError> {
        let repo = CouponRepo::new();

        let coupon = match repo
            .get_by_code(code)
            .await
            .map_err(|_| CouponServiceError::DatabaseError)?
        {
            Some(value) => value,
            None => {
                return Ok(CouponValidationResponse {
                    valid: false,
                    discount: BigDecimal::from(0),
                    message: "Coupon not found".to_string(),
                });
            }
        };

        if !coupon.is_valid() {
            return Ok(CouponValidationResponse {
                valid: false,
                discount: BigDecimal::from(0),
                message: "Coupon has expired".to_string(),
            });
        }

        if let Some(min) = &coupon.min_purchase {
            if subtotal < min {
                return Ok(CouponValidationResponse {
                    valid: false,
                    discount: BigDecimal::from(0),
                    message: format!("Minimum purchase of {} required", min),
                });
            }
        }

        Ok(CouponValidationResponse {
            valid: true,
            discount: coupon.discount_for(subtotal),
            message: "Coupon applied successfully".to_string(),
        })
    }

    /// Best-effort discount used during checkout: an unknown, expired or
    /// below-minimum coupon simply contributes nothing instead of failing
    /// the order.
    pub async fn discount_for(
        &self,
        code: &str,
        subtotal: &BigDecimal,
    ) -> Result<BigDecimal, CouponServiceError> {
        let repo = CouponRepo::new();

        let coupon = repo
            .get_by_code(code)
            .await
            .map_err(|_| CouponServiceError::DatabaseError)?;

        Ok(coupon
            .map(|c| c.discount_for(subtotal))
            .unwrap_or_else(|| BigDecimal::from(0)))
    }
}

impl Default for CouponService {
    fn default() -> Self {
        Self::new()
    }
}
