#[derive(Debug, PartialEq)]
pub enum CheckoutError {
    ProductNotFound(i32),
    InsufficientStock { product_id: i32, name: String },
    TrackingNumberExhausted,
    CheckoutFailed,
}

impl std::error::Error for CheckoutError {}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::ProductNotFound(product_id) => {
                write!(f, "Product {} not found", product_id)
            }
            CheckoutError::InsufficientStock { name, .. } => {
                write!(f, "Insufficient stock for product: {}", name)
            }
            CheckoutError::TrackingNumberExhausted => {
                write!(f, "Could not generate a unique tracking number")
            }
            CheckoutError::CheckoutFailed => write!(f, "Order creation failed"),
        }
    }
}

impl From<diesel::result::Error> for CheckoutError {
    fn from(_: diesel::result::Error) -> Self {
        CheckoutError::CheckoutFailed
    }
}

#[derive(Debug, PartialEq)]
pub enum OrderServiceError {
    OrderNotFound,
    DatabaseError,
}

impl std::error::Error for OrderServiceError {}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::OrderNotFound => write!(f, "Order not found"),
            OrderServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CouponServiceError {
    DatabaseError,
}

impl std::error::Error for CouponServiceError {}

impl std::fmt::Display for CouponServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CouponServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}
