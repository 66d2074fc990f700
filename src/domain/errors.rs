use thiserror::Error;

/// Every way an order submission can be turned away, plus the internal
/// failures of the persistence steps behind it.
///
/// Display strings double as the public error messages; the price and totals
/// variants deliberately never carry the authoritative figures, so a caller
/// probing for catalog prices learns nothing from the rejection.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Invalid input data: {0}")]
    Validation(String),

    #[error("Too many orders. Please try again later.")]
    RateLimited,

    #[error("Item \"{0}\" is not available")]
    UnknownItem(String),

    #[error("\"{0}\" is currently unavailable")]
    ItemUnavailable(String),

    #[error("Price verification failed. Please refresh and try again.")]
    PriceMismatch,

    #[error("Tax calculation error. Please refresh and try again.")]
    TaxMismatch,

    #[error("Delivery fee calculation error")]
    DeliveryFeeMismatch,

    #[error("Order total verification failed. Please refresh and try again.")]
    TotalsMismatch,

    #[error("Invalid table number")]
    TableNotFound,

    #[error("This table is not currently active")]
    TableInactive,

    #[error("Failed to verify order items")]
    CatalogFetch,

    #[error("Failed to create customer record")]
    CustomerPersist,

    #[error("Failed to create order")]
    OrderPersist,

    #[error("Failed to create order items")]
    ItemsPersist,

    #[error("Storage error: {0}")]
    Storage(String),
}
