use std::sync::Arc;
use std::sync::LazyLock;

use actix_web::{web, HttpResponse};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::intake::OrderIntakeService;
use crate::domain::order::{CartLine, ClaimedTotals, DeliveryType, OrderDraft};
use crate::errors::AppError;
use crate::handlers::first_validation_message;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid phone regex"));
static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,3}$").expect("valid table regex"));

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[validate(length(min = 1, max = 200, message = "Item name must be 1-200 characters"))]
    pub name: String,
    /// Client-claimed unit price; verified against the catalog, never stored.
    #[validate(range(exclusive_min = 0.0, max = 100000.0, message = "Invalid item price"))]
    pub price: f64,
    #[validate(range(min = 1, max = 99, message = "Quantity must be between 1 and 99"))]
    pub quantity: i32,
    #[validate(length(max = 500, message = "Special instructions too long"))]
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_delivery_fields))]
pub struct CreateOrderRequest {
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number format"))]
    pub phone: String,
    pub delivery_type: DeliveryType,
    #[validate(regex(path = *TABLE_RE, message = "Invalid table number format"))]
    pub table_number: Option<String>,
    #[validate(length(min = 10, max = 500, message = "Valid address required for delivery orders"))]
    pub address: Option<String>,
    #[validate(length(max = 500, message = "Special requests too long"))]
    pub special_requests: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Order must have 1-50 items"), nested)]
    pub items: Vec<OrderItemRequest>,
    #[validate(range(exclusive_min = 0.0, max = 1000000.0, message = "Invalid subtotal"))]
    pub subtotal: f64,
    #[validate(range(min = 0.0, max = 100000.0, message = "Invalid tax"))]
    pub tax: f64,
    #[validate(range(min = 0.0, max = 1000.0, message = "Invalid delivery fee"))]
    pub delivery_fee: f64,
    #[validate(range(exclusive_min = 0.0, max = 1000000.0, message = "Invalid total"))]
    pub total: f64,
}

/// Conditionally required fields: a dine-in order needs a table number, a
/// delivery order needs a usable address. Violations are validation errors,
/// never silent defaults.
fn validate_delivery_fields(req: &CreateOrderRequest) -> Result<(), ValidationError> {
    match req.delivery_type {
        DeliveryType::DineIn => {
            if req.table_number.as_deref().unwrap_or("").is_empty() {
                return Err(ValidationError::new("table_number")
                    .with_message("Table number required for dine-in orders".into()));
            }
        }
        DeliveryType::Delivery => {
            if req.address.as_deref().map_or(true, |a| a.trim().len() < 10) {
                return Err(ValidationError::new("address")
                    .with_message("Valid address required for delivery orders".into()));
            }
        }
        DeliveryType::Takeaway => {}
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: Uuid,
    pub order_number: String,
    pub total: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: OrderSummary,
}

impl CreateOrderRequest {
    fn into_draft(self) -> OrderDraft {
        OrderDraft {
            phone: self.phone,
            delivery_type: self.delivery_type,
            // The regex already guarantees 1-3 digits when present.
            table_number: self.table_number.as_deref().and_then(|t| t.parse().ok()),
            address: self.address,
            special_requests: self.special_requests,
            lines: self
                .items
                .into_iter()
                .map(|item| CartLine {
                    name: item.name,
                    claimed_unit_price: item.price,
                    quantity: item.quantity,
                    note: item.special_instructions,
                })
                .collect(),
            claimed: ClaimedTotals {
                subtotal: self.subtotal,
                tax: self.tax,
                delivery_fee: self.delivery_fee,
                total: self.total,
            },
        }
    }
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates the submission shape, then hands the cart to the intake
/// pipeline, which re-derives every monetary figure from the menu catalog
/// before anything is persisted. The blocking pipeline runs on the actix
/// worker pool via `web::block`.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Validation, price, or referential failure"),
        (status = 429, description = "Too many orders for this phone number"),
        (status = 500, description = "Persistence failure"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    intake: web::Data<OrderIntakeService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate().map_err(|errors| {
        AppError::BadRequest(format!(
            "Invalid input data: {}",
            first_validation_message(&errors)
        ))
    })?;

    let intake: Arc<OrderIntakeService> = intake.into_inner();
    let draft = body.into_draft();
    let receipt = web::block(move || intake.place_order(draft))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CreateOrderResponse {
        success: true,
        order: OrderSummary {
            id: receipt.order_id,
            order_number: receipt.order_number,
            total: receipt.total,
        },
    }))
}
