use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::TwilioConfig;
use crate::domain::order::DeliveryType;
use crate::errors::AppError;
use crate::handlers::first_validation_message;
use crate::relay::{self, KitchenNotification, NotifyItem};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyItemRequest {
    #[validate(length(min = 1, max = 200, message = "Item name must be 1-200 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 100, message = "Invalid quantity"))]
    pub quantity: i32,
    #[validate(length(max = 500, message = "Special instructions too long"))]
    pub special_instructions: Option<String>,
}

/// Relay input. Validated from scratch: the relay is a separate invocation
/// and never trusts that its caller ran the intake pipeline.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub order_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Invalid order number"))]
    pub order_number: String,
    #[validate(length(min = 1, max = 50, message = "Order must have 1-50 items"), nested)]
    pub items: Vec<NotifyItemRequest>,
    #[validate(range(min = 1, max = 999, message = "Invalid table number"))]
    pub table_number: Option<i32>,
    pub delivery_type: DeliveryType,
    #[validate(range(exclusive_min = 0.0, max = 1000000.0, message = "Invalid total"))]
    pub total: f64,
    #[validate(length(min = 1, max = 20, message = "Invalid phone number"))]
    pub phone_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_sid: Option<String>,
    pub message: String,
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// POST /notify
///
/// Formats a bounded kitchen summary of an already-created order and relays
/// it over WhatsApp. Failure here is reported to the caller but is never
/// allowed to affect the order itself; the storefront treats a relay error
/// as non-fatal.
#[utoipa::path(
    post,
    path = "/notify",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Kitchen notified", body = NotifyResponse),
        (status = 400, description = "Invalid notification payload"),
        (status = 500, description = "Messaging credentials not configured"),
        (status = 502, description = "Upstream messaging API failure"),
    ),
    tag = "notify"
)]
pub async fn notify_kitchen(
    twilio: web::Data<Option<TwilioConfig>>,
    http: web::Data<reqwest::Client>,
    body: web::Json<NotifyRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate().map_err(|errors| {
        AppError::BadRequest(format!(
            "Invalid input data: {}",
            first_validation_message(&errors)
        ))
    })?;

    let Some(cfg) = twilio.get_ref() else {
        return Err(AppError::Misconfigured("Twilio credentials"));
    };

    log::info!(
        "Relaying order {} ({}) to the kitchen",
        body.order_number,
        body.order_id
    );

    let message = relay::format_kitchen_message(&KitchenNotification {
        order_number: body.order_number,
        items: body
            .items
            .into_iter()
            .map(|item| NotifyItem {
                name: item.name,
                quantity: item.quantity,
                special_instructions: item.special_instructions,
            })
            .collect(),
        table_number: body.table_number,
        delivery_type: body.delivery_type,
        total: body.total,
        phone_number: body.phone_number,
    });

    let message_sid = relay::send_whatsapp(http.get_ref(), cfg, &message).await?;

    Ok(HttpResponse::Ok().json(NotifyResponse {
        success: true,
        message_sid: Some(message_sid),
        message: "Chef notified via WhatsApp".to_string(),
    }))
}
