use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fulfillment mode of an order. Each mode carries its own conditionally
/// required field: dine-in needs a table number, delivery needs an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    DineIn,
    Takeaway,
    Delivery,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::DineIn => "dine_in",
            DeliveryType::Takeaway => "takeaway",
            DeliveryType::Delivery => "delivery",
        }
    }

    /// Human-readable label used in kitchen notifications.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::DineIn => "Dine In",
            DeliveryType::Takeaway => "Takeaway",
            DeliveryType::Delivery => "Delivery",
        }
    }
}

/// One cart line as the client sent it. The unit price here is a claim to
/// verify against the catalog, never a fact to store.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub name: String,
    pub claimed_unit_price: f64,
    pub quantity: i32,
    pub note: Option<String>,
}

/// Aggregate figures as claimed by the client alongside the cart.
#[derive(Debug, Clone, Copy)]
pub struct ClaimedTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

/// A shape-validated order submission, ready for the intake pipeline.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub phone: String,
    pub delivery_type: DeliveryType,
    pub table_number: Option<i32>,
    pub address: Option<String>,
    pub special_requests: Option<String>,
    pub lines: Vec<CartLine>,
    pub claimed: ClaimedTotals,
}

/// Authoritative menu data for one item, read from the catalog store.
#[derive(Debug, Clone)]
pub struct MenuCatalogEntry {
    pub name: String,
    pub price: f64,
    pub is_available: bool,
}

/// One order line after verification, carrying the catalog price.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub note: Option<String>,
}

/// The server-derived pricing of an entire cart.
#[derive(Debug, Clone)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct TableRecord {
    pub id: Uuid,
    pub table_number: i32,
    pub is_active: bool,
}

/// Everything the store needs to insert the order row.
#[derive(Debug, Clone)]
pub struct NewOrderRecord {
    pub customer_id: Uuid,
    pub table_id: Option<Uuid>,
    pub delivery_type: DeliveryType,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub special_instructions: Option<String>,
    pub delivery_address: Option<String>,
    pub phone_number: String,
}

/// Identity of a freshly inserted order row.
#[derive(Debug, Clone)]
pub struct CreatedOrder {
    pub id: Uuid,
    pub order_number: String,
}

/// Confirmation returned to the client; all figures are the server's.
#[derive(Debug, Clone)]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub order_number: String,
    pub total: f64,
}
