use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{PricingConfig, RateLimitConfig};
use crate::domain::errors::IntakeError;
use crate::domain::order::{
    DeliveryType, NewOrderRecord, OrderDraft, OrderReceipt, PricedLine,
};
use crate::domain::ports::OrderRepository;
use crate::domain::pricing;
use crate::domain::rate_limit::RateLimiter;
use crate::domain::sanitize::{escape_for_storage, redact_phone};

/// The order intake pipeline: rate limit, verify against the catalog,
/// resolve references, and persist the order graph.
///
/// Stateless per request apart from the in-process rate limiter. All store
/// access goes through the [`OrderRepository`] port, which is what makes the
/// compensation path testable without a database.
pub struct OrderIntakeService {
    repo: Arc<dyn OrderRepository>,
    limiter: RateLimiter,
    pricing: PricingConfig,
}

impl OrderIntakeService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        pricing: PricingConfig,
        rate_limit: RateLimitConfig,
    ) -> Self {
        Self {
            repo,
            limiter: RateLimiter::new(rate_limit),
            pricing,
        }
    }

    /// Turn a shape-validated submission into a persisted order, or reject
    /// it with a specific reason. Rejection paths persist nothing; the one
    /// partial-failure case (items insert after order insert) triggers a
    /// best-effort compensating delete of the order row.
    pub fn place_order(&self, draft: OrderDraft) -> Result<OrderReceipt, IntakeError> {
        let phone = redact_phone(&draft.phone);
        log::info!("Processing order for phone: {phone}");

        if !self.limiter.check(&draft.phone) {
            log::warn!("Rate limit exceeded for phone: {phone}");
            return Err(IntakeError::RateLimited);
        }

        let mut names: Vec<String> = draft.lines.iter().map(|l| l.name.clone()).collect();
        names.sort();
        names.dedup();
        let catalog: HashMap<_, _> = self
            .repo
            .menu_entries(&names)
            .map_err(|e| {
                log::error!("Error fetching menu items: {e}");
                IntakeError::CatalogFetch
            })?
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect();

        let priced = pricing::price_order(&draft, &catalog, &self.pricing)?;

        let table_id = self.resolve_table(&draft)?;

        let customer_id = self.repo.find_or_create_customer(&draft.phone).map_err(|e| {
            log::error!("Error creating customer: {e}");
            IntakeError::CustomerPersist
        })?;

        let record = NewOrderRecord {
            customer_id,
            table_id,
            delivery_type: draft.delivery_type,
            subtotal: priced.subtotal,
            tax: priced.tax,
            delivery_fee: priced.delivery_fee,
            total: priced.total,
            special_instructions: draft
                .special_requests
                .as_deref()
                .map(escape_for_storage)
                .filter(|s| !s.is_empty()),
            delivery_address: match draft.delivery_type {
                DeliveryType::Delivery => draft.address.as_deref().map(escape_for_storage),
                _ => None,
            },
            phone_number: draft.phone.clone(),
        };

        let created = self.repo.insert_order(&record).map_err(|e| {
            log::error!("Error creating order: {e}");
            IntakeError::OrderPersist
        })?;

        let items: Vec<PricedLine> = priced
            .lines
            .iter()
            .map(|l| PricedLine {
                name: escape_for_storage(&l.name),
                unit_price: l.unit_price,
                quantity: l.quantity,
                note: l
                    .note
                    .as_deref()
                    .map(escape_for_storage)
                    .filter(|s| !s.is_empty()),
            })
            .collect();

        if let Err(e) = self.repo.insert_items(created.id, &items) {
            log::error!("Error creating order items for {}: {e}", created.id);
            if let Err(del) = self.repo.delete_order(created.id) {
                // Orphaned order row; flag it for manual cleanup.
                log::error!(
                    "Compensating delete failed for order {}: {del}",
                    created.id
                );
            }
            return Err(IntakeError::ItemsPersist);
        }

        log::info!("Order created successfully: {}", created.id);
        Ok(OrderReceipt {
            order_id: created.id,
            order_number: created.order_number,
            total: priced.total,
        })
    }

    fn resolve_table(&self, draft: &OrderDraft) -> Result<Option<uuid::Uuid>, IntakeError> {
        if draft.delivery_type != DeliveryType::DineIn {
            return Ok(None);
        }
        // Shape validation guarantees the table number for dine-in.
        let number = draft
            .table_number
            .ok_or_else(|| IntakeError::Validation("Table number required".to_string()))?;
        let table = self
            .repo
            .find_table(number)
            .map_err(|e| {
                log::error!("Error looking up table {number}: {e}");
                IntakeError::TableNotFound
            })?
            .ok_or(IntakeError::TableNotFound)?;
        if !table.is_active {
            return Err(IntakeError::TableInactive);
        }
        Ok(Some(table.id))
    }
}
