use std::collections::HashMap;

use crate::config::PricingConfig;
use crate::domain::errors::IntakeError;
use crate::domain::order::{
    ClaimedTotals, DeliveryType, MenuCatalogEntry, OrderDraft, PricedLine, PricedOrder,
};

/// Re-derive every monetary figure of a cart from the authoritative catalog
/// and verify the client's claims against them.
///
/// The client's numbers are advisory only. Each line's unit price must match
/// the catalog within `price_tolerance`; the claimed subtotal, tax, and total
/// must match the server-derived figures within `totals_tolerance`; the
/// delivery fee must match exactly. Checks run in that order so a tampered
/// line price is reported as a price mismatch even when the claimed totals
/// are internally consistent with it.
pub fn price_order(
    draft: &OrderDraft,
    catalog: &HashMap<String, MenuCatalogEntry>,
    cfg: &PricingConfig,
) -> Result<PricedOrder, IntakeError> {
    let mut lines = Vec::with_capacity(draft.lines.len());
    let mut subtotal = 0.0_f64;

    for line in &draft.lines {
        let entry = catalog
            .get(&line.name)
            .ok_or_else(|| IntakeError::UnknownItem(line.name.clone()))?;
        if !entry.is_available {
            return Err(IntakeError::ItemUnavailable(line.name.clone()));
        }
        if (entry.price - line.claimed_unit_price).abs() > cfg.price_tolerance {
            log::error!(
                "price mismatch for {:?}: expected {}, got {}",
                line.name,
                entry.price,
                line.claimed_unit_price
            );
            return Err(IntakeError::PriceMismatch);
        }
        subtotal += entry.price * f64::from(line.quantity);
        lines.push(PricedLine {
            name: line.name.clone(),
            unit_price: entry.price,
            quantity: line.quantity,
            note: line.note.clone(),
        });
    }

    let tax = (subtotal * cfg.tax_rate).round();
    let delivery_fee = if draft.delivery_type == DeliveryType::Delivery {
        cfg.delivery_fee
    } else {
        0.0
    };
    let total = subtotal + tax + delivery_fee;

    verify_claims(
        &draft.claimed,
        subtotal,
        tax,
        delivery_fee,
        total,
        cfg.totals_tolerance,
    )?;

    Ok(PricedOrder {
        lines,
        subtotal,
        tax,
        delivery_fee,
        total,
    })
}

fn verify_claims(
    claimed: &ClaimedTotals,
    subtotal: f64,
    tax: f64,
    delivery_fee: f64,
    total: f64,
    tolerance: f64,
) -> Result<(), IntakeError> {
    if (subtotal - claimed.subtotal).abs() > tolerance {
        log::error!(
            "subtotal mismatch: expected {subtotal}, got {}",
            claimed.subtotal
        );
        return Err(IntakeError::TotalsMismatch);
    }
    if (tax - claimed.tax).abs() > tolerance {
        log::error!("tax mismatch: expected {tax}, got {}", claimed.tax);
        return Err(IntakeError::TaxMismatch);
    }
    if claimed.delivery_fee != delivery_fee {
        log::error!(
            "delivery fee mismatch: expected {delivery_fee}, got {}",
            claimed.delivery_fee
        );
        return Err(IntakeError::DeliveryFeeMismatch);
    }
    if (total - claimed.total).abs() > tolerance {
        log::error!("total mismatch: expected {total}, got {}", claimed.total);
        return Err(IntakeError::TotalsMismatch);
    }
    Ok(())
}
